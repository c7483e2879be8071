//! Type constructors through Generic Associated Types.
//!
//! Rust cannot abstract over a type constructor like `FutureResult<_, E>`
//! directly. [`TypeConstructor`] names the applied type (`Inner`) and lets
//! the same constructor be re-applied to another type (`WithType<B>`), which
//! is all the capability traits in this crate need.
//!
//! # Example
//!
//! ```rust
//! use future_result::typeclass::TypeConstructor;
//!
//! fn retarget<T: TypeConstructor>(_value: T) -> T::WithType<String>
//! where
//!     T::WithType<String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let parsed: Result<i32, ()> = Ok(42);
//! let empty: Result<String, ()> = retarget(parsed);
//! assert_eq!(empty, Ok(String::new()));
//! ```

/// A type constructor applied to `Inner`.
///
/// # Laws
///
/// 1. **Consistency**: `<F as TypeConstructor>::WithType<F::Inner>` is `F`.
pub trait TypeConstructor {
    /// The type this constructor is currently applied to.
    ///
    /// For `FutureResult<i32, String>` this is `i32`.
    type Inner;

    /// The same constructor applied to `B`.
    ///
    /// Any other parameters (such as the failure type) are preserved.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<T, E> TypeConstructor for Result<T, E> {
    type Inner = T;
    type WithType<B> = Result<B, E>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn result_inner_type_is_correct() {
        fn assert_inner<T: TypeConstructor<Inner = i32>>() {}
        assert_inner::<Result<i32, String>>();
    }

    /// `WithType` must keep the failure type.
    #[test]
    fn result_with_type_preserves_error_type() {
        fn assert_result_with_type<T, E, B>()
        where
            Result<T, E>: TypeConstructor<Inner = T, WithType<B> = Result<B, E>>,
        {
        }

        assert_result_with_type::<i32, String, bool>();
        assert_result_with_type::<Vec<u8>, std::io::Error, String>();
    }

    #[cfg(feature = "effect")]
    #[test]
    fn effect_types_are_type_constructors() {
        use crate::effect::{Deferred, FutureResult};

        fn assert_retargets<T, B>()
        where
            T: TypeConstructor,
            T::WithType<B>: TypeConstructor<Inner = B>,
        {
        }

        assert_retargets::<Deferred<i32>, String>();
        assert_retargets::<FutureResult<i32, String>, bool>();

        fn assert_future_result<T>()
        where
            T: TypeConstructor<Inner = u8, WithType<char> = FutureResult<char, String>>,
        {
        }
        assert_future_result::<FutureResult<u8, String>>();
    }

    #[rstest]
    #[case(Ok(1))]
    #[case(Err("failed"))]
    fn result_with_type_inner_roundtrip(#[case] original: Result<i32, &'static str>) {
        fn roundtrip<T: TypeConstructor>(value: T) -> T::WithType<T::Inner>
        where
            T: Into<T::WithType<T::Inner>>,
        {
            value.into()
        }

        let result: Result<i32, &str> = roundtrip(original);
        assert_eq!(result, original);
    }

    #[test]
    fn chained_with_type_transformations() {
        type Step1 = <Result<i32, ()> as TypeConstructor>::WithType<String>;
        type Step2 = <Step1 as TypeConstructor>::WithType<bool>;

        fn assert_is_result_bool<T: TypeConstructor<Inner = bool, WithType<u8> = Result<u8, ()>>>() {}
        assert_is_result_bool::<Step2>();
    }
}

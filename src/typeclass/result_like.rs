//! The success-or-failure capability.

use super::TypeConstructor;

/// A container that holds either a success of type `Inner` or a failure of
/// type `Failure`.
///
/// Implemented by `std::result::Result` and by
/// [`FutureResult`](crate::effect::FutureResult), so code written against
/// this trait works for both the synchronous and the asynchronous case.
///
/// # Laws
///
/// 1. **Short-circuit**: `Self::from_failure(e).bind_result(f)` never calls `f`
///    and is equivalent to `Self::from_failure(e)`.
/// 2. **Lash identity**: `m.lash(Self::from_failure)` is equivalent to `m`.
///
/// # Examples
///
/// ```rust
/// use future_result::typeclass::ResultLike;
///
/// fn halve<R>(container: R) -> R::WithType<i32>
/// where
///     R: ResultLike<Inner = i32, Failure = String>,
/// {
///     container.bind_result(|value| {
///         if value % 2 == 0 {
///             Ok(value / 2)
///         } else {
///             Err(format!("{value} is odd"))
///         }
///     })
/// }
///
/// assert_eq!(halve(Ok::<i32, String>(8)), Ok(4));
/// assert_eq!(halve(Ok::<i32, String>(3)), Err("3 is odd".to_string()));
/// ```
pub trait ResultLike: TypeConstructor + Sized {
    /// The failure type.
    type Failure;

    /// The same container with its failure type replaced by `F2`.
    type WithFailure<F2>: ResultLike<Inner = Self::Inner, Failure = F2>
    where
        F2: Send + 'static;

    /// Wraps a success value.
    fn from_value(value: Self::Inner) -> Self;

    /// Wraps a failure value.
    fn from_failure(error: Self::Failure) -> Self;

    /// Wraps an existing `Result`.
    fn from_result(result: Result<Self::Inner, Self::Failure>) -> Self;

    /// Chains a synchronous fallible step. Failures skip `function`.
    fn bind_result<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Result<B, Self::Failure> + Send + 'static,
        B: Send + 'static;

    /// Transforms the failure. Successes skip `function`.
    fn map_err<F2, F>(self, function: F) -> Self::WithFailure<F2>
    where
        F: FnOnce(Self::Failure) -> F2 + Send + 'static,
        F2: Send + 'static;

    /// Recovers from a failure. Successes skip `function`.
    fn lash<F>(self, function: F) -> Self
    where
        F: FnOnce(Self::Failure) -> Self + Send + 'static;
}

impl<T, E> ResultLike for Result<T, E> {
    type Failure = E;
    type WithFailure<F2>
        = Result<T, F2>
    where
        F2: Send + 'static;

    fn from_value(value: T) -> Self {
        Ok(value)
    }

    fn from_failure(error: E) -> Self {
        Err(error)
    }

    fn from_result(result: Self) -> Self {
        result
    }

    fn bind_result<B, F>(self, function: F) -> Result<B, E>
    where
        F: FnOnce(T) -> Result<B, E> + Send + 'static,
        B: Send + 'static,
    {
        self.and_then(function)
    }

    fn map_err<F2, F>(self, function: F) -> Result<T, F2>
    where
        F: FnOnce(E) -> F2 + Send + 'static,
        F2: Send + 'static,
    {
        Self::map_err(self, function)
    }

    fn lash<F>(self, function: F) -> Self
    where
        F: FnOnce(E) -> Self + Send + 'static,
    {
        self.or_else(function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(text: &'static str) -> Result<i32, String> {
        text.parse().map_err(|_| format!("not a number: {text}"))
    }

    #[rstest]
    #[case(Ok(4), Ok(5))]
    #[case(Err("bad".to_string()), Err("bad".to_string()))]
    fn bind_result_on_result(#[case] input: Result<i32, String>, #[case] expected: Result<i32, String>) {
        assert_eq!(ResultLike::bind_result(input, |value| Ok(value + 1)), expected);
    }

    #[rstest]
    fn constructors_on_result() {
        assert_eq!(<Result<i32, String> as ResultLike>::from_value(1), Ok(1));
        assert_eq!(
            <Result<i32, &str> as ResultLike>::from_failure("e"),
            Err("e")
        );
        assert_eq!(<Result<i32, ()> as ResultLike>::from_result(Ok(2)), Ok(2));
    }

    #[rstest]
    fn lash_recovers_failure() {
        let recovered = ResultLike::lash(parse("x"), |_| Ok(0));
        assert_eq!(recovered, Ok(0));

        let untouched = ResultLike::lash(parse("3"), |_| Ok(0));
        assert_eq!(untouched, Ok(3));
    }

    #[rstest]
    fn lash_identity_law() {
        assert_eq!(ResultLike::lash(parse("x"), Err), parse("x"));
        assert_eq!(ResultLike::lash(parse("7"), Err), parse("7"));
    }

    #[rstest]
    fn map_err_through_trait() {
        let mapped: Result<i32, usize> = ResultLike::map_err(parse("abc"), |error| error.len());
        assert_eq!(mapped, Err("not a number: abc".len()));
    }
}

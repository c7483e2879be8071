//! Capabilities of asynchronous, failure-aware containers.
//!
//! [`FutureResultLike`] describes what can be built and chained; it says
//! nothing about awaiting. [`FutureResultBased`] adds the requirement that
//! the container is itself a `Future` yielding `Result<Result<T, E>, Fault>`,
//! and is implemented automatically for every type that qualifies.

use std::future::Future;

use super::{AsyncLike, ResultLike, TypeConstructor};
use crate::effect::{Deferred, Fault};

/// A container combining [`AsyncLike`] and [`ResultLike`].
///
/// # Examples
///
/// ```rust
/// use future_result::effect::FutureResult;
/// use future_result::typeclass::{FutureResultLike, ResultLike};
///
/// fn checked_div<C>(container: C, divisor: i32) -> C::WithType<i32>
/// where
///     C: FutureResultLike<Inner = i32, Failure = String> + 'static,
///     C::WithType<i32>: ResultLike<Failure = String>,
/// {
///     container.bind_future_result(move |value| {
///         if divisor == 0 {
///             ResultLike::from_failure("division by zero".to_string())
///         } else {
///             ResultLike::from_value(value / divisor)
///         }
///     })
/// }
///
/// # future_result::effect::runtime::run_blocking(async {
/// let container = FutureResult::<i32, String>::from_value(10);
/// assert_eq!(checked_div(container, 0).await, Ok(Err("division by zero".to_string())));
/// # });
/// ```
pub trait FutureResultLike: AsyncLike + ResultLike {
    /// Chains a function returning another container of the same kind.
    fn bind_future_result<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Self::WithType<B> + Send + 'static,
        B: Send + 'static;

    /// Chains an async function returning another container of the same kind.
    fn bind_async_future_result<B, F, Fut>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Fut + Send + 'static,
        Fut: Future<Output = Self::WithType<B>> + Send + 'static,
        B: Send + 'static;

    /// Lifts a `Deferred` of the failure type into a failed container.
    fn from_failed_future(deferred: Deferred<Self::Failure>) -> Self;

    /// Lifts a `Deferred` that directly produces a `Result`.
    fn from_future_result(inner: Deferred<Result<Self::Inner, Self::Failure>>) -> Self;
}

/// A [`FutureResultLike`] container that can be awaited directly.
pub trait FutureResultBased:
    FutureResultLike
    + Future<
        Output = Result<
            Result<<Self as TypeConstructor>::Inner, <Self as ResultLike>::Failure>,
            Fault,
        >,
    >
{
}

impl<C> FutureResultBased for C where
    C: FutureResultLike
        + Future<
            Output = Result<
                Result<<C as TypeConstructor>::Inner, <C as ResultLike>::Failure>,
                Fault,
            >,
        >
{
}

//! The asynchronous-value capability.

use std::future::Future;

use super::TypeConstructor;
use crate::effect::Deferred;

/// A container whose value only becomes available asynchronously.
///
/// Implemented by [`Deferred`] and [`FutureResult`](crate::effect::FutureResult).
/// A fault in the source skips every function passed to these methods.
///
/// # Examples
///
/// ```rust
/// use future_result::effect::{Deferred, FutureResult};
/// use future_result::typeclass::AsyncLike;
///
/// fn describe<C>(container: C) -> C::WithType<String>
/// where
///     C: AsyncLike<Inner = i32>,
/// {
///     container.map(|value| format!("value = {value}"))
/// }
///
/// # future_result::effect::runtime::run_blocking(async {
/// assert_eq!(describe(Deferred::resolved(1)).await, Ok("value = 1".to_string()));
/// assert_eq!(
///     describe(FutureResult::<i32, ()>::from_value(2)).await,
///     Ok(Ok("value = 2".to_string()))
/// );
/// # });
/// ```
pub trait AsyncLike: TypeConstructor + Sized {
    /// Lifts a `Deferred` of the inner type into this container.
    fn from_future(deferred: Deferred<Self::Inner>) -> Self;

    /// Transforms the eventual value.
    fn map<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> B + Send + 'static,
        B: Send + 'static;

    /// Chains a function returning a `Deferred`.
    fn bind_future<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Deferred<B> + Send + 'static,
        B: Send + 'static;

    /// Chains a plain async function.
    fn bind_awaitable<B, F, Fut>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Fut + Send + 'static,
        Fut: Future<Output = B> + Send + 'static,
        B: Send + 'static;
}

//! Memoized `FutureResult` resolution.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use super::FutureResult;
use crate::effect::deferred::Deferred;
use crate::effect::error::Fault;

type SharedOutcome<T, E> = Shared<BoxFuture<'static, Result<Result<T, E>, Fault>>>;

/// A `FutureResult` whose resolution can be observed any number of times.
///
/// Every clone awaits the same underlying computation, which runs once. All
/// observers see an equal outcome, including faults.
///
/// # Examples
///
/// ```rust
/// use future_result::effect::FutureResult;
///
/// # future_result::effect::runtime::run_blocking(async {
/// let shared = FutureResult::<i32, String>::new(|| async { Ok(7) }).shared();
/// let first = shared.clone();
/// assert_eq!(first.await, Ok(Ok(7)));
/// assert_eq!(shared.await, Ok(Ok(7)));
/// # });
/// ```
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct SharedFutureResult<T, E>
where
    T: Clone,
    E: Clone,
{
    inner: SharedOutcome<T, E>,
}

static_assertions::assert_impl_all!(SharedFutureResult<i32, String>: Send, Sync, Clone);

impl<T, E> SharedFutureResult<T, E>
where
    T: Clone,
    E: Clone,
{
    pub(super) const fn new(inner: SharedOutcome<T, E>) -> Self {
        Self { inner }
    }

    /// Returns the outcome if some observer has already resolved it.
    pub fn peek(&self) -> Option<&Result<Result<T, E>, Fault>> {
        self.inner.peek()
    }
}

impl<T, E> SharedFutureResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Hands out an ordinary `FutureResult` backed by this shared resolution.
    pub fn into_future_result(self) -> FutureResult<T, E> {
        FutureResult::from_future_result(Deferred::try_from_future(self.inner))
    }
}

impl<T, E> Clone for SharedFutureResult<T, E>
where
    T: Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, E> Future for SharedFutureResult<T, E>
where
    T: Clone,
    E: Clone,
{
    type Output = Result<Result<T, E>, Fault>;

    fn poll(mut self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(context)
    }
}

impl<T, E> std::fmt::Debug for SharedFutureResult<T, E>
where
    T: Clone,
    E: Clone,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SharedFutureResult")
            .field("resolved", &self.inner.peek().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    #[tokio::test]
    async fn computation_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let shared = FutureResult::<i32, String>::new(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        })
        .shared();

        let observers: Vec<_> = (0..3).map(|_| shared.clone()).collect();
        for observer in observers {
            assert_eq!(observer.await, Ok(Ok(1)));
        }
        assert_eq!(shared.await, Ok(Ok(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn failure_is_seen_by_every_observer() {
        let shared = FutureResult::<i32, String>::from_failure("bad".to_string()).shared();
        let other = shared.clone();
        assert_eq!(shared.await, Ok(Err("bad".to_string())));
        assert_eq!(other.await, Ok(Err("bad".to_string())));
    }

    #[rstest]
    #[tokio::test]
    async fn peek_after_resolution() {
        let shared = FutureResult::<i32, String>::from_value(2).shared();
        assert!(shared.peek().is_none());
        assert_eq!(format!("{shared:?}"), "SharedFutureResult { resolved: false }");

        assert_eq!(shared.clone().await, Ok(Ok(2)));
        assert_eq!(shared.peek(), Some(&Ok(Ok(2))));
        assert_eq!(format!("{shared:?}"), "SharedFutureResult { resolved: true }");
    }

    #[rstest]
    #[tokio::test]
    async fn into_future_result_keeps_chaining() {
        let shared = FutureResult::<i32, String>::from_value(5).shared();
        let doubled = shared.clone().into_future_result().map(|value| value * 2);
        let tripled = shared.into_future_result().map(|value| value * 3);
        assert_eq!(doubled.await, Ok(Ok(10)));
        assert_eq!(tripled.await, Ok(Ok(15)));
    }
}

//! Cancellation of in-flight `Deferred` computations.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{AbortHandle, Aborted, abortable};
use tokio::task::{JoinError, JoinHandle};

use super::Deferred;
use crate::effect::error::Fault;

/// Cancels the `Deferred` it was created with.
///
/// Cancelling before the `Deferred` resolves makes it resolve to
/// [`Fault::Cancelled`]; nothing chained after it runs. Cancelling after it
/// resolved has no effect. Handles are cheap to clone.
///
/// # Examples
///
/// ```rust
/// use future_result::effect::{Deferred, Fault};
///
/// # future_result::effect::runtime::run_blocking(async {
/// let (deferred, cancel_handle) = Deferred::new(|| async { 1 }).abortable();
/// cancel_handle.cancel();
/// assert_eq!(deferred.await, Err(Fault::Cancelled));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct CancelHandle {
    inner: AbortHandle,
}

impl CancelHandle {
    /// Requests cancellation.
    pub fn cancel(&self) {
        tracing::debug!("cancellation requested");
        self.inner.abort();
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_aborted()
    }
}

impl<A: Send + 'static> Deferred<A> {
    /// Makes this `Deferred` cancellable through the returned [`CancelHandle`].
    pub fn abortable(self) -> (Self, CancelHandle) {
        let (future, inner) = abortable(self);
        let deferred = Self::try_from_future(async move {
            future
                .await
                .unwrap_or_else(|Aborted| Err(Fault::Cancelled))
        });
        (deferred, CancelHandle { inner })
    }
}

/// A `JoinHandle` that aborts its task when dropped.
pub(super) struct AbortOnDrop<T> {
    handle: JoinHandle<T>,
}

impl<T> AbortOnDrop<T> {
    pub(super) const fn new(handle: JoinHandle<T>) -> Self {
        Self { handle }
    }
}

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl<T> Future for AbortOnDrop<T> {
    type Output = Result<T, JoinError>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().handle).poll(context)
    }
}

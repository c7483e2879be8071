//! Externally resolved `Deferred` values.

use tokio::sync::oneshot;

use super::Deferred;
use crate::effect::error::Fault;

/// The producing half of [`Deferred::channel`].
///
/// Resolution is single-shot: both [`resolve`](Self::resolve) and
/// [`fault`](Self::fault) consume the resolver. Dropping it unresolved makes
/// the paired `Deferred` resolve to [`Fault::Abandoned`].
///
/// # Examples
///
/// ```rust
/// use future_result::effect::Deferred;
///
/// # future_result::effect::runtime::run_blocking(async {
/// let (resolver, deferred) = Deferred::channel();
/// resolver.resolve("done");
/// assert_eq!(deferred.await, Ok("done"));
/// # });
/// ```
#[derive(Debug)]
pub struct Resolver<A> {
    sender: oneshot::Sender<Result<A, Fault>>,
}

impl<A> Resolver<A> {
    /// Resolves the paired `Deferred` with `value`.
    ///
    /// Returns `false` if the `Deferred` was already dropped.
    pub fn resolve(self, value: A) -> bool {
        self.sender.send(Ok(value)).is_ok()
    }

    /// Makes the paired `Deferred` resolve to `fault`.
    ///
    /// Returns `false` if the `Deferred` was already dropped.
    pub fn fault(self, fault: Fault) -> bool {
        self.sender.send(Err(fault)).is_ok()
    }

    /// Returns `true` if the paired `Deferred` has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<A: Send + 'static> Deferred<A> {
    /// Creates a `Deferred` that is resolved from the outside.
    pub fn channel() -> (Resolver<A>, Self) {
        let (sender, receiver) = oneshot::channel();
        let deferred = Self::try_from_future(async move {
            receiver.await.unwrap_or_else(|_| {
                tracing::debug!("resolver dropped before resolving");
                Err(Fault::Abandoned)
            })
        });
        (Resolver { sender }, deferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn resolve_delivers_value() {
        let (resolver, deferred) = Deferred::channel();
        assert!(resolver.resolve(7));
        assert_eq!(deferred.await, Ok(7));
    }

    #[rstest]
    #[tokio::test]
    async fn fault_delivers_fault() {
        let (resolver, deferred) = Deferred::<i32>::channel();
        assert!(resolver.fault(Fault::substrate("upstream closed")));
        assert_eq!(
            deferred.await,
            Err(Fault::Substrate("upstream closed".to_string()))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn dropped_resolver_abandons() {
        let (resolver, deferred) = Deferred::<i32>::channel();
        drop(resolver);
        assert_eq!(deferred.await, Err(Fault::Abandoned));
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_from_another_task() {
        let (resolver, deferred) = Deferred::channel();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            resolver.resolve(String::from("later"));
        });
        assert_eq!(deferred.await, Ok(String::from("later")));
    }

    #[rstest]
    fn resolve_after_deferred_dropped() {
        let (resolver, deferred) = Deferred::channel();
        drop(deferred);
        assert!(resolver.is_closed());
        assert!(!resolver.resolve(1));
    }
}

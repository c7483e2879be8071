//! `Deferred` - a value obtainable only through asynchronous waiting.
//!
//! A [`Deferred<A>`] resolves at most once, either to a value of type `A` or
//! to a [`Fault`]. It is the substrate that
//! [`FutureResult`](super::FutureResult) is built on.
//!
//! # Evaluation Semantics
//!
//! `Deferred::resolved(value)` is already complete. `map` applied to a
//! resolved value runs **immediately** (at composition time), without
//! allocation, so mapping functions must be free of side effects. Binding
//! combinators (`flat_map`, `bind_awaitable`) never run early: their function
//! is invoked only once the chain is polled. Everything built from
//! `Deferred::new`, `try_new`, `from_future` or a channel is lazy as well.
//! `Deferred::spawn` is the exception and starts work eagerly on the shared
//! runtime.
//!
//! ```rust
//! use future_result::effect::Deferred;
//!
//! # future_result::effect::runtime::run_blocking(async {
//! let deferred = Deferred::new(|| async { 20 })
//!     .map(|value| value * 2)
//!     .flat_map(|value| Deferred::resolved(value + 2));
//! assert_eq!(deferred.await, Ok(42));
//! # });
//! ```
//!
//! # Faults
//!
//! A fault short-circuits every combinator: nothing mapped or bound after a
//! faulted `Deferred` is ever invoked.
//!
//! ```rust
//! use future_result::effect::{Deferred, Fault};
//!
//! # future_result::effect::runtime::run_blocking(async {
//! let deferred = Deferred::<i32>::faulted(Fault::Cancelled)
//!     .map(|_| unreachable!("never called"));
//! assert_eq!(deferred.await, Err(Fault::Cancelled));
//! # });
//! ```

mod cancel;
mod channel;

pub use cancel::CancelHandle;
pub use channel::Resolver;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::FutureExt;
use pin_project_lite::pin_project;

use super::error::Fault;
use super::runtime;

type BoxedOutcome<A> = Pin<Box<dyn Future<Output = Result<A, Fault>> + Send>>;

type Thunk<A> = Box<dyn FnOnce() -> BoxedOutcome<A> + Send>;

// =============================================================================
// Deferred Struct Definition
// =============================================================================

pin_project! {
    /// A handle to a computation that resolves at most once.
    ///
    /// Awaiting a `Deferred<A>` yields `Ok(A)` when the computation resolved
    /// and `Err(Fault)` when the substrate could not produce a value.
    ///
    /// # Monad Laws
    ///
    /// 1. **Left Identity**: `Deferred::resolved(a).flat_map(f) == f(a)`
    /// 2. **Right Identity**: `m.flat_map(Deferred::resolved) == m`
    /// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Deferred<A> {
        #[pin]
        state: DeferredState<A>,
    }
}

pin_project! {
    /// State transitions:
    ///
    /// - `Resolved` / `Faulted` -> `Completed` (first poll)
    /// - `Defer` -> `Running` (first poll builds the future)
    /// - `Running` -> `Completed` (inner future finished)
    #[project = DeferredStateProj]
    enum DeferredState<A> {
        Resolved {
            value: Option<A>,
        },
        Faulted {
            fault: Option<Fault>,
        },
        Defer {
            thunk: Option<Thunk<A>>,
        },
        Running {
            #[pin]
            future: BoxedOutcome<A>,
        },
        Completed,
    }
}

static_assertions::assert_impl_all!(Deferred<String>: Send, Unpin);
static_assertions::assert_not_impl_any!(Deferred<String>: Clone, std::ops::Deref);

// =============================================================================
// Future Implementation
// =============================================================================

impl<A> Future for Deferred<A> {
    type Output = Result<A, Fault>;

    /// Drives the state machine.
    ///
    /// Polling again after the value was yielded returns
    /// `Err(Fault::Consumed)` rather than panicking.
    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.state.as_mut().project() {
                DeferredStateProj::Resolved { value } => {
                    let outcome = value.take().ok_or(Fault::Consumed);
                    this.state.set(DeferredState::Completed);
                    return Poll::Ready(outcome);
                }
                DeferredStateProj::Faulted { fault } => {
                    let fault = fault.take().unwrap_or(Fault::Consumed);
                    this.state.set(DeferredState::Completed);
                    return Poll::Ready(Err(fault));
                }
                DeferredStateProj::Defer { thunk } => {
                    let Some(thunk) = thunk.take() else {
                        this.state.set(DeferredState::Completed);
                        return Poll::Ready(Err(Fault::Consumed));
                    };
                    let future = thunk();
                    this.state.set(DeferredState::Running { future });
                }
                DeferredStateProj::Running { future } => {
                    let outcome = ready!(future.poll(context));
                    this.state.set(DeferredState::Completed);
                    return Poll::Ready(outcome);
                }
                DeferredStateProj::Completed => return Poll::Ready(Err(Fault::Consumed)),
            }
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl<A> Deferred<A> {
    /// Wraps an already-known value. Awaiting it returns immediately.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::Deferred;
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// assert_eq!(Deferred::resolved(42).await, Ok(42));
    /// # });
    /// ```
    pub const fn resolved(value: A) -> Self {
        Self {
            state: DeferredState::Resolved { value: Some(value) },
        }
    }

    /// Creates a `Deferred` that has already faulted.
    pub const fn faulted(fault: Fault) -> Self {
        Self {
            state: DeferredState::Faulted { fault: Some(fault) },
        }
    }

    /// Returns the value if this `Deferred` is already resolved, or gives
    /// `self` back untouched.
    pub(crate) fn into_resolved(self) -> Result<A, Self> {
        match self.state {
            DeferredState::Resolved { value: Some(value) } => Ok(value),
            state => Err(Self { state }),
        }
    }
}

impl<A: 'static> Deferred<A> {
    /// Creates a lazy `Deferred` from an async closure.
    ///
    /// The closure is not invoked until the `Deferred` is first polled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::Deferred;
    ///
    /// let deferred = Deferred::new(|| async { 10 + 20 });
    /// # future_result::effect::runtime::run_blocking(async {
    /// assert_eq!(deferred.await, Ok(30));
    /// # });
    /// ```
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::try_new(move || action().map(Ok))
    }

    /// Creates a lazy `Deferred` from an async closure that may fault.
    pub fn try_new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<A, Fault>> + Send + 'static,
    {
        Self {
            state: DeferredState::Defer {
                thunk: Some(Box::new(move || Box::pin(action()))),
            },
        }
    }

    /// Adopts a future that has not been polled yet.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::try_from_future(future.map(Ok))
    }

    /// Adopts a future whose output already distinguishes faults.
    pub fn try_from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<A, Fault>> + Send + 'static,
    {
        Self {
            state: DeferredState::Defer {
                thunk: Some(Box::new(move || Box::pin(future))),
            },
        }
    }
}

// =============================================================================
// Combinators
// =============================================================================

impl<A: Send + 'static> Deferred<A> {
    /// Transforms the resolved value.
    ///
    /// A resolved source is mapped immediately; otherwise the function runs
    /// after the source resolves. A fault skips the function.
    pub fn map<B, F>(self, function: F) -> Deferred<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        match self.into_resolved() {
            Ok(value) => Deferred::resolved(function(value)),
            Err(pending) => Deferred::try_from_future(async move { pending.await.map(function) }),
        }
    }

    /// Chains a computation that produces another `Deferred`.
    ///
    /// Always deferred, even over a resolved source: `function` runs only
    /// when the result is polled, so cancelling or dropping the chain first
    /// means it never runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::Deferred;
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let deferred = Deferred::new(|| async { 10 })
    ///     .flat_map(|value| Deferred::new(move || async move { value * 2 }));
    /// assert_eq!(deferred.await, Ok(20));
    /// # });
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Deferred<B>
    where
        F: FnOnce(A) -> Deferred<B> + Send + 'static,
        B: Send + 'static,
    {
        Deferred::try_from_future(async move {
            let value = self.await?;
            function(value).await
        })
    }

    /// Chains a plain async function. Always deferred.
    pub fn bind_awaitable<B, F, Fut>(self, function: F) -> Deferred<B>
    where
        F: FnOnce(A) -> Fut + Send + 'static,
        Fut: Future<Output = B> + Send + 'static,
        B: Send + 'static,
    {
        Deferred::try_from_future(async move {
            let value = self.await?;
            Ok(function(value).await)
        })
    }

    /// Converts a panic raised while driving this `Deferred` into
    /// [`Fault::Panicked`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::{Deferred, Fault};
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let deferred = Deferred::<i32>::new(|| async { panic!("oops") }).catch_unwind();
    /// assert_eq!(deferred.await, Err(Fault::Panicked("oops".to_string())));
    /// # });
    /// ```
    pub fn catch_unwind(self) -> Self {
        use std::panic::AssertUnwindSafe;

        Self::try_from_future(async move {
            AssertUnwindSafe(self)
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    let fault = Fault::from_panic(payload.as_ref());
                    tracing::warn!(%fault, "deferred computation panicked");
                    Err(fault)
                })
        })
    }

    /// Starts `future` on the shared runtime right away.
    ///
    /// The returned `Deferred` is in flight from the moment it is created.
    /// Dropping it aborts the task. A panicking or aborted task surfaces as a
    /// [`Fault`], never as a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::Deferred;
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let deferred = Deferred::spawn(async { 6 * 7 });
    /// assert_eq!(deferred.await, Ok(42));
    /// # });
    /// ```
    pub fn spawn<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        let task = cancel::AbortOnDrop::new(runtime::handle().spawn(future));
        Self::try_from_future(async move {
            task.await.map_err(|error| {
                let fault = Fault::from(error);
                tracing::warn!(%fault, "spawned deferred task did not complete");
                fault
            })
        })
    }
}

// =============================================================================
// Display / Debug
// =============================================================================

impl<A> std::fmt::Display for Deferred<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<Deferred>")
    }
}

impl<A> std::fmt::Debug for Deferred<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Deferred").finish_non_exhaustive()
    }
}

// =============================================================================
// TypeConstructor / AsyncLike Implementation
// =============================================================================

impl<A> crate::typeclass::TypeConstructor for Deferred<A> {
    type Inner = A;
    type WithType<B> = Deferred<B>;
}

impl<A: Send + 'static> crate::typeclass::AsyncLike for Deferred<A> {
    fn from_future(deferred: Deferred<A>) -> Self {
        deferred
    }

    fn map<B, F>(self, function: F) -> Deferred<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        Self::map(self, function)
    }

    fn bind_future<B, F>(self, function: F) -> Deferred<B>
    where
        F: FnOnce(A) -> Deferred<B> + Send + 'static,
        B: Send + 'static,
    {
        self.flat_map(function)
    }

    fn bind_awaitable<B, F, Fut>(self, function: F) -> Deferred<B>
    where
        F: FnOnce(A) -> Fut + Send + 'static,
        Fut: Future<Output = B> + Send + 'static,
        B: Send + 'static,
    {
        Self::bind_awaitable(self, function)
    }
}

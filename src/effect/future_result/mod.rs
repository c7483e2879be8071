//! `FutureResult` - an asynchronous computation that succeeds or fails.
//!
//! A [`FutureResult<T, E>`] owns a single [`Deferred<Result<T, E>>`]. It
//! can only be inspected by awaiting it, which yields
//! `Result<Result<T, E>, Fault>`:
//!
//! - `Ok(Ok(value))`: the computation succeeded.
//! - `Ok(Err(error))`: the computation failed with a domain failure.
//! - `Err(fault)`: the substrate never produced a `Result` at all.
//!
//! There is no synchronous accessor. Every combinator consumes the container
//! and returns a new one.
//!
//! # Short-circuiting
//!
//! Once a step resolves to a failure, no later bound function runs and the
//! failure reaches the end of the chain unchanged.
//!
//! ```rust
//! use future_result::effect::FutureResult;
//!
//! # future_result::effect::runtime::run_blocking(async {
//! let chain = FutureResult::<i32, &str>::from_failure("e1")
//!     .bind_future_result(|value| FutureResult::from_value(value + 1))
//!     .bind_future_result(|value| FutureResult::from_value(value * 2));
//! assert_eq!(chain.await, Ok(Err("e1")));
//! # });
//! ```
//!
//! # Async steps
//!
//! ```rust
//! use future_result::effect::FutureResult;
//!
//! async fn double(value: i32) -> FutureResult<i32, String> {
//!     FutureResult::from_value(value * 2)
//! }
//!
//! # future_result::effect::runtime::run_blocking(async {
//! let chain = FutureResult::<i32, String>::from_value(5).bind_async_future_result(double);
//! assert_eq!(chain.await, Ok(Ok(10)));
//! # });
//! ```
//!
//! # Evaluation Semantics
//!
//! Every bound function (`bind_future_result`, `bind_async_future_result`,
//! `bind_result`, `bind_future`, `bind_awaitable`, `lash`, `compose_result`)
//! runs only while the chain is being awaited, even when the source was
//! built from an already-known value. Cancelling or dropping a chain before
//! it is awaited therefore runs none of them, and a panicking step surfaces
//! through [`FutureResult::catch_unwind`] like any other.
//!
//! The pure transformations `map`, `map_err` and `swap` keep a fast path:
//! over an already-known value they apply at composition time, so they must
//! not carry side effects.

mod shared;

pub use shared::SharedFutureResult;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use pin_project_lite::pin_project;

use super::deferred::{CancelHandle, Deferred};
use super::error::Fault;
use super::runtime;

pin_project! {
    /// An asynchronous, failure-aware container.
    ///
    /// # Type Parameters
    ///
    /// - `T`: The success type.
    /// - `E`: The failure type.
    ///
    /// # Single Resolution
    ///
    /// A `FutureResult` hands out its `Result` exactly once. Polling it again
    /// after it completed is not a re-read: it yields `Err(Fault::Consumed)`.
    /// To observe one resolution from several places, convert it with
    /// [`shared`](Self::shared); every clone of the [`SharedFutureResult`]
    /// resolves to the same outcome.
    ///
    /// ```rust
    /// use future_result::effect::{Fault, FutureResult};
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let mut once = FutureResult::<i32, String>::new(|| async { Ok(1) });
    /// assert_eq!((&mut once).await, Ok(Ok(1)));
    /// assert_eq!((&mut once).await, Err(Fault::Consumed));
    ///
    /// let shared = FutureResult::<i32, String>::new(|| async { Ok(1) }).shared();
    /// assert_eq!(shared.clone().await, Ok(Ok(1)));
    /// assert_eq!(shared.await, Ok(Ok(1)));
    /// # });
    /// ```
    ///
    /// # Monad Laws
    ///
    /// 1. **Left Identity**: `FutureResult::from_value(a).bind_future_result(f) == f(a)`
    /// 2. **Right Identity**: `m.bind_future_result(FutureResult::from_value) == m`
    /// 3. **Associativity**: `m.bind_future_result(f).bind_future_result(g)
    ///    == m.bind_future_result(|x| f(x).bind_future_result(g))`
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct FutureResult<T, E> {
        #[pin]
        inner: Deferred<Result<T, E>>,
    }
}

static_assertions::assert_impl_all!(FutureResult<i32, String>: Send, Unpin);
static_assertions::assert_not_impl_any!(FutureResult<i32, String>: Clone, Copy, std::ops::Deref);

impl<T, E> Future for FutureResult<T, E> {
    type Output = Result<Result<T, E>, Fault>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().inner.poll(context)
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl<T, E> FutureResult<T, E> {
    /// Wraps a success value in an immediately-resolved container.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::FutureResult;
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let container = FutureResult::<i32, String>::from_value(1);
    /// assert_eq!(container.await, Ok(Ok(1)));
    /// # });
    /// ```
    pub const fn from_value(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    /// Wraps a failure value in an immediately-resolved container.
    pub const fn from_failure(error: E) -> Self {
        Self::from_result(Err(error))
    }

    /// Wraps an already-known `Result`.
    pub const fn from_result(result: Result<T, E>) -> Self {
        Self::from_future_result(Deferred::resolved(result))
    }

    /// Wraps a `Deferred` that directly produces a `Result`.
    ///
    /// This is the fully general constructor; all others delegate to it.
    pub const fn from_future_result(inner: Deferred<Result<T, E>>) -> Self {
        Self { inner }
    }

    /// Gives back the underlying `Deferred`. It is still unresolved.
    pub fn into_deferred(self) -> Deferred<Result<T, E>> {
        self.inner
    }
}

impl<T, E> FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wraps a `Deferred` whose value is a success.
    pub fn from_future(deferred: Deferred<T>) -> Self {
        Self::from_future_result(deferred.map(Ok))
    }

    /// Wraps a `Deferred` whose value, once resolved, is a failure.
    ///
    /// The value is not validated; the container resolves to `Err(value)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::{Deferred, FutureResult};
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let container =
    ///     FutureResult::<i32, &str>::from_failed_future(Deferred::new(|| async { "late" }));
    /// assert_eq!(container.await, Ok(Err("late")));
    /// # });
    /// ```
    pub fn from_failed_future(deferred: Deferred<E>) -> Self {
        Self::from_future_result(deferred.map(Err))
    }

    /// Creates a lazy container from an async closure producing a `Result`.
    ///
    /// The closure is not invoked until the container is awaited.
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::from_future_result(Deferred::new(action))
    }

    /// Adopts any unpolled future that resolves to a `Result`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::FutureResult;
    ///
    /// async fn parse(input: &'static str) -> Result<i32, std::num::ParseIntError> {
    ///     input.parse()
    /// }
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let container = FutureResult::lift(parse("42")).map(|value| value + 1);
    /// assert_eq!(container.await, Ok(Ok(43)));
    /// # });
    /// ```
    pub fn lift<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::from_future_result(Deferred::from_future(future))
    }
}

impl<T, E> From<Result<T, E>> for FutureResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}

// =============================================================================
// Functor / Applicative Operations
// =============================================================================

impl<T, E> FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Transforms the success value. Failures pass through untouched.
    pub fn map<U, F>(self, function: F) -> FutureResult<U, E>
    where
        F: FnOnce(T) -> U + Send + 'static,
        U: Send + 'static,
    {
        FutureResult::from_future_result(self.inner.map(move |result| result.map(function)))
    }

    /// Transforms the failure value. Successes pass through untouched.
    pub fn map_err<E2, F>(self, function: F) -> FutureResult<T, E2>
    where
        F: FnOnce(E) -> E2 + Send + 'static,
        E2: Send + 'static,
    {
        FutureResult::from_future_result(self.inner.map(move |result| result.map_err(function)))
    }

    /// Applies a function held in another container to this container's value.
    ///
    /// The function container is awaited first; if it fails, `self` is never
    /// awaited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::FutureResult;
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let function = FutureResult::<_, String>::from_value(|value: i32| value * 3);
    /// let container = FutureResult::from_value(14).apply(function);
    /// assert_eq!(container.await, Ok(Ok(42)));
    /// # });
    /// ```
    pub fn apply<U, F>(self, function_container: FutureResult<F, E>) -> FutureResult<U, E>
    where
        F: FnOnce(T) -> U + Send + 'static,
        U: Send + 'static,
    {
        function_container.bind_future_result(move |function| self.map(function))
    }

    /// Pairs this container's value with another's, sequentially.
    pub fn zip<U>(self, other: FutureResult<U, E>) -> FutureResult<(T, U), E>
    where
        U: Send + 'static,
    {
        self.bind_future_result(move |left| other.map(move |right| (left, right)))
    }

    /// Exchanges the success and failure sides.
    pub fn swap(self) -> FutureResult<E, T> {
        FutureResult::from_future_result(self.inner.map(|result| result.map_or_else(Ok, Err)))
    }
}

// =============================================================================
// Monad Operations
// =============================================================================

impl<T, E> FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Binds a function returning another `FutureResult`.
    ///
    /// On success the function runs and its container is adopted. On failure
    /// the function is never invoked and the failure propagates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::FutureResult;
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let container = FutureResult::<i32, String>::from_value(5)
    ///     .bind_future_result(|value| FutureResult::from_value(value + 1));
    /// assert_eq!(container.await, Ok(Ok(6)));
    /// # });
    /// ```
    pub fn bind_future_result<U, F>(self, function: F) -> FutureResult<U, E>
    where
        F: FnOnce(T) -> FutureResult<U, E> + Send + 'static,
        U: Send + 'static,
    {
        FutureResult::from_future_result(self.inner.flat_map(move |result| {
            result
                .map_or_else(FutureResult::from_failure, function)
                .inner
        }))
    }

    /// Alias for [`bind_future_result`](Self::bind_future_result).
    pub fn flat_map<U, F>(self, function: F) -> FutureResult<U, E>
    where
        F: FnOnce(T) -> FutureResult<U, E> + Send + 'static,
        U: Send + 'static,
    {
        self.bind_future_result(function)
    }

    /// Binds an async function returning another `FutureResult`.
    ///
    /// The chain suspends twice, strictly in order: first until the function
    /// has produced the next container, then until that container resolves.
    pub fn bind_async_future_result<U, F, Fut>(self, function: F) -> FutureResult<U, E>
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = FutureResult<U, E>> + Send + 'static,
        U: Send + 'static,
    {
        let source = self.inner;
        FutureResult::from_future_result(Deferred::try_new(move || async move {
            match source.await? {
                Ok(value) => {
                    let next = function(value).await;
                    next.await
                }
                Err(error) => Ok(Err(error)),
            }
        }))
    }

    /// Binds a synchronous fallible function.
    pub fn bind_result<U, F>(self, function: F) -> FutureResult<U, E>
    where
        F: FnOnce(T) -> Result<U, E> + Send + 'static,
        U: Send + 'static,
    {
        FutureResult::from_future_result(
            self.inner
                .flat_map(move |result| Deferred::resolved(result.and_then(function))),
        )
    }

    /// Binds a function returning an infallible `Deferred`.
    pub fn bind_future<U, F>(self, function: F) -> FutureResult<U, E>
    where
        F: FnOnce(T) -> Deferred<U> + Send + 'static,
        U: Send + 'static,
    {
        FutureResult::from_future_result(self.inner.flat_map(move |result| {
            result.map_or_else(
                |error| Deferred::resolved(Err(error)),
                |value| function(value).map(Ok),
            )
        }))
    }

    /// Binds a plain async function that cannot fail.
    pub fn bind_awaitable<U, F, Fut>(self, function: F) -> FutureResult<U, E>
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
        U: Send + 'static,
    {
        let source = self.inner;
        FutureResult::from_future_result(Deferred::try_new(move || async move {
            Ok(match source.await? {
                Ok(value) => Ok(function(value).await),
                Err(error) => Err(error),
            })
        }))
    }

    /// Recovers from a failure with a function returning another container.
    ///
    /// Successes short-circuit past the function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::FutureResult;
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let container = FutureResult::<usize, &str>::from_failure("four")
    ///     .lash(|error| FutureResult::<usize, ()>::from_value(error.len()));
    /// assert_eq!(container.await, Ok(Ok(4)));
    /// # });
    /// ```
    pub fn lash<E2, F>(self, function: F) -> FutureResult<T, E2>
    where
        F: FnOnce(E) -> FutureResult<T, E2> + Send + 'static,
        E2: Send + 'static,
    {
        FutureResult::from_future_result(self.inner.flat_map(move |result| {
            result.map_or_else(
                |error| function(error).inner,
                |value| Deferred::resolved(Ok(value)),
            )
        }))
    }

    /// Binds a function over the complete `Result`, success or failure.
    pub fn compose_result<U, E2, F>(self, function: F) -> FutureResult<U, E2>
    where
        F: FnOnce(Result<T, E>) -> FutureResult<U, E2> + Send + 'static,
        U: Send + 'static,
        E2: Send + 'static,
    {
        FutureResult::from_future_result(self.inner.flat_map(move |result| function(result).inner))
    }
}

// =============================================================================
// Failure and Fault Handling
// =============================================================================

impl<T, E> FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Runs an async callback when the container fails.
    ///
    /// The failure still propagates after the callback completes.
    pub fn on_failure<F, Callback>(self, callback: F) -> Self
    where
        F: FnOnce(&E) -> Callback + Send + 'static,
        Callback: Future<Output = ()> + Send + 'static,
    {
        let source = self.inner;
        Self::from_future_result(Deferred::try_new(move || async move {
            let result = source.await?;
            let pending = match &result {
                Err(error) => Some(callback(error)),
                Ok(_) => None,
            };
            if let Some(pending) = pending {
                pending.await;
            }
            Ok(result)
        }))
    }

    /// Turns a resolution fault into a domain failure.
    ///
    /// This is the only place faults become failures, and only because the
    /// caller asked for it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::{Deferred, Fault, FutureResult};
    ///
    /// # future_result::effect::runtime::run_blocking(async {
    /// let container =
    ///     FutureResult::<i32, String>::from_future_result(Deferred::faulted(Fault::Cancelled))
    ///         .recover_fault(|fault| fault.to_string());
    /// assert_eq!(
    ///     container.await,
    ///     Ok(Err("deferred computation was cancelled before it resolved".to_string()))
    /// );
    /// # });
    /// ```
    pub fn recover_fault<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> E + Send + 'static,
    {
        let source = self.inner;
        Self::from_future_result(Deferred::try_new(move || async move {
            Ok(source.await.unwrap_or_else(|fault| Err(handler(fault))))
        }))
    }

    /// Converts a panic while driving the container into [`Fault::Panicked`].
    pub fn catch_unwind(self) -> Self {
        Self::from_future_result(self.inner.catch_unwind())
    }

    /// Makes the container cancellable through the returned [`CancelHandle`].
    ///
    /// Cancelling before resolution yields `Err(Fault::Cancelled)` and no
    /// bound function runs.
    pub fn abortable(self) -> (Self, CancelHandle) {
        let (inner, cancel_handle) = self.inner.abortable();
        (Self::from_future_result(inner), cancel_handle)
    }

    /// Drives the container to completion from synchronous code.
    ///
    /// # Errors
    ///
    /// Returns the container's own fault, or [`Fault::Blocking`] when the
    /// current thread cannot block (inside a current-thread runtime).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::FutureResult;
    ///
    /// let outcome = FutureResult::<i32, String>::new(|| async { Ok(2) })
    ///     .map(|value| value * 21)
    ///     .run_blocking();
    /// assert_eq!(outcome, Ok(Ok(42)));
    /// ```
    pub fn run_blocking(self) -> Result<Result<T, E>, Fault> {
        runtime::try_run_blocking(self)?
    }
}

impl<T, E> FutureResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Memoizes the resolution so it can be awaited from many places.
    ///
    /// See [`SharedFutureResult`].
    pub fn shared(self) -> SharedFutureResult<T, E> {
        SharedFutureResult::new(self.boxed().shared())
    }
}

// =============================================================================
// Display / Debug
// =============================================================================

impl<T, E> std::fmt::Display for FutureResult<T, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "<FutureResult>")
    }
}

impl<T, E> std::fmt::Debug for FutureResult<T, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("FutureResult").finish_non_exhaustive()
    }
}

// =============================================================================
// Capability Implementations
// =============================================================================

impl<T, E> crate::typeclass::TypeConstructor for FutureResult<T, E> {
    type Inner = T;
    type WithType<B> = FutureResult<B, E>;
}

impl<T, E> crate::typeclass::AsyncLike for FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn from_future(deferred: Deferred<T>) -> Self {
        Self::from_future(deferred)
    }

    fn map<B, F>(self, function: F) -> FutureResult<B, E>
    where
        F: FnOnce(T) -> B + Send + 'static,
        B: Send + 'static,
    {
        Self::map(self, function)
    }

    fn bind_future<B, F>(self, function: F) -> FutureResult<B, E>
    where
        F: FnOnce(T) -> Deferred<B> + Send + 'static,
        B: Send + 'static,
    {
        Self::bind_future(self, function)
    }

    fn bind_awaitable<B, F, Fut>(self, function: F) -> FutureResult<B, E>
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = B> + Send + 'static,
        B: Send + 'static,
    {
        Self::bind_awaitable(self, function)
    }
}

impl<T, E> crate::typeclass::ResultLike for FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Failure = E;
    type WithFailure<F2>
        = FutureResult<T, F2>
    where
        F2: Send + 'static;

    fn from_value(value: T) -> Self {
        Self::from_value(value)
    }

    fn from_failure(error: E) -> Self {
        Self::from_failure(error)
    }

    fn from_result(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }

    fn bind_result<B, F>(self, function: F) -> FutureResult<B, E>
    where
        F: FnOnce(T) -> Result<B, E> + Send + 'static,
        B: Send + 'static,
    {
        Self::bind_result(self, function)
    }

    fn map_err<F2, F>(self, function: F) -> FutureResult<T, F2>
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
        Self::lash(self, function)
    }
}

impl<T, E> crate::typeclass::FutureResultLike for FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn bind_future_result<B, F>(self, function: F) -> FutureResult<B, E>
    where
        F: FnOnce(T) -> FutureResult<B, E> + Send + 'static,
        B: Send + 'static,
    {
        Self::bind_future_result(self, function)
    }

    fn bind_async_future_result<B, F, Fut>(self, function: F) -> FutureResult<B, E>
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = FutureResult<B, E>> + Send + 'static,
        B: Send + 'static,
    {
        Self::bind_async_future_result(self, function)
    }

    fn from_failed_future(deferred: Deferred<E>) -> Self {
        Self::from_failed_future(deferred)
    }

    fn from_future_result(inner: Deferred<Result<T, E>>) -> Self {
        Self::from_future_result(inner)
    }
}

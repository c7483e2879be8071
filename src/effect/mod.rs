//! Asynchronous, failure-aware computations.
//!
//! # Layers
//!
//! - [`Deferred`]: a value obtainable only through asynchronous waiting. It
//!   resolves at most once, to a value or to a [`Fault`].
//! - [`FutureResult`]: a `Deferred<Result<T, E>>` that can only be chained
//!   and awaited, never unwrapped synchronously.
//! - [`SharedFutureResult`]: a cloneable handle that re-reads one
//!   resolution any number of times.
//! - [`runtime`]: the shared tokio runtime and blocking entry points.
//!
//! # Failures and Faults
//!
//! Awaiting a `FutureResult<T, E>` yields `Result<Result<T, E>, Fault>`. The
//! inner `Result` is the domain outcome. The outer `Err(Fault)` means the
//! substrate never produced one: the computation was cancelled, panicked,
//! or its resolver was dropped.
//!
//! ```rust
//! use future_result::effect::{Deferred, Fault, FutureResult};
//!
//! # future_result::effect::runtime::run_blocking(async {
//! let failed = FutureResult::<i32, String>::from_failure("invalid".to_string());
//! assert_eq!(failed.await, Ok(Err("invalid".to_string())));
//!
//! let (resolver, deferred) = Deferred::<i32>::channel();
//! drop(resolver);
//! let faulted = FutureResult::<i32, String>::from_future(deferred);
//! assert_eq!(faulted.await, Err(Fault::Abandoned));
//! # });
//! ```
//!
//! # Do-Notation with `eff_future_result!`
//!
//! ```rust
//! use future_result::eff_future_result;
//! use future_result::effect::FutureResult;
//!
//! # future_result::effect::runtime::run_blocking(async {
//! let result = eff_future_result! {
//!     x <= FutureResult::<i32, String>::from_value(5);
//!     y <= FutureResult::from_value(10);
//!     let z = x + y;
//!     FutureResult::from_value(z * 2)
//! };
//! assert_eq!(result.await, Ok(Ok(30)));
//! # });
//! ```

// =============================================================================
// Faults
// =============================================================================

mod error;

pub use error::Fault;

// =============================================================================
// Deferred
// =============================================================================

mod deferred;

pub use deferred::{CancelHandle, Deferred, Resolver};

// =============================================================================
// FutureResult
// =============================================================================

mod future_result;

pub use future_result::{FutureResult, SharedFutureResult};

// =============================================================================
// Runtime
// =============================================================================

pub mod runtime;

// =============================================================================
// Do-Notation Macros
// =============================================================================

mod eff_future_result_macro;

//! # future-result
//!
//! An asynchronous computation that succeeds or fails, and cannot be
//! unwrapped outside its own combinators.
//!
//! ## Overview
//!
//! - **`FutureResult<T, E>`**: chain async steps that may fail; the first
//!   failure short-circuits the rest of the chain
//! - **`Deferred<A>`**: the underlying single-resolution async value, with
//!   cancellation, channels and panic capture
//! - **Capability traits**: `ResultLike`, `AsyncLike`, `FutureResultLike`
//!   and `FutureResultBased` for code generic over containers
//!
//! ## Feature Flags
//!
//! - `typeclass`: Capability traits (`TypeConstructor`, `ResultLike`)
//! - `effect`: `Deferred`, `FutureResult` and the runtime (pulls in tokio)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use future_result::prelude::*;
//!
//! async fn fetch_price(item: &'static str) -> FutureResult<u32, String> {
//!     match item {
//!         "apple" => FutureResult::from_value(120),
//!         other => FutureResult::from_failure(format!("no price for {other}")),
//!     }
//! }
//!
//! let total = FutureResult::<&str, String>::from_value("apple")
//!     .bind_async_future_result(fetch_price)
//!     .map(|price| price * 3)
//!     .run_blocking();
//! assert_eq!(total, Ok(Ok(360)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use future_result::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "effect")]
pub mod effect;

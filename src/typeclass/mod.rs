//! Capability traits for failure-aware containers.
//!
//! Each trait describes one capability on its own:
//!
//! - [`TypeConstructor`]: re-applying a container to another type
//! - [`ResultLike`]: holding a success or a failure
//! - [`AsyncLike`]: producing a value asynchronously
//! - [`FutureResultLike`]: both of the above, with async chaining
//! - [`FutureResultBased`]: a `FutureResultLike` that can be awaited
//!
//! `std::result::Result` implements [`ResultLike`];
//! [`FutureResult`](crate::effect::FutureResult) implements all of them.
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not have native support for higher-kinded types (HKT).
//! Generic Associated Types stand in for them, which is enough to express
//! "the same container, holding a different type".
//!
//! # Examples
//!
//! ```rust
//! use future_result::typeclass::ResultLike;
//!
//! let parsed = <Result<i32, String> as ResultLike>::from_value(5)
//!     .bind_result(|value| if value > 0 { Ok(value) } else { Err("negative".to_string()) });
//! assert_eq!(parsed, Ok(5));
//! ```

mod higher;
mod result_like;

#[cfg(feature = "effect")]
mod async_like;
#[cfg(feature = "effect")]
mod future_result_like;

pub use higher::TypeConstructor;
pub use result_like::ResultLike;

#[cfg(feature = "effect")]
pub use async_like::AsyncLike;
#[cfg(feature = "effect")]
pub use future_result_like::{FutureResultBased, FutureResultLike};

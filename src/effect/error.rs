//! Resolution faults for the effect system.
//!
//! A [`Fault`] is what the asynchronous substrate reports when a
//! [`Deferred`](super::Deferred) cannot produce any value at all. It is a
//! different thing from a domain failure: a `FutureResult<T, E>` that
//! resolves to `Err(e)` completed normally, while one that faults never
//! produced a `Result<T, E>` in the first place.
//!
//! Faults are never turned into domain failures behind the caller's back.
//! The only conversion is the explicit
//! [`FutureResult::recover_fault`](super::FutureResult::recover_fault).

use std::any::Any;

use thiserror::Error;

use super::runtime::BlockingError;

/// Represents a failure of the asynchronous substrate to resolve a `Deferred`.
///
/// # Examples
///
/// ```rust
/// use future_result::effect::Fault;
///
/// let fault = Fault::Panicked("boom".to_string());
/// assert_eq!(
///     format!("{fault}"),
///     "deferred computation panicked: boom"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// The computation was cancelled before it resolved.
    #[error("deferred computation was cancelled before it resolved")]
    Cancelled,

    /// The computation panicked. Holds the panic message when one was available.
    #[error("deferred computation panicked: {0}")]
    Panicked(String),

    /// The producing side was dropped without resolving.
    #[error("resolver was dropped before the deferred computation resolved")]
    Abandoned,

    /// The `Deferred` was polled again after it had already yielded its value.
    #[error("deferred value was already consumed")]
    Consumed,

    /// A blocking runner could not drive the computation.
    #[error(transparent)]
    Blocking(#[from] BlockingError),

    /// Any other fault reported by the substrate.
    #[error("substrate fault: {0}")]
    Substrate(String),
}

impl Fault {
    /// Creates a [`Fault::Substrate`] from anything displayable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use future_result::effect::Fault;
    ///
    /// let fault = Fault::substrate("connection reset");
    /// assert_eq!(fault, Fault::Substrate("connection reset".to_string()));
    /// ```
    pub fn substrate(message: impl std::fmt::Display) -> Self {
        Self::Substrate(message.to_string())
    }

    /// Builds a [`Fault::Panicked`] from a panic payload.
    ///
    /// String payloads (the common `panic!("...")` case) keep their message.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Self::Panicked(message)
    }

    /// Returns `true` if this fault is [`Fault::Cancelled`].
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<tokio::task::JoinError> for Fault {
    fn from(error: tokio::task::JoinError) -> Self {
        if error.is_cancelled() {
            return Self::Cancelled;
        }
        match error.try_into_panic() {
            Ok(payload) => Self::from_panic(payload.as_ref()),
            Err(error) => Self::Substrate(error.to_string()),
        }
    }
}

//! The runner: a shared tokio runtime that drives deferred computations.
//!
//! `Deferred` and `FutureResult` never schedule themselves. They are driven
//! by whoever awaits them, or, from synchronous code, by the functions in
//! this module.
//!
//! # Design
//!
//! 1. **Global Runtime**: a lazily-initialized multi-thread runtime, built
//!    from [`RuntimeConfig::from_env`] on first use and never dropped.
//! 2. **Handle Caching**: a thread-local cache of the global handle. Inside
//!    a runtime the current handle wins, so spawned work stays on the
//!    caller's runtime.
//! 3. **Blocking Execution**: [`try_run_blocking`] uses `block_in_place`
//!    inside a multi-thread runtime and reports a [`BlockingError`] inside a
//!    current-thread runtime instead of panicking.
//!
//! # Configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `FUTURE_RESULT_WORKER_THREADS` | number of CPUs |
//! | `FUTURE_RESULT_THREAD_NAME` | `future-result-worker` |
//!
//! # Examples
//!
//! ```rust
//! use future_result::effect::runtime::run_blocking;
//!
//! let result = run_blocking(async { 40 + 2 });
//! assert_eq!(result, 42);
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::sync::LazyLock;

use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

/// Environment variable holding the number of worker threads.
pub const WORKER_THREADS_VAR: &str = "FUTURE_RESULT_WORKER_THREADS";

/// Environment variable holding the worker thread name.
pub const THREAD_NAME_VAR: &str = "FUTURE_RESULT_THREAD_NAME";

const DEFAULT_THREAD_NAME: &str = "future-result-worker";

// =============================================================================
// Configuration
// =============================================================================

/// Error raised when runtime configuration cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the variable.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Settings for the global runtime.
///
/// # Examples
///
/// ```rust
/// use future_result::effect::runtime::RuntimeConfig;
///
/// let config = RuntimeConfig::from_lookup(|key| match key {
///     "FUTURE_RESULT_WORKER_THREADS" => Some("2".to_string()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(config.worker_threads, 2);
/// assert_eq!(config.thread_name, "future-result-worker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Number of worker threads. Always at least one.
    pub worker_threads: usize,
    /// Name given to every worker thread.
    pub thread_name: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get(),
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables fall back to [`RuntimeConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the worker count is not a
    /// positive integer or the thread name is blank.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let worker_threads = match lookup(WORKER_THREADS_VAR) {
            Some(raw) => parse_worker_threads(&raw)?,
            None => defaults.worker_threads,
        };

        let thread_name = match lookup(THREAD_NAME_VAR) {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    key: THREAD_NAME_VAR.to_string(),
                    message: "must not be blank".to_string(),
                });
            }
            Some(raw) => raw,
            None => defaults.thread_name,
        };

        Ok(Self {
            worker_threads,
            thread_name,
        })
    }

    /// Builds a multi-thread runtime with these settings.
    ///
    /// # Errors
    ///
    /// Returns the I/O error reported by tokio if the runtime cannot start.
    pub fn build(&self) -> std::io::Result<Runtime> {
        Builder::new_multi_thread()
            .worker_threads(self.worker_threads)
            .thread_name(self.thread_name.clone())
            .enable_all()
            .build()
    }
}

fn parse_worker_threads(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: WORKER_THREADS_VAR.to_string(),
        message,
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1".to_string())),
        Ok(count) => Ok(count),
        Err(error) => Err(invalid(error.to_string())),
    }
}

// =============================================================================
// Global Runtime
// =============================================================================

static GLOBAL_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    let config = RuntimeConfig::from_env().unwrap_or_else(|error| {
        tracing::warn!(%error, "invalid runtime configuration, using defaults");
        RuntimeConfig::default()
    });
    tracing::debug!(
        worker_threads = config.worker_threads,
        thread_name = %config.thread_name,
        "starting global runtime"
    );
    config
        .build()
        .expect("Failed to create global tokio runtime")
});

/// Returns a reference to the global runtime.
///
/// The runtime is lazily initialized on first call and shared across
/// all subsequent calls.
#[inline]
#[must_use]
pub fn global() -> &'static Runtime {
    &GLOBAL_RUNTIME
}

// =============================================================================
// Handle Caching
// =============================================================================

thread_local! {
    static CACHED_HANDLE: RefCell<Option<Handle>> = const { RefCell::new(None) };
}

/// Picks the runtime that spawned deferred work should land on.
///
/// A caller already running on tokio keeps its own runtime. Any other thread
/// gets the global runtime, whose handle is cloned once per thread.
#[inline]
#[must_use]
pub fn handle() -> Handle {
    Handle::try_current().unwrap_or_else(|_| {
        CACHED_HANDLE.with(|cached| {
            cached
                .borrow_mut()
                .get_or_insert_with(|| global().handle().clone())
                .clone()
        })
    })
}

// =============================================================================
// Blocking Execution
// =============================================================================

/// Why a synchronous caller could not wait for a deferred computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockingError {
    /// The calling thread drives a current-thread runtime, which would
    /// deadlock if it stopped to wait.
    #[error("refusing to block a thread that drives a current-thread tokio runtime")]
    CurrentThreadRuntime,

    /// The calling thread belongs to a runtime flavor this crate does not
    /// know how to wait on.
    #[error("refusing to block inside a tokio runtime of unknown flavor")]
    UnknownFlavor,
}

/// Waits for `future` on the calling thread and returns its output.
///
/// | Caller | Strategy |
/// |--------|----------|
/// | no runtime | `block_on` on the [`global`] runtime |
/// | multi-thread runtime worker | `block_in_place` on the caller's runtime |
/// | current-thread runtime | [`BlockingError::CurrentThreadRuntime`] |
///
/// # Errors
///
/// Returns a [`BlockingError`] when waiting here would stall the runtime
/// that is supposed to make progress.
///
/// # Examples
///
/// ```rust
/// use future_result::effect::runtime::try_run_blocking;
///
/// assert_eq!(try_run_blocking(async { 42 }), Ok(42));
/// ```
#[inline]
pub fn try_run_blocking<F, T>(future: F) -> Result<T, BlockingError>
where
    F: Future<Output = T>,
{
    let Ok(current_handle) = Handle::try_current() else {
        return Ok(global().block_on(future));
    };

    match current_handle.runtime_flavor() {
        RuntimeFlavor::MultiThread => {
            tracing::trace!("blocking inside multi-thread runtime");
            Ok(tokio::task::block_in_place(move || {
                current_handle.block_on(future)
            }))
        }
        RuntimeFlavor::CurrentThread => Err(BlockingError::CurrentThreadRuntime),
        _ => Err(BlockingError::UnknownFlavor),
    }
}

/// Like [`try_run_blocking`], for callers that know they are not on a
/// current-thread runtime.
///
/// # Panics
///
/// Panics with the [`BlockingError`] message when the thread cannot block.
#[inline]
pub fn run_blocking<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    match try_run_blocking(future) {
        Ok(output) => output,
        Err(error) => panic!("{error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::ptr;
    use std::thread;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // =========================================================================
    // RuntimeConfig Tests
    // =========================================================================

    #[rstest]
    fn config_defaults_when_unset() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert!(config.worker_threads >= 1);
    }

    #[rstest]
    fn config_reads_both_variables() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            (WORKER_THREADS_VAR, " 3 "),
            (THREAD_NAME_VAR, "binder"),
        ]))
        .unwrap();
        assert_eq!(config.worker_threads, 3);
        assert_eq!(config.thread_name, "binder");
    }

    #[rstest]
    #[case("0", "must be at least 1")]
    #[case("many", "invalid digit found in string")]
    fn config_rejects_bad_worker_threads(#[case] raw: &str, #[case] message: &str) {
        let error =
            RuntimeConfig::from_lookup(lookup_from(&[(WORKER_THREADS_VAR, raw)])).unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidValue {
                key: WORKER_THREADS_VAR.to_string(),
                message: message.to_string(),
            }
        );
    }

    #[rstest]
    fn config_rejects_blank_thread_name() {
        let error =
            RuntimeConfig::from_lookup(lookup_from(&[(THREAD_NAME_VAR, "  ")])).unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("invalid value for {THREAD_NAME_VAR}: must not be blank")
        );
    }

    #[rstest]
    fn config_builds_working_runtime() {
        let config = RuntimeConfig {
            worker_threads: 1,
            thread_name: "config-test".to_string(),
        };
        let runtime = config.build().unwrap();
        assert_eq!(runtime.block_on(async { 7 }), 7);
    }

    // =========================================================================
    // Runtime Selection Tests
    // =========================================================================

    #[rstest]
    fn global_runtime_is_built_once() {
        assert!(ptr::eq(global(), global()));
    }

    #[rstest]
    fn plain_thread_gets_global_runtime() {
        let deferred_sum = handle().block_on(async { 40 + 2 });
        assert_eq!(deferred_sum, 42);
    }

    #[rstest]
    #[tokio::test]
    async fn runtime_thread_keeps_its_runtime() {
        let spawned = handle().spawn(async { "same runtime" });
        assert_eq!(spawned.await.unwrap(), "same runtime");
    }

    // =========================================================================
    // Blocking Tests
    // =========================================================================

    #[rstest]
    #[case(BlockingError::CurrentThreadRuntime, "current-thread")]
    #[case(BlockingError::UnknownFlavor, "unknown flavor")]
    fn blocking_error_names_the_runtime(#[case] error: BlockingError, #[case] fragment: &str) {
        let message = error.to_string();
        assert!(message.starts_with("refusing to block"));
        assert!(message.contains(fragment));
    }

    #[rstest]
    fn blocks_on_global_runtime_without_context() {
        assert_eq!(try_run_blocking(async { "done" }), Ok("done"));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn blocks_in_place_on_multi_thread_worker() {
        let outcome = tokio::task::spawn_blocking(|| try_run_blocking(async { 7 * 6 }))
            .await
            .unwrap();
        assert_eq!(outcome, Ok(42));
    }

    #[rstest]
    #[tokio::test(flavor = "current_thread")]
    async fn refuses_to_block_current_thread_runtime() {
        let outcome = tokio::task::spawn_blocking(|| try_run_blocking(async { 1 }))
            .await
            .unwrap();
        assert_eq!(outcome, Err(BlockingError::CurrentThreadRuntime));
    }

    #[rstest]
    #[should_panic(expected = "refusing to block")]
    fn run_blocking_panics_with_error_message() {
        let runtime = Builder::new_current_thread().build().unwrap();
        runtime.block_on(async { run_blocking(async { 1 }) });
    }

    #[rstest]
    fn run_blocking_from_many_threads() {
        let results: Vec<i32> = (0..4)
            .map(|index| thread::spawn(move || run_blocking(async move { index })))
            .map(|joined| joined.join().unwrap())
            .collect();
        assert_eq!(results, vec![0, 1, 2, 3]);
    }
}

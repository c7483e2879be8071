//! Do-notation macro for `FutureResult`.
//!
//! `eff_future_result!` flattens a chain of
//! [`bind_future_result`](crate::effect::FutureResult::bind_future_result)
//! and
//! [`bind_async_future_result`](crate::effect::FutureResult::bind_async_future_result)
//! calls into a sequence of statements.
//!
//! # Syntax
//!
//! `<-` cannot be matched in Rust macros, so binds use `<=` and friends:
//!
//! ```text
//! eff_future_result! {
//!     pattern <= future_result_expression;   // bind a FutureResult
//!     pattern <~ async_expression;            // await a future yielding a FutureResult, then bind
//!     pattern ?= result_expression;           // bind a plain Result
//!     let pattern = expression;               // pure let
//!     ...
//!     future_result_expression               // final expression
//! }
//! ```
//!
//! A pattern is an identifier, `_`, or a parenthesized tuple pattern. A
//! failure at any bind ends the block; the statements after it never run.

/// Do-notation for `FutureResult`.
///
/// - `pattern <= expr;` binds the success value of a `FutureResult`
/// - `pattern <~ expr;` awaits `expr` (a future producing a `FutureResult`)
///   when the block reaches it, then binds its success value
/// - `pattern ?= expr;` binds the success value of a plain `Result`
/// - `let pattern = expr;` is an ordinary `let`
/// - the last expression must evaluate to a `FutureResult`
///
/// # Examples
///
/// ```rust
/// use future_result::eff_future_result;
/// use future_result::effect::FutureResult;
///
/// fn lookup(id: u32) -> FutureResult<&'static str, String> {
///     FutureResult::new(move || async move {
///         match id {
///             1 => Ok("alice"),
///             other => Err(format!("unknown user {other}")),
///         }
///     })
/// }
///
/// async fn greet(name: String) -> FutureResult<String, String> {
///     FutureResult::from_value(format!("hello, {name}"))
/// }
///
/// # future_result::effect::runtime::run_blocking(async {
/// let greeting = eff_future_result! {
///     name <= lookup(1);
///     let upper = name.to_uppercase();
///     text <~ greet(upper);
///     FutureResult::from_value(text)
/// };
/// assert_eq!(greeting.await, Ok(Ok("hello, ALICE".to_string())));
///
/// let missing = eff_future_result! {
///     name <= lookup(2);
///     FutureResult::from_value(name.len())
/// };
/// assert_eq!(missing.await, Ok(Err("unknown user 2".to_string())));
/// # });
/// ```
#[macro_export]
macro_rules! eff_future_result {
    (@bind $pattern:tt $container:expr ; $($rest:tt)+) => {
        $container.bind_future_result(move |$pattern| {
            $crate::eff_future_result!($($rest)+)
        })
    };

    // The step is obtained only once the preceding binds succeeded.
    (@await $pattern:tt $obtain:expr ; $($rest:tt)+) => {
        $crate::effect::FutureResult::from_value(())
            .bind_async_future_result(move |()| $obtain)
            .bind_future_result(move |$pattern| {
                $crate::eff_future_result!($($rest)+)
            })
    };

    ($pattern:tt <= $container:expr ; $($rest:tt)+) => {
        $crate::eff_future_result!(@bind $pattern $container ; $($rest)+)
    };

    ($pattern:tt <~ $obtain:expr ; $($rest:tt)+) => {
        $crate::eff_future_result!(@await $pattern $obtain ; $($rest)+)
    };

    ($pattern:tt ?= $result:expr ; $($rest:tt)+) => {
        $crate::eff_future_result!(
            @bind $pattern $crate::effect::FutureResult::from_result($result) ; $($rest)+
        )
    };

    (let $name:ident : $ty:ty = $expr:expr ; $($rest:tt)+) => {{
        let $name: $ty = $expr;
        $crate::eff_future_result!($($rest)+)
    }};

    (let $pattern:pat = $expr:expr ; $($rest:tt)+) => {{
        let $pattern = $expr;
        $crate::eff_future_result!($($rest)+)
    }};

    ($result:expr) => {
        $result
    };
}

#![cfg(feature = "effect")]
//! Property-based tests for `FutureResult` laws.
//!
//! - Left Identity: from_value(a).bind_future_result(f) == f(a)
//! - Right Identity: m.bind_future_result(from_value) == m
//! - Associativity: m.bind_future_result(f).bind_future_result(g)
//!   == m.bind_future_result(|x| f(x).bind_future_result(g))
//! - Short-circuit: from_failure(e).bind_future_result(f) == from_failure(e)
//!
//! Every law is checked for both immediately-resolved and lazy sources.

use future_result::effect::FutureResult;
use proptest::prelude::*;

type Outcome = Result<Result<i32, String>, future_result::effect::Fault>;

fn halve(value: i32) -> FutureResult<i32, String> {
    if value % 2 == 0 {
        FutureResult::from_value(value / 2)
    } else {
        FutureResult::from_failure(format!("{value} is odd"))
    }
}

fn decrement(value: i32) -> FutureResult<i32, String> {
    FutureResult::new(move || async move {
        value
            .checked_sub(1)
            .ok_or_else(|| "underflow".to_string())
    })
}

fn lazy(result: Result<i32, String>) -> FutureResult<i32, String> {
    FutureResult::new(move || async move { result })
}

fn source(result: Result<i32, String>, deferred: bool) -> FutureResult<i32, String> {
    if deferred {
        lazy(result)
    } else {
        FutureResult::from_result(result)
    }
}

fn block_on(container: FutureResult<i32, String>) -> Outcome {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(container)
}

fn result_strategy() -> impl Strategy<Value = Result<i32, String>> {
    prop_oneof![
        any::<i32>().prop_map(Ok),
        "[a-z]{1,8}".prop_map(Err),
    ]
}

proptest! {
    #[test]
    fn prop_left_identity(value: i32) {
        let left = block_on(FutureResult::from_value(value).bind_future_result(halve));
        let right = block_on(halve(value));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_left_identity_lazy_step(value: i32) {
        let left = block_on(FutureResult::from_value(value).bind_future_result(decrement));
        let right = block_on(decrement(value));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_right_identity(result in result_strategy(), deferred: bool) {
        let left = block_on(source(result.clone(), deferred).bind_future_result(FutureResult::from_value));
        let right = block_on(source(result, deferred));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_associativity(result in result_strategy(), deferred: bool) {
        let left = block_on(
            source(result.clone(), deferred)
                .bind_future_result(halve)
                .bind_future_result(decrement),
        );
        let right = block_on(
            source(result, deferred)
                .bind_future_result(|value| halve(value).bind_future_result(decrement)),
        );

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_async_bind_matches_sync_bind(result in result_strategy(), deferred: bool) {
        let left = block_on(
            source(result.clone(), deferred)
                .bind_async_future_result(|value| async move { halve(value) }),
        );
        let right = block_on(source(result, deferred).bind_future_result(halve));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_short_circuit(error in "[a-z]{1,8}", length in 0usize..20) {
        let mut container = FutureResult::<i32, String>::from_failure(error.clone());
        for _ in 0..length {
            container = container.bind_future_result(|_| -> FutureResult<i32, String> {
                panic!("bound function must not run after a failure")
            });
        }

        prop_assert_eq!(block_on(container), Ok(Err(error)));
    }

    #[test]
    fn prop_map_is_bind_with_from_value(result in result_strategy(), deferred: bool) {
        let left = block_on(source(result.clone(), deferred).map(|value| value.wrapping_mul(3)));
        let right = block_on(
            source(result, deferred)
                .bind_future_result(|value| FutureResult::from_value(value.wrapping_mul(3))),
        );

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_double_swap_is_identity(result in result_strategy(), deferred: bool) {
        let left = block_on(source(result.clone(), deferred).swap().swap());
        let right = block_on(source(result, deferred));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_lash_with_from_failure_is_identity(result in result_strategy(), deferred: bool) {
        let left = block_on(source(result.clone(), deferred).lash(FutureResult::from_failure));
        let right = block_on(source(result, deferred));

        prop_assert_eq!(left, right);
    }
}

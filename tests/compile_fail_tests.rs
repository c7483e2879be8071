//! Compile-fail tests for misuse of `FutureResult` and `Deferred`.
//!
//! Reading a value without awaiting, cloning a container, or reusing one
//! after it was consumed must be rejected by the compiler.
//!
//! Note: trybuild tests use #[test] as an exception because
//! trybuild's standard usage pattern requires it.

#![cfg(feature = "effect")]

#[test]
fn misuse_compile_fail_tests() {
    let test_cases = trybuild::TestCases::new();
    test_cases.compile_fail("tests/compile_fail/future_result_*.rs");
    test_cases.compile_fail("tests/compile_fail/deferred_*.rs");
}

//! A `FutureResult` is single-use and cannot be cloned.

use future_result::effect::FutureResult;

fn main() {
    let container = FutureResult::<i32, String>::from_value(1);
    let _copy = container.clone();
}

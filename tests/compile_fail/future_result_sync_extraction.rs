//! A `FutureResult` has no synchronous accessor for its value.

use future_result::effect::FutureResult;

fn main() {
    let container = FutureResult::<i32, String>::from_value(1);
    let _value: i32 = container.unwrap();
}

//! Binding consumes the container.

use future_result::effect::FutureResult;

fn main() {
    let container = FutureResult::<i32, String>::from_value(1);
    let _first = container.bind_future_result(|value| FutureResult::from_value(value + 1));
    let _second = container.map(|value| value * 2);
}

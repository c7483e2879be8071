//! A `Deferred` cannot be dereferenced to its value.

use future_result::effect::Deferred;

fn main() {
    let deferred = Deferred::resolved(5);
    let _value: i32 = *deferred;
}

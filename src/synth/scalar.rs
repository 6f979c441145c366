use serde_json::{Number, Value};

use crate::ir::ScalarKind;

/// Map a raw scalar value to its semantic primitive kind.
///
/// Total: every node shape maps to exactly one kind, with null and anything
/// unrecognized landing on `Opaque`. Classification depends only on the value
/// itself, never on siblings.
pub fn classify(value: &Value) -> ScalarKind {
    match value {
        Value::Bool(_) => ScalarKind::Boolean,
        Value::Number(n) => {
            if fits_i32(n) {
                ScalarKind::Integer32
            } else {
                ScalarKind::Integer64
            }
        }
        Value::String(_) => ScalarKind::Text,
        _ => ScalarKind::Opaque,
    }
}

/// Width rule: magnitude-fit in a 32-bit signed integer. A non-integral
/// number still takes the fit test; there is no separate float kind.
fn fits_i32(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        i32::try_from(i).is_ok()
    } else if let Some(u) = n.as_u64() {
        u <= i32::MAX as u64
    } else {
        let f = n.as_f64().unwrap_or(f64::NAN);
        f >= i32::MIN as f64 && f <= i32::MAX as f64
    }
}

// ------------------------------- Tests ------------------------------------ //

// =============================================================================
// Value Coercion — arbitrary JSON input to a finite number or absence
// =============================================================================

use serde_json::Value;

/// Keep `x` only if it is finite.  NaN and ±inf are indistinguishable from
/// absence downstream.
pub fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// Coerce a JSON value into a finite `f64`.
///
/// Numbers and numeric strings (surrounding whitespace allowed) are accepted.
/// Everything else, including `null`, booleans, empty strings, arrays and
/// objects, is absent.
pub fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(finite),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().and_then(finite)
        }
        _ => None,
    }
}

//! Numeric coercion applied at every input boundary.
//!
//! Bad input never blocks an edit: anything that does not read as a finite number becomes 0.

use serde_json::Value;

/// Parses free-form cell input as a number, falling back to `0.0`.
///
/// Surrounding whitespace is ignored and an empty string is zero. Non-finite results
/// (`inf`, `NaN`, overflow) are treated as unparsable.
pub fn to_number_or_zero(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => finite_or_zero(value),
        Err(_) => {
            tracing::debug!(input = trimmed, "non-numeric input coerced to 0");
            0.0
        }
    }
}

/// JSON flavour of [`to_number_or_zero`] used when reading persisted rows.
///
/// Numbers pass through, numeric strings are parsed, booleans count as 1/0 and everything else
/// (null, arrays, objects) is zero.
pub fn value_to_number_or_zero(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().map(finite_or_zero).unwrap_or(0.0),
        Value::String(text) => to_number_or_zero(text),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

/// Maps NaN, the infinities and negative zero onto `0.0`.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

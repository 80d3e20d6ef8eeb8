//! Lenient numeric coercion for loosely-typed form input.
//!
//! Form payloads carry numbers as JSON numbers, numeric strings, empty strings or
//! nothing at all. None of these helpers ever fail: unusable input becomes `0.0`
//! (or `None` for optional measurements).

use serde_json::Value;

/// Render a JSON scalar as the text a user would have typed.
///
/// `null` becomes the empty string; numbers keep their JSON spelling.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Coerce a quantity/weight field to `f64`.
///
/// Falsy values (null, empty string, `false`) and unparseable text become `0.0`.
pub fn lenient_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(true) => Some(1.0),
        _ => None,
    };
    finite_or_zero(parsed)
}

/// Coerce an optional measurement (length/width/height).
///
/// Missing, empty and unparseable values are `None`.
pub fn optional_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Coerce a monetary field, stripping formatting noise from text.
///
/// Text keeps only ASCII digits, `.` and `-` before parsing, so `"₹ 1,250.50"`
/// reads as `1250.5`. Text that still does not parse (e.g. `"1.2.3"`, `"5-"`)
/// becomes `0.0`.
pub fn sanitized_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    finite_or_zero(parsed)
}

/// Round to two decimal places, ties to even (`11.25 / 90` gives `0.12`).
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round_ties_even() / 100.0;
    // Avoid printing "-0.00".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Format with exactly two decimals.
pub fn format2(value: f64) -> String {
    format!("{:.2}", round2(value))
}

fn finite_or_zero(parsed: Option<f64>) -> f64 {
    match parsed {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

//! Pure helpers for extracting typed parameters from a `serde_json::Value`.
//!
//! Each helper takes a JSON value, a key name, and a default. A missing key
//! or a value of the wrong type yields the default, so parsing never fails;
//! range checks happen afterwards in each component's `validate`.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only non-negative integers are accepted.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Builds one entry of a parameter schema object.
pub fn schema_entry(kind: &str, default: Value, min: f64, max: f64, description: &str) -> Value {
    serde_json::json!({
        "type": kind,
        "default": default,
        "min": min,
        "max": max,
        "description": description,
    })
}

//! Lenient extraction of typed values from `serde_json::Value` objects.
//!
//! Gradient specs arrive as loosely-typed JSON from the editor UI and the CLI.
//! Each helper takes a JSON value, a key name, and a default; a missing key or
//! a value of the wrong type yields the default. These never fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a string slice from `params[name]`, returning `default` if missing or wrong type.
pub fn param_str<'a>(params: &'a Value, name: &str, default: &'a str) -> &'a str {
    params.get(name).and_then(Value::as_str).unwrap_or(default)
}

/// Extracts the elements of the array at `params[name]`, or an empty slice.
pub fn param_array<'a>(params: &'a Value, name: &str) -> &'a [Value] {
    params
        .get(name)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

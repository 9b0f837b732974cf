//! JSON body shaping module
//!
//! Renders JSON with a 4-space indent and unwraps single-element arrays
//! returned by the remote library. Output follows browser `JSON.stringify`
//! key order and number printing.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value};

const INDENT: &[u8] = b"    ";

/// Largest magnitude below which an integral float fits an `i64`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Serialize `value` as pretty JSON indented by 4 spaces
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let value = script_order(serde_json::to_value(value)?);
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Reshape a value the way a browser engine enumerates and prints it
///
/// Object keys that are array indices come first in ascending order, the
/// rest keep insertion order. Floats without a fractional part print as
/// integers.
fn script_order(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(script_order).collect()),
        Value::Object(map) => {
            let (mut indexed, named): (Vec<_>, Vec<_>) =
                map.into_iter().partition(|(key, _)| array_index(key).is_some());
            indexed.sort_by_key(|(key, _)| array_index(key));
            Value::Object(
                indexed
                    .into_iter()
                    .chain(named)
                    .map(|(key, v)| (key, script_order(v)))
                    .collect::<Map<_, _>>(),
            )
        }
        Value::Number(n) => integral_float(&n).unwrap_or(Value::Number(n)),
        other => other,
    }
}

/// Canonical array index (`0` to `2^32 - 2`, no sign or leading zeros)
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|&i| i != u32::MAX)
}

fn integral_float(n: &Number) -> Option<Value> {
    if !n.is_f64() {
        return None;
    }
    let f = n.as_f64()?;
    if f.fract() != 0.0 || f.abs() >= I64_BOUND {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(Value::from(f as i64))
}

/// Unwrap a single-element array into its element, leave anything else as is
pub fn unwrap_single(value: Value) -> Value {
    match value {
        Value::Array(mut items) if items.len() == 1 => items.pop().unwrap_or(Value::Null),
        other => other,
    }
}

/// Bracket-strip a parsed library response and render it for the envelope body
///
/// Falls back to the compact rendering if pretty serialization fails.
pub fn strip_outer_brackets(value: Value) -> String {
    let value = unwrap_single(value);
    to_pretty_json(&value).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to render library response: {e}"));
        value.to_string()
    })
}

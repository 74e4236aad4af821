//! Total ordering across every value kind
//!
//! Ordering rules:
//! - Different kinds: absent < null < boolean < number < string < array < object
//! - Objects always tie
//! - Arrays compare by their joined string form (`[1,[2]]` reads as "1,2")
//! - Everything else uses native ordering; strings by UTF-16 code units

use std::cmp::Ordering;

use crate::value::{compare_strings, primitive_ordering, Value};

/// Compares two values under the dialect's total order
pub fn total_order_compare(a: &Value, b: &Value) -> Ordering {
    let (a_kind, b_kind) = (a.kind(), b.kind());
    if a_kind != b_kind {
        return a_kind.cmp(&b_kind);
    }

    match (a, b) {
        (Value::Object(_), Value::Object(_)) => Ordering::Equal,
        (Value::Array(_), Value::Array(_)) => compare_strings(&join_form(a), &join_form(b)),
        (Value::Absent, Value::Absent) => Ordering::Equal,
        (Value::Number(x), Value::Number(y)) => x
            .partial_cmp(y)
            .unwrap_or_else(|| x.is_nan().cmp(&y.is_nan())),
        _ => primitive_ordering(a, b).unwrap_or(Ordering::Equal),
    }
}

/// String form used when arrays are ordered: elements joined by commas,
/// null and absent as empty, objects as `[object Object]`
fn join_form(value: &Value) -> String {
    match value {
        Value::Absent | Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_form(*n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(join_form).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest round-trip digits; exponent form below 1e-6 and from 1e21 up,
/// with an explicit `+` on positive exponents
fn number_form(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() < 1e-6 || n.abs() >= 1e21 {
        let form = format!("{:e}", n);
        match form.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => form,
        }
    } else {
        n.to_string()
    }
}

//! Output sanitization

use super::value::Value;

/// Removes every *absent* value from a result.
///
/// Object entries holding *absent* are dropped and arrays are compacted, so
/// `[1, absent, null]` becomes `[1, null]`. Explicit nulls always survive.
/// Only applied to final output, never to values still being compared.
pub fn sanitize_for_output(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_absent())
                .map(sanitize_for_output)
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .filter(|(_, v)| !v.is_absent())
                .map(|(k, v)| (k, sanitize_for_output(v)))
                .collect(),
        ),
        other => other,
    }
}

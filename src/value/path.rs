//! Field path resolution

use super::value::Value;

static ABSENT: Value = Value::Absent;

/// Walks `path` through nested objects and arrays.
///
/// Arrays are indexed by canonical decimal keys (`"0"`, `"12"`). Resolution
/// stops with *absent* as soon as a step lands on something that is not
/// indexable or the key is missing; it never fails.
pub fn resolve_path<'a, S: AsRef<str>>(doc: &'a Value, path: &[S]) -> &'a Value {
    let mut current = doc;
    for key in path {
        current = match step(current, key.as_ref()) {
            Some(next) => next,
            None => return &ABSENT,
        };
    }
    current
}

fn step<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(_) => value.get(key),
        Value::Array(items) => array_index(key).and_then(|i| items.get(i)),
        _ => None,
    }
}

fn array_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    // "01" and "+1" are property names, not indexes
    (index.to_string() == key).then_some(index)
}

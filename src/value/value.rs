//! The engine's datum: JSON plus an explicit *absent* kind
//!
//! Documents enter as `serde_json::Value` and are converted once. Every
//! operator in this crate matches exhaustively over [`Value`], so adding a
//! kind is a compile error everywhere it matters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven value kinds, declared in their total order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Field or key not present
    Absent,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Returns the kind name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Absent => "undefined",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recursive, untyped datum.
///
/// Objects keep their entries in insertion order. Lookups are linear, which
/// is fine for document-sized maps. The serde representation is externally
/// tagged so that *absent* survives a round trip through continuation tokens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Absent,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Classifies the value into its kind
    pub fn kind(&self) -> Kind {
        match self {
            Value::Absent => Kind::Absent,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up an object key. Non-objects and missing keys yield `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Inserts or replaces an object entry, keeping the original position of
    /// a replaced key. No-op on non-objects.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        if let Value::Object(entries) = self {
            let key = key.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => *slot = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// JavaScript-style truthiness; used to decide whether a row identifier
    /// is usable.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Converts to JSON for output.
    ///
    /// Top-level *absent* yields `None`. Nested *absent* object entries are
    /// dropped and nested *absent* array entries become `null`; callers that
    /// need array compaction run [`super::sanitize_for_output`] first.
    /// Integral numbers are emitted as integers, non-finite ones as `null`.
    pub fn into_json(self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;

        match self {
            Value::Absent => None,
            Value::Null => Some(Json::Null),
            Value::Bool(b) => Some(Json::Bool(b)),
            Value::Number(n) => Some(number_to_json(n)),
            Value::String(s) => Some(Json::String(s)),
            Value::Array(items) => Some(Json::Array(
                items
                    .into_iter()
                    .map(|v| v.into_json().unwrap_or(Json::Null))
                    .collect(),
            )),
            Value::Object(entries) => Some(Json::Object(
                entries
                    .into_iter()
                    .filter_map(|(k, v)| v.into_json().map(|v| (k, v)))
                    .collect(),
            )),
        }
    }
}

/// Largest integer a double represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_to_json(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from(json.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_order() {
        assert!(Kind::Absent < Kind::Null);
        assert!(Kind::Null < Kind::Boolean);
        assert!(Kind::Boolean < Kind::Number);
        assert!(Kind::Number < Kind::String);
        assert!(Kind::String < Kind::Array);
        assert!(Kind::Array < Kind::Object);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Value::Absent.kind(), Kind::Absent);
        assert_eq!(Value::from(json!(null)).kind(), Kind::Null);
        assert_eq!(Value::from(json!(true)).kind(), Kind::Boolean);
        assert_eq!(Value::from(json!(1.5)).kind(), Kind::Number);
        assert_eq!(Value::from(json!("x")).kind(), Kind::String);
        assert_eq!(Value::from(json!([1])).kind(), Kind::Array);
        assert_eq!(Value::from(json!({"a": 1})).kind(), Kind::Object);
    }

    #[test]
    fn test_json_integers_stay_integers() {
        let v = Value::from(json!({"a": 1, "b": 2.5, "c": [3]}));
        assert_eq!(v.into_json(), Some(json!({"a": 1, "b": 2.5, "c": [3]})));
    }

    #[test]
    fn test_non_finite_becomes_null() {
        assert_eq!(Value::Number(f64::INFINITY).into_json(), Some(json!(null)));
        assert_eq!(Value::Number(f64::NAN).into_json(), Some(json!(null)));
    }

    #[test]
    fn test_absent_into_json() {
        assert_eq!(Value::Absent.into_json(), None);
        let obj = Value::Object(vec![("a".into(), Value::Absent), ("b".into(), Value::Null)]);
        assert_eq!(obj.into_json(), Some(json!({"b": null})));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut v = Value::from(json!({"a": 1, "b": 2}));
        v.insert("a", Value::from(3));
        v.insert("c", Value::from(4));
        assert_eq!(v.into_json(), Some(json!({"a": 3, "b": 2, "c": 4})));
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Absent.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(Value::from("rid").is_truthy());
        assert!(Value::from(7).is_truthy());
    }
}

//! Three-valued (Kleene) logic
//!
//! Any operand that is not a boolean counts as *unknown*. Filters keep a row
//! only when the predicate is [`Truth::True`].

use super::value::Value;

/// Outcome of a logical or comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truth {
    True,
    False,
    Unknown,
}

impl Truth {
    /// Reads a value as a truth: booleans map directly, everything else is
    /// unknown
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(true) => Truth::True,
            Value::Bool(false) => Truth::False,
            _ => Truth::Unknown,
        }
    }

    pub fn is_true(self) -> bool {
        self == Truth::True
    }

    pub fn is_unknown(self) -> bool {
        self == Truth::Unknown
    }

    /// Converts back to a value; unknown becomes *absent*
    pub fn into_value(self) -> Value {
        match self {
            Truth::True => Value::Bool(true),
            Truth::False => Value::Bool(false),
            Truth::Unknown => Value::Absent,
        }
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl From<Truth> for Value {
    fn from(t: Truth) -> Self {
        t.into_value()
    }
}

/// Logical AND: false dominates, then unknown
pub fn and(a: &Value, b: &Value) -> Truth {
    match (Truth::of(a), Truth::of(b)) {
        (Truth::False, _) | (_, Truth::False) => Truth::False,
        (Truth::True, Truth::True) => Truth::True,
        _ => Truth::Unknown,
    }
}

/// Logical OR: true dominates, then unknown
pub fn or(a: &Value, b: &Value) -> Truth {
    match (Truth::of(a), Truth::of(b)) {
        (Truth::True, _) | (_, Truth::True) => Truth::True,
        (Truth::False, Truth::False) => Truth::False,
        _ => Truth::Unknown,
    }
}

/// Logical NOT: unknown stays unknown
pub fn not(v: &Value) -> Truth {
    match Truth::of(v) {
        Truth::True => Truth::False,
        Truth::False => Truth::True,
        Truth::Unknown => Truth::Unknown,
    }
}

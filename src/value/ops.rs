//! Equality, comparison, arithmetic and concatenation over [`Value`]
//!
//! Kind mismatches never fail: they yield [`Truth::Unknown`] or
//! [`Value::Absent`]. The only error is an operator string outside the
//! supported set, which is a defect in whatever produced the operator.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::QueryError;

use super::truth::Truth;
use super::value::{Kind, Value};

/// Relational comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    fn accepts(&self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (_, None) => false,
            (CompareOp::Lt, Some(o)) => o == Ordering::Less,
            (CompareOp::Le, Some(o)) => o != Ordering::Greater,
            (CompareOp::Gt, Some(o)) => o == Ordering::Greater,
            (CompareOp::Ge, Some(o)) => o != Ordering::Less,
        }
    }
}

impl FromStr for CompareOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Le),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Ge),
            other => Err(QueryError::unsupported_operator(other)),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary numeric operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitOr,
    BitAnd,
    BitXor,
    Shl,
    Shr,
    /// Unsigned (zero-fill) right shift
    UShr,
}

impl ArithmeticOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
            ArithmeticOp::Rem => "%",
            ArithmeticOp::BitOr => "|",
            ArithmeticOp::BitAnd => "&",
            ArithmeticOp::BitXor => "^",
            ArithmeticOp::Shl => "<<",
            ArithmeticOp::Shr => ">>",
            ArithmeticOp::UShr => ">>>",
        }
    }
}

impl FromStr for ArithmeticOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(ArithmeticOp::Add),
            "-" => Ok(ArithmeticOp::Sub),
            "*" => Ok(ArithmeticOp::Mul),
            "/" => Ok(ArithmeticOp::Div),
            "%" => Ok(ArithmeticOp::Rem),
            "|" => Ok(ArithmeticOp::BitOr),
            "&" => Ok(ArithmeticOp::BitAnd),
            "^" => Ok(ArithmeticOp::BitXor),
            "<<" => Ok(ArithmeticOp::Shl),
            ">>" => Ok(ArithmeticOp::Shr),
            ">>>" => Ok(ArithmeticOp::UShr),
            other => Err(QueryError::unsupported_operator(other)),
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary numeric operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    BitNot,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::BitNot => "~",
        }
    }
}

impl FromStr for UnaryOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(UnaryOp::Plus),
            "-" => Ok(UnaryOp::Minus),
            "~" => Ok(UnaryOp::BitNot),
            other => Err(QueryError::unsupported_operator(other)),
        }
    }
}

/// True iff both values have the same kind and that kind is not *absent*
pub fn types_match(a: &Value, b: &Value) -> bool {
    let kind = a.kind();
    kind == b.kind() && kind != Kind::Absent
}

/// Structural equality.
///
/// Objects are equal when they have the same entry count and every key of
/// `a` maps to an equal value in `b`, where a missing key reads as absent.
/// Keys of `b` are never looked up in `a`. This one-directional check is
/// inherited behaviour and must stay.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, v)| deep_equal(v, b.get(k).unwrap_or(&Value::Absent)))
        }
        (Value::Absent, Value::Absent) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        _ => false,
    }
}

/// Equality: unknown if either side is absent, false on kind mismatch
pub fn equal(a: &Value, b: &Value) -> Truth {
    if a.is_absent() || b.is_absent() {
        return Truth::Unknown;
    }
    if !types_match(a, b) {
        return Truth::False;
    }
    Truth::from(deep_equal(a, b))
}

/// Negated [`equal`], preserving unknown
pub fn not_equal(a: &Value, b: &Value) -> Truth {
    match equal(a, b) {
        Truth::True => Truth::False,
        Truth::False => Truth::True,
        Truth::Unknown => Truth::Unknown,
    }
}

/// Native ordering between two primitives of the same kind.
///
/// `None` when the pair is unordered (NaN, composite values, kind mismatch).
pub(crate) fn primitive_ordering(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y),
        (Value::String(x), Value::String(y)) => Some(compare_strings(x, y)),
        _ => None,
    }
}

/// Strings order by UTF-16 code units, matching the emulated dialect
pub(crate) fn compare_strings(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Relational comparison; unknown on kind mismatch or composite operands
pub fn compare(op: CompareOp, a: &Value, b: &Value) -> Truth {
    if !types_match(a, b) {
        return Truth::Unknown;
    }
    if matches!(a.kind(), Kind::Array | Kind::Object) {
        return Truth::Unknown;
    }
    Truth::from(op.accepts(primitive_ordering(a, b)))
}

/// ECMAScript ToInt32
pub fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}

/// ECMAScript ToUint32
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// Binary arithmetic; absent unless both operands are numbers.
///
/// Bitwise operators work on 32-bit integer truncations regardless of host.
pub fn arithmetic(op: ArithmeticOp, a: &Value, b: &Value) -> Value {
    let (x, y) = match (a, b) {
        (Value::Number(x), Value::Number(y)) => (*x, *y),
        _ => return Value::Absent,
    };

    let shift = to_uint32(y) & 31;
    let n = match op {
        ArithmeticOp::Add => x + y,
        ArithmeticOp::Sub => x - y,
        ArithmeticOp::Mul => x * y,
        ArithmeticOp::Div => x / y,
        ArithmeticOp::Rem => x % y,
        ArithmeticOp::BitOr => f64::from(to_int32(x) | to_int32(y)),
        ArithmeticOp::BitAnd => f64::from(to_int32(x) & to_int32(y)),
        ArithmeticOp::BitXor => f64::from(to_int32(x) ^ to_int32(y)),
        ArithmeticOp::Shl => f64::from(to_int32(x).wrapping_shl(shift)),
        ArithmeticOp::Shr => f64::from(to_int32(x) >> shift),
        ArithmeticOp::UShr => f64::from(to_uint32(x) >> shift),
    };
    Value::Number(n)
}

/// Unary arithmetic; absent unless the operand is a number
pub fn unary_arithmetic(op: UnaryOp, v: &Value) -> Value {
    match v {
        Value::Number(n) => Value::Number(match op {
            UnaryOp::Plus => *n,
            UnaryOp::Minus => -*n,
            UnaryOp::BitNot => f64::from(!to_int32(*n)),
        }),
        _ => Value::Absent,
    }
}

/// String concatenation; absent unless both operands are strings
pub fn concat(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Value::String(format!("{}{}", x, y)),
        _ => Value::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_compare_mixed_kinds_unknown() {
        assert_eq!(compare(CompareOp::Lt, &v(json!(1)), &v(json!("x"))), Truth::Unknown);
        assert_eq!(compare(CompareOp::Ge, &Value::Null, &v(json!(0))), Truth::Unknown);
        assert_eq!(compare(CompareOp::Gt, &Value::Absent, &Value::Absent), Truth::Unknown);
    }

    #[test]
    fn test_compare_composites_unknown() {
        assert_eq!(compare(CompareOp::Lt, &v(json!([1])), &v(json!([2]))), Truth::Unknown);
        assert_eq!(compare(CompareOp::Le, &v(json!({})), &v(json!({}))), Truth::Unknown);
    }

    #[test]
    fn test_compare_primitives() {
        assert_eq!(compare(CompareOp::Lt, &v(json!(1)), &v(json!(2))), Truth::True);
        assert_eq!(compare(CompareOp::Ge, &v(json!(2)), &v(json!(2))), Truth::True);
        assert_eq!(compare(CompareOp::Gt, &v(json!("a")), &v(json!("b"))), Truth::False);
        assert_eq!(compare(CompareOp::Gt, &v(json!(true)), &v(json!(false))), Truth::True);
        assert_eq!(compare(CompareOp::Le, &Value::Null, &Value::Null), Truth::True);
        assert_eq!(compare(CompareOp::Lt, &Value::Null, &Value::Null), Truth::False);
    }

    #[test]
    fn test_compare_nan_is_false() {
        let nan = Value::Number(f64::NAN);
        assert_eq!(compare(CompareOp::Lt, &nan, &v(json!(1))), Truth::False);
        assert_eq!(compare(CompareOp::Ge, &nan, &nan), Truth::False);
    }

    #[test]
    fn test_utf16_string_order() {
        // U+FF61 sorts after U+1F600 in code points but before it in UTF-16
        assert_eq!(compare_strings("\u{1F600}", "\u{FF61}"), Ordering::Less);
    }

    #[test]
    fn test_equal() {
        assert_eq!(equal(&v(json!(1)), &v(json!(1))), Truth::True);
        assert_eq!(equal(&v(json!(1)), &v(json!("1"))), Truth::False);
        assert_eq!(equal(&Value::Absent, &v(json!(5))), Truth::Unknown);
        assert_eq!(equal(&v(json!(null)), &v(json!(null))), Truth::True);
        assert_eq!(not_equal(&Value::Absent, &v(json!(5))), Truth::Unknown);
        assert_eq!(not_equal(&v(json!(1)), &v(json!(2))), Truth::True);
    }

    #[test]
    fn test_deep_equal_structures() {
        assert!(deep_equal(&v(json!([1, [2, 3]])), &v(json!([1, [2, 3]]))));
        assert!(!deep_equal(&v(json!([1, 2])), &v(json!([1]))));
        assert!(deep_equal(&v(json!({"a": 1, "b": 2})), &v(json!({"b": 2, "a": 1}))));
        assert!(!deep_equal(&v(json!({"a": 1})), &v(json!({"a": 1, "b": 2}))));
    }

    #[test]
    fn test_deep_equal_one_directional_key_check() {
        // Inherited: only keys of the left object are looked up in the right
        let left = Value::Object(vec![("x".into(), Value::Absent), ("y".into(), Value::from(1))]);
        let right = v(json!({"y": 1, "z": 2}));
        assert!(deep_equal(&left, &right));
        assert!(!deep_equal(&right, &left));
    }

    #[test]
    fn test_arithmetic_requires_numbers() {
        for op in ["+", "-", "*", "/", "%", "|", "&", "^", "<<", ">>", ">>>"] {
            let op: ArithmeticOp = op.parse().unwrap();
            assert_eq!(arithmetic(op, &v(json!(1)), &v(json!("2"))), Value::Absent);
            assert_eq!(arithmetic(op, &Value::Absent, &v(json!(2))), Value::Absent);
        }
    }

    #[test]
    fn test_arithmetic_values() {
        assert_eq!(arithmetic(ArithmeticOp::Add, &v(json!(1)), &v(json!(2))), Value::Number(3.0));
        assert_eq!(arithmetic(ArithmeticOp::Rem, &v(json!(-7)), &v(json!(3))), Value::Number(-1.0));
        assert_eq!(arithmetic(ArithmeticOp::Div, &v(json!(1)), &v(json!(4))), Value::Number(0.25));
    }

    #[test]
    fn test_bitwise_32bit_semantics() {
        assert_eq!(
            arithmetic(ArithmeticOp::Shl, &v(json!(1)), &v(json!(31))),
            Value::Number(-2147483648.0)
        );
        assert_eq!(
            arithmetic(ArithmeticOp::Shl, &v(json!(1)), &v(json!(32))),
            Value::Number(1.0)
        );
        assert_eq!(
            arithmetic(ArithmeticOp::Shr, &v(json!(-8)), &v(json!(1))),
            Value::Number(-4.0)
        );
        assert_eq!(
            arithmetic(ArithmeticOp::UShr, &v(json!(-1)), &v(json!(0))),
            Value::Number(4294967295.0)
        );
        assert_eq!(
            arithmetic(ArithmeticOp::BitOr, &v(json!(4294967297.0)), &v(json!(0))),
            Value::Number(1.0)
        );
        assert_eq!(
            arithmetic(ArithmeticOp::BitAnd, &v(json!(5.9)), &v(json!(3))),
            Value::Number(1.0)
        );
    }

    #[test]
    fn test_unary() {
        assert_eq!(unary_arithmetic(UnaryOp::Minus, &v(json!(3))), Value::Number(-3.0));
        assert_eq!(unary_arithmetic(UnaryOp::BitNot, &v(json!(5))), Value::Number(-6.0));
        assert_eq!(unary_arithmetic(UnaryOp::Plus, &v(json!("3"))), Value::Absent);
    }

    #[test]
    fn test_unsupported_operator_is_fatal() {
        let err = "**".parse::<ArithmeticOp>().unwrap_err();
        assert!(err.is_fatal());
        assert!("==".parse::<CompareOp>().is_err());
        assert!("!".parse::<UnaryOp>().is_err());
    }

    #[test]
    fn test_concat() {
        assert_eq!(concat(&v(json!("a")), &v(json!("b"))), Value::from("ab"));
        assert_eq!(concat(&v(json!("a")), &v(json!(1))), Value::Absent);
    }
}

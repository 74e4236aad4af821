//! Built-in and user-defined functions
//!
//! Built-ins follow the value rules: an argument of the wrong kind yields
//! *absent*, never an error.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{equal, Kind, Value};

/// A host-supplied function callable as `udf.name(...)`
pub type UserFunction = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Registered user-defined functions by name
#[derive(Clone, Default)]
pub struct UserFunctions {
    functions: HashMap<String, UserFunction>,
}

impl UserFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` under `name`, replacing any previous one
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
    }

    pub fn with<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.register(name, function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&UserFunction> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for UserFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("UserFunctions").field("names", &names).finish()
    }
}

/// Built-in scalar functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    IsDefined,
    IsNull,
    IsBool,
    IsNumber,
    IsString,
    IsArray,
    IsObject,
    IsPrimitive,
    Abs,
    Floor,
    Ceiling,
    Concat,
    Contains,
    StartsWith,
    EndsWith,
    Lower,
    Upper,
    Length,
    ArrayLength,
    ArrayContains,
}

impl Builtin {
    /// Looks up a built-in by its upper-case name
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "IS_DEFINED" => Builtin::IsDefined,
            "IS_NULL" => Builtin::IsNull,
            "IS_BOOL" => Builtin::IsBool,
            "IS_NUMBER" => Builtin::IsNumber,
            "IS_STRING" => Builtin::IsString,
            "IS_ARRAY" => Builtin::IsArray,
            "IS_OBJECT" => Builtin::IsObject,
            "IS_PRIMITIVE" => Builtin::IsPrimitive,
            "ABS" => Builtin::Abs,
            "FLOOR" => Builtin::Floor,
            "CEILING" => Builtin::Ceiling,
            "CONCAT" => Builtin::Concat,
            "CONTAINS" => Builtin::Contains,
            "STARTSWITH" => Builtin::StartsWith,
            "ENDSWITH" => Builtin::EndsWith,
            "LOWER" => Builtin::Lower,
            "UPPER" => Builtin::Upper,
            "LENGTH" => Builtin::Length,
            "ARRAY_LENGTH" => Builtin::ArrayLength,
            "ARRAY_CONTAINS" => Builtin::ArrayContains,
            _ => return None,
        };
        Some(builtin)
    }

    /// Returns whether the function takes `count` arguments
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Builtin::Concat => count >= 2,
            Builtin::Contains
            | Builtin::StartsWith
            | Builtin::EndsWith
            | Builtin::ArrayContains => count == 2,
            _ => count == 1,
        }
    }

    /// Applies the function; arity has already been checked
    pub fn call(&self, args: &[Value]) -> Value {
        let first = args.first().unwrap_or(&Value::Absent);
        let second = args.get(1).unwrap_or(&Value::Absent);
        match self {
            Builtin::IsDefined => Value::Bool(!first.is_absent()),
            Builtin::IsNull => Value::Bool(first.kind() == Kind::Null),
            Builtin::IsBool => Value::Bool(first.kind() == Kind::Boolean),
            Builtin::IsNumber => Value::Bool(first.kind() == Kind::Number),
            Builtin::IsString => Value::Bool(first.kind() == Kind::String),
            Builtin::IsArray => Value::Bool(first.kind() == Kind::Array),
            Builtin::IsObject => Value::Bool(first.kind() == Kind::Object),
            Builtin::IsPrimitive => Value::Bool(matches!(
                first.kind(),
                Kind::Null | Kind::Boolean | Kind::Number | Kind::String
            )),
            Builtin::Abs => numeric(first, f64::abs),
            Builtin::Floor => numeric(first, f64::floor),
            Builtin::Ceiling => numeric(first, f64::ceil),
            Builtin::Concat => {
                let mut out = String::new();
                for arg in args {
                    match arg {
                        Value::String(s) => out.push_str(s),
                        _ => return Value::Absent,
                    }
                }
                Value::String(out)
            }
            Builtin::Contains => strings(first, second, |a, b| a.contains(b)),
            Builtin::StartsWith => strings(first, second, |a, b| a.starts_with(b)),
            Builtin::EndsWith => strings(first, second, |a, b| a.ends_with(b)),
            Builtin::Lower => match first {
                Value::String(s) => Value::String(s.to_lowercase()),
                _ => Value::Absent,
            },
            Builtin::Upper => match first {
                Value::String(s) => Value::String(s.to_uppercase()),
                _ => Value::Absent,
            },
            Builtin::Length => match first {
                Value::String(s) => Value::Number(s.encode_utf16().count() as f64),
                _ => Value::Absent,
            },
            Builtin::ArrayLength => match first {
                Value::Array(items) => Value::Number(items.len() as f64),
                _ => Value::Absent,
            },
            Builtin::ArrayContains => match first {
                Value::Array(items) => {
                    Value::Bool(items.iter().any(|item| equal(item, second).is_true()))
                }
                _ => Value::Absent,
            },
        }
    }
}

fn numeric(v: &Value, f: impl Fn(f64) -> f64) -> Value {
    match v {
        Value::Number(n) => Value::Number(f(*n)),
        _ => Value::Absent,
    }
}

fn strings(a: &Value, b: &Value, f: impl Fn(&str, &str) -> bool) -> Value {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Value::Bool(f(a, b)),
        _ => Value::Absent,
    }
}

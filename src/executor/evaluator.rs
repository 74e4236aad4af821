//! Tree-walking expression evaluator
//!
//! Evaluation never fails on data. The only error is a call to a
//! user-defined function that was not registered.

use crate::errors::{QueryError, QueryResult};
use crate::planner::{number_key, BinaryOperator, Expr, UnaryOperator};
use crate::value::{
    and, arithmetic, compare, concat, equal, not, not_equal, or, resolve_path, unary_arithmetic,
    CompareOp, Truth, Value,
};

use super::functions::{Builtin, UserFunctions};

/// Evaluates expressions against one document
pub struct Evaluator<'a> {
    document: &'a Value,
    parameters: &'a [(String, Value)],
    functions: &'a UserFunctions,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        document: &'a Value,
        parameters: &'a [(String, Value)],
        functions: &'a UserFunctions,
    ) -> Self {
        Self {
            document,
            parameters,
            functions,
        }
    }

    /// Evaluates a predicate; only `true` keeps the row
    pub fn test(&self, expr: &Expr) -> QueryResult<bool> {
        Ok(Truth::of(&self.eval(expr)?).is_true())
    }

    pub fn eval(&self, expr: &Expr) -> QueryResult<Value> {
        let value = match expr {
            Expr::Literal(v) => v.clone(),
            Expr::Parameter(name) => self
                .parameters
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_default(),
            // lowering guarantees the only identifier is the FROM binding
            Expr::Identifier(_) => self.document.clone(),
            Expr::Property { object, key } => {
                if let Some((_, path)) = expr.as_path() {
                    return Ok(resolve_path(self.document, &path).clone());
                }
                let object = self.eval(object)?;
                match self.eval(key)? {
                    Value::String(k) => resolve_path(&object, &[k]).clone(),
                    Value::Number(n) => resolve_path(&object, &[number_key(n)]).clone(),
                    _ => Value::Absent,
                }
            }
            Expr::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|e| self.eval(e))
                    .collect::<QueryResult<_>>()?,
            ),
            Expr::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, e)| self.eval(e).map(|v| (k.clone(), v)))
                    .collect::<QueryResult<_>>()?,
            ),
            Expr::Unary { op, operand } => {
                let v = self.eval(operand)?;
                match op {
                    UnaryOperator::Not => not(&v).into_value(),
                    UnaryOperator::Arithmetic(op) => unary_arithmetic(*op, &v),
                }
            }
            Expr::Binary { op, left, right } => {
                let a = self.eval(left)?;
                let b = self.eval(right)?;
                match op {
                    BinaryOperator::And => and(&a, &b).into_value(),
                    BinaryOperator::Or => or(&a, &b).into_value(),
                    BinaryOperator::Eq => equal(&a, &b).into_value(),
                    BinaryOperator::Ne => not_equal(&a, &b).into_value(),
                    BinaryOperator::Compare(op) => compare(*op, &a, &b).into_value(),
                    BinaryOperator::Arithmetic(op) => arithmetic(*op, &a, &b),
                    BinaryOperator::Concat => concat(&a, &b),
                    BinaryOperator::Coalesce => {
                        if a.is_absent() {
                            b
                        } else {
                            a
                        }
                    }
                }
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.test(test)? {
                    self.eval(consequent)?
                } else {
                    self.eval(alternate)?
                }
            }
            Expr::In { needle, list } => {
                let needle = self.eval(needle)?;
                if needle.is_absent() {
                    return Ok(Value::Absent);
                }
                let mut found = false;
                for item in list {
                    if equal(&needle, &self.eval(item)?).is_true() {
                        found = true;
                        break;
                    }
                }
                Value::Bool(found)
            }
            Expr::Between { value, low, high } => {
                let v = self.eval(value)?;
                let low = compare(CompareOp::Ge, &v, &self.eval(low)?).into_value();
                let high = compare(CompareOp::Le, &v, &self.eval(high)?).into_value();
                and(&low, &high).into_value()
            }
            Expr::Call { name, args, udf } => {
                let args = args
                    .iter()
                    .map(|e| self.eval(e))
                    .collect::<QueryResult<Vec<_>>>()?;
                if *udf {
                    match self.functions.get(name) {
                        Some(function) => function(&args),
                        None => return Err(QueryError::unknown_function(name)),
                    }
                } else {
                    match Builtin::from_name(name) {
                        Some(builtin) => builtin.call(&args),
                        None => return Err(QueryError::unknown_function(name)),
                    }
                }
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QueryErrorCode;
    use crate::planner::{parse, Selection};
    use serde_json::json;

    fn eval_with(doc: serde_json::Value, expr: &str, functions: &UserFunctions) -> QueryResult<Value> {
        let query = parse(&format!("SELECT VALUE {} FROM c", expr)).unwrap();
        let expr = match query.selection {
            Selection::Value(expr) => expr,
            other => panic!("unexpected selection {:?}", other),
        };
        let doc = Value::from(doc);
        let parameters = vec![("@p".to_string(), Value::from(5))];
        Evaluator::new(&doc, &parameters, functions).eval(&expr)
    }

    fn eval(doc: serde_json::Value, expr: &str) -> Value {
        eval_with(doc, expr, &UserFunctions::new()).unwrap()
    }

    #[test]
    fn test_property_access() {
        let doc = json!({"a": {"b": [10, 20]}, "k": "a"});
        assert_eq!(eval(doc.clone(), "c.a.b[1]"), Value::from(20));
        assert_eq!(eval(doc.clone(), "c[\"a\"].b[0]"), Value::from(10));
        assert_eq!(eval(doc.clone(), "c[c.k].b[0]"), Value::from(10));
        assert_eq!(eval(doc.clone(), "c.missing.deep"), Value::Absent);
        assert_eq!(eval(doc, "c[true]"), Value::Absent);
    }

    #[test]
    fn test_parameters() {
        assert_eq!(eval(json!({}), "@p + 1"), Value::from(6));
        assert_eq!(eval(json!({}), "@missing"), Value::Absent);
    }

    #[test]
    fn test_three_valued_filter() {
        let doc = json!({"a": 1});
        assert_eq!(eval(doc.clone(), "c.a = 1"), Value::Bool(true));
        assert_eq!(eval(doc.clone(), "c.b = 1"), Value::Absent);
        assert_eq!(eval(doc.clone(), "c.b = 1 OR c.a = 1"), Value::Bool(true));
        assert_eq!(eval(doc.clone(), "c.b = 1 AND c.a = 2"), Value::Bool(false));
        assert_eq!(eval(doc, "NOT (c.b = 1)"), Value::Absent);
    }

    #[test]
    fn test_in_and_between() {
        let doc = json!({"a": 3});
        assert_eq!(eval(doc.clone(), "c.a IN (1, 2, 3)"), Value::Bool(true));
        assert_eq!(eval(doc.clone(), "c.a IN ('3')"), Value::Bool(false));
        assert_eq!(eval(doc.clone(), "c.b IN (1)"), Value::Absent);
        assert_eq!(eval(doc.clone(), "c.a BETWEEN 1 AND 3"), Value::Bool(true));
        assert_eq!(eval(doc.clone(), "c.a BETWEEN 4 AND 5"), Value::Bool(false));
        assert_eq!(eval(doc, "c.a BETWEEN 'a' AND 'z'"), Value::Absent);
    }

    #[test]
    fn test_conditional_and_coalesce() {
        let doc = json!({"a": 1, "n": null});
        assert_eq!(eval(doc.clone(), "c.a = 1 ? 'yes' : 'no'"), Value::from("yes"));
        assert_eq!(eval(doc.clone(), "c.b = 1 ? 'yes' : 'no'"), Value::from("no"));
        assert_eq!(eval(doc.clone(), "c.b ?? 'fallback'"), Value::from("fallback"));
        assert_eq!(eval(doc, "c.n ?? 'fallback'"), Value::Null);
    }

    #[test]
    fn test_arithmetic_and_concat() {
        let doc = json!({"a": 7, "s": "x"});
        assert_eq!(eval(doc.clone(), "c.a % 4 * 2"), Value::from(6));
        assert_eq!(eval(doc.clone(), "c.a >>> 1"), Value::from(3));
        assert_eq!(eval(doc.clone(), "-c.a"), Value::from(-7));
        assert_eq!(eval(doc.clone(), "c.s || 'y'"), Value::from("xy"));
        assert_eq!(eval(doc, "c.s + 1"), Value::Absent);
    }

    #[test]
    fn test_constructors_keep_absent_entries() {
        let v = eval(json!({"a": 1}), "{x: c.a, y: c.b}");
        assert_eq!(
            v,
            Value::Object(vec![
                ("x".into(), Value::from(1)),
                ("y".into(), Value::Absent),
            ])
        );
        let v = eval(json!({"a": 1}), "[c.a, c.b]");
        assert_eq!(v, Value::Array(vec![Value::from(1), Value::Absent]));
    }

    #[test]
    fn test_user_function() {
        let functions = UserFunctions::new().with("twice", |args: &[Value]| match args {
            [Value::Number(n)] => Value::Number(n * 2.0),
            _ => Value::Absent,
        });
        let v = eval_with(json!({"a": 2}), "udf.twice(c.a)", &functions).unwrap();
        assert_eq!(v, Value::from(4));
    }

    #[test]
    fn test_unregistered_user_function() {
        let err = eval_with(json!({}), "udf.nope()", &UserFunctions::new()).unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::UnknownFunction);
    }
}

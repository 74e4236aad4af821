//! Query AST
//!
//! Defines the parsed query representation produced by the parser and
//! consumed by lowering and the partition-key analyzer.

use crate::ordering::Direction;
use crate::value::{ArithmeticOp, CompareOp, UnaryOp, Value};

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Logical NOT
    Not,
    /// Numeric `+`, `-`, `~`
    Arithmetic(UnaryOp),
}

/// Infix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    And,
    Or,
    /// `=`
    Eq,
    /// `!=` or `<>`
    Ne,
    Compare(CompareOp),
    Arithmetic(ArithmeticOp),
    /// `||` string concatenation
    Concat,
    /// `??`: left unless absent
    Coalesce,
}

impl BinaryOperator {
    /// Returns the operator as written in query text
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Compare(op) => op.as_str(),
            BinaryOperator::Arithmetic(op) => op.as_str(),
            BinaryOperator::Concat => "||",
            BinaryOperator::Coalesce => "??",
        }
    }
}

/// Scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant, including `undefined` as *absent*
    Literal(Value),
    /// `@name`; the stored name keeps the `@`
    Parameter(String),
    /// Bare identifier; only the FROM alias resolves
    Identifier(String),
    /// `object.name`, `object["name"]` or `object[0]`
    Property {
        object: Box<Expr>,
        key: Box<Expr>,
    },
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Unary {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `test ? consequent : alternate`
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    /// `needle IN (list...)`
    In {
        needle: Box<Expr>,
        list: Vec<Expr>,
    },
    /// `value BETWEEN low AND high`
    Between {
        value: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// Built-in call, or `udf.name(...)` when `udf` is set
    Call {
        name: String,
        args: Vec<Expr>,
        udf: bool,
    },
}

impl Expr {
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn property(object: Expr, key: impl Into<Value>) -> Self {
        Expr::Property {
            object: Box::new(object),
            key: Box::new(Expr::Literal(key.into())),
        }
    }

    /// Height of the expression tree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((expr, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(expr.children().into_iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Literal(_) | Expr::Parameter(_) | Expr::Identifier(_) => Vec::new(),
            Expr::Property { object, key } => vec![object.as_ref(), key.as_ref()],
            Expr::Array(items) => items.iter().collect(),
            Expr::Object(entries) => entries.iter().map(|(_, value)| value).collect(),
            Expr::Unary { operand, .. } => vec![operand.as_ref()],
            Expr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => vec![test.as_ref(), consequent.as_ref(), alternate.as_ref()],
            Expr::In { needle, list } => std::iter::once(needle.as_ref()).chain(list).collect(),
            Expr::Between { value, low, high } => {
                vec![value.as_ref(), low.as_ref(), high.as_ref()]
            }
            Expr::Call { args, .. } => args.iter().collect(),
        }
    }

    /// Splits a property chain with literal keys into its root identifier and
    /// key path. Returns `None` for anything else.
    pub fn as_path(&self) -> Option<(&str, Vec<String>)> {
        match self {
            Expr::Identifier(name) => Some((name.as_str(), Vec::new())),
            Expr::Property { object, key } => {
                let (root, mut path) = object.as_path()?;
                path.push(literal_key(key)?);
                Some((root, path))
            }
            _ => None,
        }
    }
}

/// Canonical string form of a literal property key
pub(crate) fn literal_key(key: &Expr) -> Option<String> {
    match key {
        Expr::Literal(Value::String(s)) => Some(s.clone()),
        Expr::Literal(Value::Number(n)) => Some(number_key(*n)),
        _ => None,
    }
}

/// String form of a numeric property key: integers print without a fraction
pub(crate) fn number_key(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One entry of a SELECT list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    /// `AS name`
    pub alias: Option<String>,
}

/// What a query returns per row
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// `SELECT *`
    All,
    /// `SELECT VALUE expr`
    Value(Expr),
    /// `SELECT a, b AS c`
    Items(Vec<SelectItem>),
}

/// `FROM name [AS] [alias]`
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub collection: String,
    pub alias: Option<String>,
}

impl FromClause {
    /// Name by which expressions refer to the current document
    pub fn binding(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.collection)
    }
}

/// `ORDER BY expr [ASC|DESC]`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub expr: Expr,
    pub direction: Direction,
}

/// A parsed SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub top: Option<u64>,
    pub selection: Selection,
    pub from: FromClause,
    pub filter: Option<Expr>,
    pub order_by: Vec<OrderItem>,
}

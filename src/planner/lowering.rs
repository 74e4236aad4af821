//! Lowering of a parsed query into an executable procedure
//!
//! Lowering is a pure function of the AST:
//! - every identifier must be the FROM binding
//! - built-in calls must name a known function with a valid arity
//! - ORDER BY items become [`OrderClause`]s rooted at the binding
//! - SELECT items receive their output field names

use crate::errors::{QueryError, QueryResult};
use crate::executor::Builtin;
use crate::ordering::OrderClause;

use super::ast::{Expr, SelectQuery, Selection};

/// What each surviving row projects to
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The source document itself
    Document,
    /// A single expression (`SELECT VALUE`)
    Value(Expr),
    /// An object built from named fields
    Fields(Vec<(String, Expr)>),
}

/// Compiled form of a query, evaluated by the executor
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    /// Name by which expressions refer to the current document
    pub binding: String,
    pub top: Option<u64>,
    pub projection: Projection,
    pub filter: Option<Expr>,
    pub order: Vec<OrderClause>,
}

/// Lowers a parsed query
pub fn lower(query: &SelectQuery) -> QueryResult<Procedure> {
    let binding = query.from.binding().to_string();
    let resolver = Resolver { binding: &binding };

    let projection = match &query.selection {
        Selection::All => Projection::Document,
        Selection::Value(expr) => {
            resolver.check(expr)?;
            Projection::Value(expr.clone())
        }
        Selection::Items(items) => {
            let mut fields = Vec::with_capacity(items.len());
            let mut unnamed = 0;
            for item in items {
                resolver.check(&item.expr)?;
                let name = match (&item.alias, item.expr.as_path()) {
                    (Some(alias), _) => alias.clone(),
                    (None, Some((root, path))) => match path.last() {
                        Some(key) => key.clone(),
                        None => root.to_string(),
                    },
                    (None, None) => {
                        unnamed += 1;
                        format!("${}", unnamed)
                    }
                };
                fields.push((name, item.expr.clone()));
            }
            Projection::Fields(fields)
        }
    };

    if let Some(filter) = &query.filter {
        resolver.check(filter)?;
    }

    let mut order = Vec::with_capacity(query.order_by.len());
    for item in &query.order_by {
        let (root, path) = match item.expr.as_path() {
            Some((root, path)) if !path.is_empty() => (root, path),
            _ => {
                return Err(QueryError::compilation_invariant(
                    "ORDER BY item is not a property path",
                ))
            }
        };
        if root != binding {
            return Err(QueryError::unresolved_identifier(root));
        }
        order.push(OrderClause::new(path, item.direction));
    }

    Ok(Procedure {
        binding,
        top: query.top,
        projection,
        filter: query.filter.clone(),
        order,
    })
}

struct Resolver<'a> {
    binding: &'a str,
}

impl<'a> Resolver<'a> {
    fn check(&self, expr: &Expr) -> QueryResult<()> {
        match expr {
            Expr::Literal(_) | Expr::Parameter(_) => Ok(()),
            Expr::Identifier(name) => {
                if name == self.binding {
                    Ok(())
                } else {
                    Err(QueryError::unresolved_identifier(name))
                }
            }
            Expr::Property { object, key } => {
                self.check(object)?;
                self.check(key)
            }
            Expr::Array(items) => items.iter().try_for_each(|e| self.check(e)),
            Expr::Object(entries) => entries.iter().try_for_each(|(_, e)| self.check(e)),
            Expr::Unary { operand, .. } => self.check(operand),
            Expr::Binary { left, right, .. } => {
                self.check(left)?;
                self.check(right)
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.check(test)?;
                self.check(consequent)?;
                self.check(alternate)
            }
            Expr::In { needle, list } => {
                self.check(needle)?;
                list.iter().try_for_each(|e| self.check(e))
            }
            Expr::Between { value, low, high } => {
                self.check(value)?;
                self.check(low)?;
                self.check(high)
            }
            Expr::Call { name, args, udf } => {
                if !udf {
                    match Builtin::from_name(name) {
                        Some(builtin) if builtin.accepts(args.len()) => {}
                        Some(_) => return Err(QueryError::function_arity(name, args.len())),
                        None => return Err(QueryError::unknown_function(name)),
                    }
                }
                args.iter().try_for_each(|e| self.check(e))
            }
        }
    }
}

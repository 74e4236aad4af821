//! Query frontend for docquery
//!
//! Turns query text into an executable [`Procedure`]:
//!
//! 1. Tokenize and parse into a [`SelectQuery`] (syntax errors carry a
//!    position)
//! 2. Lower the AST: resolve identifiers against the FROM binding, validate
//!    built-in calls and collect ORDER BY clauses
//!
//! The partition-key analyzer works on the AST directly.

mod ast;
mod lexer;
mod lowering;
mod parser;
mod partition;

pub use ast::{
    BinaryOperator, Expr, FromClause, OrderItem, SelectItem, SelectQuery, Selection,
    UnaryOperator,
};
pub(crate) use ast::number_key;
pub use lexer::{tokenize, Token, TokenKind};
pub use lowering::{lower, Procedure, Projection};
pub use parser::parse;
pub use partition::contains_partition_keys;

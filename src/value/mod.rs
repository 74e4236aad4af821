//! Value semantics for docquery
//!
//! The dialect distinguishes a missing field (*absent*) from an explicit
//! `null`, and propagates "missing or incomparable" as a third logical value
//! instead of failing. A predicate that evaluates to anything other than
//! `true` simply excludes its row.
//!
//! # Kinds (total order)
//!
//! absent < null < boolean < number < string < array < object

mod ops;
mod output;
mod path;
mod truth;
mod value;

pub use ops::{
    arithmetic, compare, concat, deep_equal, equal, not_equal, to_int32, to_uint32,
    types_match, unary_arithmetic, ArithmeticOp, CompareOp, UnaryOp,
};
pub(crate) use ops::{compare_strings, primitive_ordering};
pub use output::sanitize_for_output;
pub use path::resolve_path;
pub use truth::{and, not, or, Truth};
pub use value::{Kind, Value};

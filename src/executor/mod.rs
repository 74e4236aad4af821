//! Query Executor subsystem for docquery
//!
//! The executor consumes a compiled [`Procedure`](crate::planner::Procedure)
//! and produces one deterministic page of results.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter documents; only a `true` predicate keeps a row
//! 2. Project
//! 3. Sort via the ordering engine
//! 4. Apply TOP
//! 5. Paginate via the pagination engine
//!
//! Data never raises: kind mismatches evaluate to *absent*.

mod evaluator;
mod executor;
mod functions;
mod options;
mod result;

pub use evaluator::Evaluator;
pub use executor::QueryExecutor;
pub use functions::{Builtin, UserFunction, UserFunctions};
pub use options::{ExecuteOptions, Parameter};
pub use result::ExecutionResult;

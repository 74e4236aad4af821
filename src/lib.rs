//! docquery - An in-memory emulator for a document-database query dialect
//!
//! Reproduces the dialect's value semantics, ORDER BY rules and continuation
//! protocol over plain JSON collections.
//!
//! ```ignore
//! use docquery::{ExecuteOptions, Query};
//! use serde_json::json;
//!
//! let query = Query::new("SELECT VALUE c.id FROM c WHERE c.n > 1 ORDER BY c.n")?;
//! let page = query.execute(&[json!({"_rid": "r1", "id": "a", "n": 2})], &ExecuteOptions::new())?;
//! assert_eq!(page.result, vec![json!("a")]);
//! ```

pub mod config;
pub mod errors;
pub mod executor;
pub mod observability;
pub mod ordering;
pub mod pagination;
pub mod planner;
pub mod query;
pub mod value;

pub use config::EngineConfig;
pub use errors::{QueryError, QueryErrorCode, QueryResult};
pub use executor::{ExecuteOptions, Parameter, UserFunctions};
pub use ordering::{CompositeIndexField, CompositeIndexSpec, Direction, OrderClause};
pub use pagination::{Continuation, ContinuationToken, Page};
pub use query::Query;
pub use value::Value;

//! Pagination engine for docquery
//!
//! Slices a sorted row sequence into bounded pages and resumes it from an
//! opaque continuation token.
//!
//! # Guarantees
//!
//! - Feeding each returned continuation into the next call, with the same
//!   page size and input, visits every row exactly once in sorted order
//! - Rows sharing an identifier across a page boundary are neither repeated
//!   nor dropped
//! - A token decodes to exactly the checkpoint that produced it

mod checkpoint;
mod paginator;

pub use checkpoint::{Checkpoint, TokenError};
pub use paginator::{exists, Continuation, ContinuationToken, Page, Paginator, ScanRange};

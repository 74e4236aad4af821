//! Ordering engine for docquery
//!
//! Produces the deterministic row order that pagination relies on.
//!
//! # Sort Rules (strict order)
//!
//! 1. Validate multi-key ORDER BY against declared composite indexes
//! 2. Compare ORDER BY keys with the cross-kind total order
//! 3. Break full ties by ascending row identifier
//! 4. Drop rows with an absent key when exactly one clause is active

mod clause;
mod comparator;
mod row;
mod sorter;

pub use clause::{
    has_matching_index, CompositeIndexField, CompositeIndexSpec, Direction, OrderClause,
};
pub use comparator::total_order_compare;
pub use row::{IdentifierField, Row, RowIdentifier};
pub use sorter::{compare_keys, sort_keys, sort_rows};

//! Multi-key row sorting
//!
//! Sort is stable and deterministic: after every ORDER BY key ties, rows
//! fall back to ascending identifier order, even with no ORDER BY at all.

use std::cmp::Ordering;

use crate::errors::{QueryError, QueryResult};
use crate::value::{resolve_path, Value};

use super::clause::{has_matching_index, CompositeIndexSpec, OrderClause};
use super::comparator::total_order_compare;
use super::row::{Row, RowIdentifier};

/// Sorts rows by their source documents.
///
/// With two or more clauses and an explicit index list, some index must
/// match the clauses exactly; passing `None` skips validation. With exactly
/// one clause, rows whose key is absent are dropped. With zero or several
/// clauses they are kept.
pub fn sort_rows<I: RowIdentifier + ?Sized>(
    rows: Vec<Row>,
    identifier: &I,
    clauses: &[OrderClause],
    composite_indexes: Option<&[CompositeIndexSpec]>,
) -> QueryResult<Vec<Row>> {
    if clauses.len() > 1 {
        if let Some(indexes) = composite_indexes {
            if !has_matching_index(clauses, indexes) {
                return Err(QueryError::missing_composite_index());
            }
        }
    }

    let mut keyed: Vec<(Vec<Value>, Value, Row)> = rows
        .into_iter()
        .map(|row| {
            let keys = sort_keys(&row.source, clauses);
            let id = identifier.identifier(&row.source);
            (keys, id, row)
        })
        .collect();

    keyed.sort_by(|(a_keys, a_id, _), (b_keys, b_id, _)| {
        compare_keys(a_keys, b_keys, clauses).then_with(|| total_order_compare(a_id, b_id))
    });

    let single_clause = clauses.len() == 1;
    Ok(keyed
        .into_iter()
        .filter(|(keys, _, _)| !(single_clause && keys[0].is_absent()))
        .map(|(_, _, row)| row)
        .collect())
}

/// Resolves each clause's path against a source document
pub fn sort_keys(source: &Value, clauses: &[OrderClause]) -> Vec<Value> {
    clauses
        .iter()
        .map(|clause| resolve_path(source, &clause.path).clone())
        .collect()
}

/// Compares resolved key tuples clause by clause, honouring direction
pub fn compare_keys(a: &[Value], b: &[Value], clauses: &[OrderClause]) -> Ordering {
    for ((x, y), clause) in a.iter().zip(b).zip(clauses) {
        let ordering = total_order_compare(x, y);
        if ordering != Ordering::Equal {
            return if clause.direction.is_descending() {
                ordering.reverse()
            } else {
                ordering
            };
        }
    }
    Ordering::Equal
}

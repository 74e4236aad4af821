//! Bounded, resumable paging over a sorted row sequence
//!
//! Paging flow (strict order):
//! 1. Decode the incoming continuation, if any
//! 2. Skip to the first row strictly ahead of the checkpoint
//! 3. Cut the page; if rows remain, checkpoint the row after the cut
//! 4. Return sanitized projections plus the encoded checkpoint
//!
//! One source document can yield several rows with the same identifier. The
//! checkpoint's skip count records how many of those were already emitted so
//! a page boundary falling between them neither repeats nor drops rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, QueryResult};
use crate::observability::{log_event, metrics, Event, Severity};
use crate::ordering::{sort_keys, total_order_compare, OrderClause, Row, RowIdentifier};
use crate::value::{deep_equal, resolve_path, sanitize_for_output, Value};

use super::checkpoint::Checkpoint;

/// Placeholder partition-key range carried by every continuation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRange {
    pub min: String,
    pub max: String,
}

impl Default for ScanRange {
    fn default() -> Self {
        Self {
            min: String::new(),
            max: "FF".to_string(),
        }
    }
}

/// Continuation handed back to the caller with a truncated page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    pub token: String,
    pub range: ScanRange,
}

/// Continuation as supplied by the caller on the next request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationToken {
    pub token: String,
}

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl From<&Continuation> for ContinuationToken {
    fn from(continuation: &Continuation) -> Self {
        Self::new(continuation.token.clone())
    }
}

impl From<Continuation> for ContinuationToken {
    fn from(continuation: Continuation) -> Self {
        Self::new(continuation.token)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Sanitized projected documents
    pub result: Vec<serde_json::Value>,
    /// Present iff rows remain after this page
    pub continuation: Option<Continuation>,
}

/// Pages a sorted sequence using the same clauses that sorted it
pub struct Paginator<'a, I: RowIdentifier + ?Sized> {
    identifier: &'a I,
    clauses: &'a [OrderClause],
    scan_range: ScanRange,
    log_level: Option<Severity>,
}

impl<'a, I: RowIdentifier + ?Sized> Paginator<'a, I> {
    pub fn new(identifier: &'a I, clauses: &'a [OrderClause]) -> Self {
        Self {
            identifier,
            clauses,
            scan_range: ScanRange::default(),
            log_level: None,
        }
    }

    /// Overrides the range attached to produced continuations
    pub fn with_scan_range(mut self, scan_range: ScanRange) -> Self {
        self.scan_range = scan_range;
        self
    }

    /// Threshold for page-cut log lines; `None` follows the process-wide one
    pub fn with_log_level(mut self, log_level: Option<Severity>) -> Self {
        self.log_level = log_level;
        self
    }

    /// Produces the page starting at `continuation` (or at the beginning).
    ///
    /// A page size that is absent or not positive returns everything left.
    pub fn paginate(
        &self,
        rows: Vec<Row>,
        page_size: Option<i64>,
        continuation: Option<&ContinuationToken>,
    ) -> QueryResult<Page> {
        let previous = match continuation {
            Some(c) => Some(Checkpoint::decode(&c.token)?),
            None => None,
        };
        let start = match &previous {
            Some(checkpoint) => self.resume_index(&rows, checkpoint)?,
            None => 0,
        };

        let mut end = rows.len();
        let mut next = None;
        if let Some(size) = page_size.filter(|s| *s > 0) {
            let size = usize::try_from(size).unwrap_or(usize::MAX);
            if rows.len() - start > size {
                end = start + size;
                next = Some(self.checkpoint_at(&rows, end, size, previous.as_ref())?);
            }
        }

        let continuation = match next {
            Some(checkpoint) => {
                metrics().increment_pages_truncated();
                let round = checkpoint.round.to_string();
                let skip = checkpoint.skip.to_string();
                let total = checkpoint.total.to_string();
                log_event(
                    self.log_level,
                    Event::PageTruncated,
                    &[
                        ("round", round.as_str()),
                        ("skip", skip.as_str()),
                        ("total", total.as_str()),
                    ],
                );
                Some(Continuation {
                    token: checkpoint.encode()?,
                    range: self.scan_range.clone(),
                })
            }
            None => None,
        };

        let result = rows
            .into_iter()
            .skip(start)
            .take(end - start)
            .filter_map(|row| sanitize_for_output(row.projected).into_json())
            .collect();

        Ok(Page {
            result,
            continuation,
        })
    }

    /// Index of the first row strictly ahead of the checkpoint
    fn resume_index(&self, rows: &[Row], checkpoint: &Checkpoint) -> QueryResult<usize> {
        let mut duplicates_seen = 0u64;

        'rows: for (index, row) in rows.iter().enumerate() {
            if let Some(stored) = checkpoint.resume.as_ref() {
                for (i, clause) in self.clauses.iter().enumerate() {
                    let key = resolve_path(&row.source, &clause.path);
                    let mark = stored.get(i).unwrap_or(&Value::Absent);
                    let mut ordering = total_order_compare(key, mark);
                    if clause.direction.is_descending() {
                        ordering = ordering.reverse();
                    }
                    match ordering {
                        Ordering::Less => continue 'rows,
                        Ordering::Greater => return Ok(index),
                        Ordering::Equal => {}
                    }
                }
            }

            let rid = self.identifier.identifier(&row.source);
            if !rid.is_truthy() {
                return Err(QueryError::identifier_required(
                    self.identifier.field_name(),
                    "continuation",
                ));
            }
            if total_order_compare(&rid, &checkpoint.rid) == Ordering::Less {
                continue;
            }
            if checkpoint.skip == 0 || !deep_equal(&rid, &checkpoint.rid) {
                return Ok(index);
            }
            if duplicates_seen == checkpoint.skip {
                return Ok(index);
            }
            duplicates_seen += 1;
        }

        Ok(rows.len())
    }

    /// Builds the checkpoint for the row at `boundary`, the first row not
    /// returned in the current page
    fn checkpoint_at(
        &self,
        rows: &[Row],
        boundary: usize,
        page_size: usize,
        previous: Option<&Checkpoint>,
    ) -> QueryResult<Checkpoint> {
        let next_row = &rows[boundary];
        let rid = self.identifier.identifier(&next_row.source);
        if !rid.is_truthy() {
            return Err(QueryError::identifier_required(
                self.identifier.field_name(),
                "maxItemCount",
            ));
        }

        // Rows sharing the identifier directly before the boundary. This walks
        // past the start of the page so runs spanning several pages add up.
        let skip = rows[..boundary]
            .iter()
            .rev()
            .take_while(|row| deep_equal(&self.identifier.identifier(&row.source), &rid))
            .count();

        Ok(Checkpoint {
            round: previous.map_or(0, |c| c.round) + 1,
            total: previous.map_or(0, |c| c.total) + page_size as u64,
            skip: skip as u64,
            resume: (!self.clauses.is_empty()).then(|| sort_keys(&next_row.source, self.clauses)),
            rid,
        })
    }
}

/// Existence check over executor output.
///
/// The executor may hand back a single *absent* sentinel, so one row counts
/// only if it is defined; several rows always count.
pub fn exists(rows: &[Value]) -> bool {
    match rows {
        [] => false,
        [only] => !only.is_absent(),
        _ => true,
    }
}

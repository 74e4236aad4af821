//! Result types for query execution

use crate::pagination::{Continuation, Page};

/// Result of query execution
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// The page handed back to the caller
    pub page: Page,
    /// Number of documents scanned
    pub scanned_count: usize,
    /// Number of rows that passed the filter and TOP
    pub matched_count: usize,
}

impl ExecutionResult {
    /// Returns the number of documents in this page
    pub fn returned_count(&self) -> usize {
        self.page.result.len()
    }

    /// Returns whether more pages follow
    pub fn has_more(&self) -> bool {
        self.page.continuation.is_some()
    }

    pub fn continuation(&self) -> Option<&Continuation> {
        self.page.continuation.as_ref()
    }

    pub fn into_page(self) -> Page {
        self.page
    }
}

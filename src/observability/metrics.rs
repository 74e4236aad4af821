//! Query metrics for docquery
//!
//! - Counters only, monotonic
//! - Lock-free, safe to bump from concurrent executions

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Registry of query pipeline counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Query texts parsed successfully
    queries_parsed: AtomicU64,
    /// Procedures compiled (at most once per query)
    queries_compiled: AtomicU64,
    /// Parse, compile or execution failures
    queries_rejected: AtomicU64,
    /// Successful executions
    executions: AtomicU64,
    /// Documents returned across all pages
    rows_returned: AtomicU64,
    /// Pages cut short with a continuation
    pages_truncated: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_queries_parsed(&self) {
        self.queries_parsed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_compiled(&self) {
        self.queries_compiled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_executions(&self) {
        self.executions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_returned(&self, rows: u64) {
        self.rows_returned.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn increment_pages_truncated(&self) {
        self.pages_truncated.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_parsed: self.queries_parsed.load(Ordering::Relaxed),
            queries_compiled: self.queries_compiled.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            executions: self.executions.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            pages_truncated: self.pages_truncated.load(Ordering::Relaxed),
        }
    }

    /// Current values as a JSON object
    pub fn to_json(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"{{"executions":{},"pages_truncated":{},"queries_compiled":{},"queries_parsed":{},"queries_rejected":{},"rows_returned":{}}}"#,
            s.executions,
            s.pages_truncated,
            s.queries_compiled,
            s.queries_parsed,
            s.queries_rejected,
            s.rows_returned,
        )
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub queries_parsed: u64,
    pub queries_compiled: u64,
    pub queries_rejected: u64,
    pub executions: u64,
    pub rows_returned: u64,
    pub pages_truncated: u64,
}

static GLOBAL: OnceLock<MetricsRegistry> = OnceLock::new();

/// Process-wide registry used by the query pipeline
pub fn metrics() -> &'static MetricsRegistry {
    GLOBAL.get_or_init(MetricsRegistry::new)
}

//! Engine configuration
//!
//! Plain values with defaults; nothing is read from the environment or from
//! files.

use crate::observability::Severity;
use crate::ordering::IdentifierField;
use crate::pagination::ScanRange;

/// Configuration shared by every execution of a query
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Source-document field holding the unique row identifier
    pub identifier_field: IdentifierField,
    /// Range attached to every continuation
    pub scan_range: ScanRange,
    /// Minimum severity for this query's log lines. `None` follows the
    /// process-wide [`Logger`](crate::observability::Logger) threshold, WARN
    /// unless changed.
    pub log_level: Option<Severity>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            identifier_field: IdentifierField::default(),
            scan_range: ScanRange::default(),
            log_level: None,
        }
    }
}

impl EngineConfig {
    /// Reads row identifiers from `field` instead of `_rid`
    pub fn with_identifier_field(mut self, field: impl Into<String>) -> Self {
        self.identifier_field = IdentifierField::new(field);
        self
    }

    pub fn with_scan_range(mut self, scan_range: ScanRange) -> Self {
        self.scan_range = scan_range;
        self
    }

    /// Logs this query's events from `level` up, without touching the
    /// process-wide threshold
    pub fn with_log_level(mut self, level: Severity) -> Self {
        self.log_level = Some(level);
        self
    }
}

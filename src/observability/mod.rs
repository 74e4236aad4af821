//! Observability subsystem for docquery
//!
//! - Structured JSON logging; a process-wide severity threshold (WARN by
//!   default) that a query's own level can replace
//! - Monotonic query counters
//!
//! Observability is read-only: it never changes query results and its own
//! failures are swallowed.
//!
//! # Usage
//!
//! ```ignore
//! use docquery::observability::{log_event, metrics, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event(None, Event::QueryExecuted, &[("rows", "42")]);
//! metrics().increment_executions();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{metrics, MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event; rejections log at ERROR, page cuts at TRACE,
/// everything else at INFO.
///
/// `min_severity` replaces the process-wide threshold when set.
pub fn log_event(min_severity: Option<Severity>, event: Event, fields: &[(&str, &str)]) {
    let severity = match event {
        Event::QueryRejected => Severity::Error,
        Event::PageTruncated => Severity::Trace,
        _ => Severity::Info,
    };
    let min_severity = min_severity.unwrap_or_else(Logger::min_severity);
    Logger::log_above(min_severity, severity, event.as_str(), fields);
}

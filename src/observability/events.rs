//! Observable query lifecycle events

use std::fmt;

/// Events emitted by the query pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Query text parsed into a syntax tree
    QueryParsed,
    /// Syntax tree lowered into a procedure
    QueryCompiled,
    /// Parse, compile or execution failed
    QueryRejected,
    /// Execution produced a page
    QueryExecuted,
    /// A page was cut and a continuation issued
    PageTruncated,
}

impl Event {
    /// Returns the event name written to logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::QueryParsed => "QUERY_PARSED",
            Event::QueryCompiled => "QUERY_COMPILED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::PageTruncated => "PAGE_TRUNCATED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

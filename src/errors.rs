//! Error types shared by every docquery subsystem
//!
//! Error codes:
//! - DOCQ_SYNTAX_ERROR (REJECT)
//! - DOCQ_UNRESOLVED_IDENTIFIER (REJECT)
//! - DOCQ_INVALID_CONTINUATION (REJECT)
//! - DOCQ_UNKNOWN_FUNCTION (REJECT)
//! - DOCQ_MISSING_COMPOSITE_INDEX (ERROR)
//! - DOCQ_IDENTIFIER_REQUIRED (ERROR)
//! - DOCQ_COMPILATION_INVARIANT (FATAL)
//! - DOCQ_UNSUPPORTED_OPERATOR (FATAL)
//!
//! Data never produces an error: kind mismatches resolve to *absent* and
//! propagate. Only malformed query construction, missing indexes and
//! pagination contract violations surface here.

use std::fmt;

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected before any work was done
    Reject,
    /// Execution failed, caller may retry with different input
    Error,
    /// Internal contract violated, never recoverable
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Malformed query text
    SyntaxError,
    /// Reference to something other than the FROM alias
    UnresolvedIdentifier,
    /// Lowering produced no procedure
    CompilationInvariant,
    /// Multi-key ORDER BY without a matching composite index
    MissingCompositeIndex,
    /// A row has no usable identifier while paging
    IdentifierRequired,
    /// Continuation token could not be decoded
    InvalidContinuation,
    /// Operator outside the supported set
    UnsupportedOperator,
    /// Unknown built-in or unregistered user-defined function
    UnknownFunction,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::SyntaxError => "DOCQ_SYNTAX_ERROR",
            QueryErrorCode::UnresolvedIdentifier => "DOCQ_UNRESOLVED_IDENTIFIER",
            QueryErrorCode::CompilationInvariant => "DOCQ_COMPILATION_INVARIANT",
            QueryErrorCode::MissingCompositeIndex => "DOCQ_MISSING_COMPOSITE_INDEX",
            QueryErrorCode::IdentifierRequired => "DOCQ_IDENTIFIER_REQUIRED",
            QueryErrorCode::InvalidContinuation => "DOCQ_INVALID_CONTINUATION",
            QueryErrorCode::UnsupportedOperator => "DOCQ_UNSUPPORTED_OPERATOR",
            QueryErrorCode::UnknownFunction => "DOCQ_UNKNOWN_FUNCTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            QueryErrorCode::SyntaxError
            | QueryErrorCode::UnresolvedIdentifier
            | QueryErrorCode::InvalidContinuation
            | QueryErrorCode::UnknownFunction => Severity::Reject,
            QueryErrorCode::MissingCompositeIndex | QueryErrorCode::IdentifierRequired => {
                Severity::Error
            }
            QueryErrorCode::CompilationInvariant | QueryErrorCode::UnsupportedOperator => {
                Severity::Fatal
            }
        }
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Location of a syntax error in the trimmed query text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset
    pub offset: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
}

impl Position {
    /// Computes line and column for a byte offset into `text`
    pub fn locate(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Query error with full context
#[derive(Debug, Clone, PartialEq)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
    position: Option<Position>,
}

impl QueryError {
    /// Create a syntax error at the given position
    pub fn syntax(position: Position, reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::SyntaxError,
            message: reason.into(),
            position: Some(position),
        }
    }

    /// Create an unresolved identifier error
    pub fn unresolved_identifier(name: &str) -> Self {
        Self {
            code: QueryErrorCode::UnresolvedIdentifier,
            message: format!("Identifier '{}' could not be resolved", name),
            position: None,
        }
    }

    /// Create a compilation invariant error (FATAL)
    pub fn compilation_invariant(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::CompilationInvariant,
            message: reason.into(),
            position: None,
        }
    }

    /// Create a missing composite index error
    pub fn missing_composite_index() -> Self {
        Self {
            code: QueryErrorCode::MissingCompositeIndex,
            message: "The order by query does not have a corresponding composite index that it can be served from.".into(),
            position: None,
        }
    }

    /// Create an identifier-required error; `option` names the paging option
    /// that needed it
    pub fn identifier_required(field: &str, option: &str) -> Self {
        Self {
            code: QueryErrorCode::IdentifierRequired,
            message: format!(
                "The {} field is required on items for the {} option.",
                field, option
            ),
            position: None,
        }
    }

    /// Create an invalid continuation error
    pub fn invalid_continuation(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::InvalidContinuation,
            message: reason.into(),
            position: None,
        }
    }

    /// Create an unsupported operator error (FATAL)
    pub fn unsupported_operator(op: &str) -> Self {
        Self {
            code: QueryErrorCode::UnsupportedOperator,
            message: format!("Unexpected operator: {}", op),
            position: None,
        }
    }

    /// Create an unknown function error
    pub fn unknown_function(name: &str) -> Self {
        Self {
            code: QueryErrorCode::UnknownFunction,
            message: format!("Unknown function '{}'", name),
            position: None,
        }
    }

    /// Create an unknown function error for a known name called with the
    /// wrong number of arguments
    pub fn function_arity(name: &str, arguments: usize) -> Self {
        Self {
            code: QueryErrorCode::UnknownFunction,
            message: format!(
                "Function '{}' does not accept {} argument(s)",
                name, arguments
            ),
            position: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the source position for syntax errors
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(pos) = &self.position {
            write!(f, " (at {})", pos)?;
        }
        Ok(())
    }
}

impl std::error::Error for QueryError {}

/// Result type for docquery operations
pub type QueryResult<T> = Result<T, QueryError>;

//! Result rows

use crate::value::{resolve_path, Value};

/// A candidate result: what the caller receives, plus the document it came
/// from. Ordering and continuation bookkeeping only ever read `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Projected document returned to the caller
    pub projected: Value,
    /// Original document, carrying the row identifier
    pub source: Value,
}

impl Row {
    pub fn new(projected: Value, source: Value) -> Self {
        Self { projected, source }
    }

    /// A row that returns its own source document
    pub fn identity(source: Value) -> Self {
        Self {
            projected: source.clone(),
            source,
        }
    }
}

/// Extracts the unique identifier of a source document
pub trait RowIdentifier {
    fn identifier(&self, source: &Value) -> Value;

    /// Field name reported when an identifier is missing
    fn field_name(&self) -> &str {
        "_rid"
    }
}

impl<F> RowIdentifier for F
where
    F: Fn(&Value) -> Value,
{
    fn identifier(&self, source: &Value) -> Value {
        self(source)
    }
}

/// Reads the identifier from a top-level field of the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierField(pub String);

impl IdentifierField {
    pub fn new(field: impl Into<String>) -> Self {
        Self(field.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for IdentifierField {
    fn default() -> Self {
        Self::new("_rid")
    }
}

impl RowIdentifier for IdentifierField {
    fn identifier(&self, source: &Value) -> Value {
        resolve_path(source, std::slice::from_ref(&self.0)).clone()
    }

    fn field_name(&self) -> &str {
        &self.0
    }
}

//! Per-execution options

use serde::{Deserialize, Serialize};

use crate::ordering::CompositeIndexSpec;
use crate::pagination::ContinuationToken;
use crate::value::Value;

use super::functions::UserFunctions;

/// A named query parameter; `name` includes the leading `@`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: serde_json::Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Options for a single execution. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    pub parameters: Vec<Parameter>,
    pub user_functions: UserFunctions,
    /// Maximum rows per page; absent or non-positive returns everything
    pub page_size: Option<i64>,
    pub continuation: Option<ContinuationToken>,
    /// Declared composite indexes; `None` skips ORDER BY validation
    pub composite_indexes: Option<Vec<CompositeIndexSpec>>,
}

impl ExecuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    pub fn with_user_functions(mut self, functions: UserFunctions) -> Self {
        self.user_functions = functions;
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_continuation(mut self, continuation: impl Into<ContinuationToken>) -> Self {
        self.continuation = Some(continuation.into());
        self
    }

    pub fn with_composite_indexes(mut self, indexes: Vec<CompositeIndexSpec>) -> Self {
        self.composite_indexes = Some(indexes);
        self
    }

    /// Parameters converted to engine values, first occurrence first
    pub(crate) fn parameter_values(&self) -> Vec<(String, Value)> {
        self.parameters
            .iter()
            .map(|p| (p.name.clone(), Value::from(&p.value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_builders() {
        let options = ExecuteOptions::new()
            .with_parameter("@a", json!(1))
            .with_page_size(10)
            .with_continuation(ContinuationToken::new("t"));
        assert_eq!(options.page_size, Some(10));
        assert_eq!(options.continuation, Some(ContinuationToken::new("t")));
        assert!(options.composite_indexes.is_none());
        assert_eq!(
            options.parameter_values(),
            vec![("@a".to_string(), Value::from(1))]
        );
    }

    #[test]
    fn test_parameter_wire_form() {
        let p: Parameter = serde_json::from_value(json!({"name": "@x", "value": [1]})).unwrap();
        assert_eq!(p, Parameter::new("@x", json!([1])));
    }
}

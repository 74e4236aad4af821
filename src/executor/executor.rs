//! Query executor for docquery
//!
//! Runs a compiled procedure over an in-memory collection.
//!
//! Execution flow (strict order):
//! 1. Convert each document once into an engine value
//! 2. Evaluate WHERE; keep the row only when it is `true`
//! 3. Project the row, keeping the source document alongside
//! 4. Sort (validating composite indexes, identifier tie-break)
//! 5. Apply TOP
//! 6. Paginate from the continuation, if any

use crate::config::EngineConfig;
use crate::errors::QueryResult;
use crate::ordering::{sort_rows, Row};
use crate::pagination::Paginator;
use crate::planner::{Procedure, Projection};
use crate::value::Value;

use super::evaluator::Evaluator;
use super::options::ExecuteOptions;
use super::result::ExecutionResult;

/// Executes one procedure; holds no per-execution state
pub struct QueryExecutor<'a> {
    procedure: &'a Procedure,
    config: &'a EngineConfig,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new executor
    pub fn new(procedure: &'a Procedure, config: &'a EngineConfig) -> Self {
        Self { procedure, config }
    }

    /// Executes against `collection` and returns one page.
    ///
    /// Same procedure + same collection + same options = same page.
    pub fn execute(
        &self,
        collection: &[serde_json::Value],
        options: &ExecuteOptions,
    ) -> QueryResult<ExecutionResult> {
        let parameters = options.parameter_values();
        let functions = &options.user_functions;

        // Steps 1-3: filter and project
        let mut rows = Vec::new();
        for document in collection {
            let source = Value::from(document);
            let evaluator = Evaluator::new(&source, &parameters, functions);
            if let Some(filter) = &self.procedure.filter {
                if !evaluator.test(filter)? {
                    continue;
                }
            }
            let projected = match &self.procedure.projection {
                Projection::Document => None,
                Projection::Value(expr) => Some(evaluator.eval(expr)?),
                Projection::Fields(fields) => Some(Value::Object(
                    fields
                        .iter()
                        .map(|(name, expr)| evaluator.eval(expr).map(|v| (name.clone(), v)))
                        .collect::<QueryResult<_>>()?,
                )),
            };
            rows.push(match projected {
                Some(projected) => Row::new(projected, source),
                None => Row::identity(source),
            });
        }

        // Step 4: sort
        let mut rows = sort_rows(
            rows,
            &self.config.identifier_field,
            &self.procedure.order,
            options.composite_indexes.as_deref(),
        )?;

        // Step 5: TOP
        if let Some(top) = self.procedure.top {
            rows.truncate(usize::try_from(top).unwrap_or(usize::MAX));
        }
        let matched_count = rows.len();

        // Step 6: paginate
        let page = Paginator::new(&self.config.identifier_field, &self.procedure.order)
            .with_scan_range(self.config.scan_range.clone())
            .with_log_level(self.config.log_level)
            .paginate(rows, options.page_size, options.continuation.as_ref())?;

        Ok(ExecutionResult {
            page,
            scanned_count: collection.len(),
            matched_count,
        })
    }
}

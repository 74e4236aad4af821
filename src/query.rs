//! Query lifecycle
//!
//! A [`Query`] is parsed once at construction and compiled lazily on first
//! use. The compiled procedure is memoized per instance and shared safely
//! between threads; executions themselves carry no state.

use std::sync::OnceLock;

use crate::config::EngineConfig;
use crate::errors::{QueryError, QueryResult};
use crate::executor::{ExecuteOptions, QueryExecutor};
use crate::observability::{log_event, metrics, Event, Severity};
use crate::pagination::Page;
use crate::planner::{contains_partition_keys, lower, parse, Procedure, SelectQuery};

/// A parsed query, compiled on demand
#[derive(Debug)]
pub struct Query {
    text: String,
    ast: SelectQuery,
    config: EngineConfig,
    compiled: OnceLock<QueryResult<Procedure>>,
}

impl Query {
    /// Parses `text` with the default configuration
    pub fn new(text: &str) -> QueryResult<Self> {
        Self::parse_with(text, EngineConfig::default())
    }

    /// Parses `text` with `config`. The config's log level applies to this
    /// query only.
    pub fn with_config(text: &str, config: EngineConfig) -> QueryResult<Self> {
        Self::parse_with(text, config)
    }

    fn parse_with(text: &str, config: EngineConfig) -> QueryResult<Self> {
        let text = text.trim().to_string();
        let ast = match parse(&text) {
            Ok(ast) => ast,
            Err(err) => {
                reject(config.log_level, &err);
                return Err(err);
            }
        };

        metrics().increment_queries_parsed();
        log_event(
            config.log_level,
            Event::QueryParsed,
            &[("collection", ast.from.collection.as_str())],
        );

        Ok(Self {
            text,
            ast,
            config,
            compiled: OnceLock::new(),
        })
    }

    /// Trimmed query text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ast(&self) -> &SelectQuery {
        &self.ast
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the compiled procedure, lowering the AST on first call.
    ///
    /// Lowering runs at most once per instance; a failure is memoized too.
    pub fn compile(&self) -> QueryResult<&Procedure> {
        let compiled = self.compiled.get_or_init(|| {
            let result = lower(&self.ast);
            if result.is_ok() {
                metrics().increment_queries_compiled();
                let clauses = self.ast.order_by.len().to_string();
                log_event(
                    self.config.log_level,
                    Event::QueryCompiled,
                    &[("order_clauses", clauses.as_str())],
                );
            }
            result
        });
        match compiled {
            Ok(procedure) => Ok(procedure),
            Err(err) => Err(err.clone()),
        }
    }

    /// Whether compilation has already happened
    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    /// Runs the query over `collection` and returns one page
    pub fn execute(
        &self,
        collection: &[serde_json::Value],
        options: &ExecuteOptions,
    ) -> QueryResult<Page> {
        let result = self
            .compile()
            .and_then(|procedure| QueryExecutor::new(procedure, &self.config).execute(collection, options));
        let result = match result {
            Ok(result) => result,
            Err(err) => {
                reject(self.config.log_level, &err);
                return Err(err);
            }
        };

        metrics().increment_executions();
        metrics().add_rows_returned(result.returned_count() as u64);
        let scanned = result.scanned_count.to_string();
        let returned = result.returned_count().to_string();
        let more = result.has_more().to_string();
        log_event(
            self.config.log_level,
            Event::QueryExecuted,
            &[
                ("has_more", more.as_str()),
                ("returned", returned.as_str()),
                ("scanned", scanned.as_str()),
            ],
        );
        Ok(result.into_page())
    }

    /// Whether the WHERE clause pins every slash-delimited path in `paths`
    /// to a single value
    pub fn contains_partition_keys<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        contains_partition_keys(&self.ast, paths)
    }
}

fn reject(log_level: Option<Severity>, err: &QueryError) {
    metrics().increment_queries_rejected();
    log_event(
        log_level,
        Event::QueryRejected,
        &[("code", err.code().code()), ("message", err.message())],
    );
}

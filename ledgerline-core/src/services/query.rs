//! Query service - read-only SQL execution

use std::sync::Arc;

use anyhow::Result;

use crate::adapters::duckdb::{validate_sql_syntax, DuckDbRepository, QueryResult};

/// Query service for ad-hoc SQL against the reporting database
pub struct QueryService {
    repository: Arc<DuckDbRepository>,
}

impl QueryService {
    pub fn new(repository: Arc<DuckDbRepository>) -> Self {
        Self { repository }
    }

    /// Validate and execute a read-only SQL query
    pub fn execute(&self, sql: &str) -> Result<QueryResult> {
        validate_sql_syntax(sql)?;
        self.repository.execute_query(sql)
    }
}

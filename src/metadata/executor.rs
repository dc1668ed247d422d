//! Raw catalog query execution.
//!
//! Schema sources never talk to a driver directly; they hand SQL text and
//! positional parameters to a [`CatalogExecutor`] and read the result as
//! [`CatalogRow`]s. The sqlx pools implement the trait for production, and
//! [`RecordingExecutor`] serves canned rows without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Column, Row};
use tracing::debug;

use crate::error::{Error, Result};

/// One catalog result row: column label → text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    values: HashMap<String, Option<String>>,
}

impl CatalogRow {
    /// Build a row from label/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }

    /// Set a column to NULL.
    pub fn with_null(mut self, column: impl Into<String>) -> Self {
        self.values.insert(column.into(), None);
        self
    }

    /// Value of a column that may be NULL.
    pub fn get(&self, column: &str) -> Result<Option<&str>> {
        self.values
            .get(column)
            .map(Option::as_deref)
            .ok_or_else(|| Error::MalformedRow {
                column: column.to_string(),
            })
    }

    /// Value of a column that must be present and non-NULL.
    pub fn get_str(&self, column: &str) -> Result<&str> {
        self.get(column)?.ok_or_else(|| Error::MalformedRow {
            column: column.to_string(),
        })
    }
}

/// Executes catalog SQL.
#[async_trait]
pub trait CatalogExecutor: Send + Sync {
    /// Run `sql` with positional `params` and return every row.
    async fn fetch(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>>;
}

#[async_trait]
impl CatalogExecutor for PgPool {
    async fn fetch(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>> {
        debug!(sql, ?params, "postgres catalog query");

        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.as_str());
        }

        let rows: Vec<PgRow> = query
            .fetch_all(self)
            .await
            .map_err(|e| Error::catalog("running postgres catalog query", e))?;

        rows.iter().map(pg_row).collect()
    }
}

#[async_trait]
impl CatalogExecutor for MySqlPool {
    async fn fetch(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>> {
        debug!(sql, ?params, "mysql catalog query");

        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.as_str());
        }

        let rows: Vec<MySqlRow> = query
            .fetch_all(self)
            .await
            .map_err(|e| Error::catalog("running mysql catalog query", e))?;

        rows.iter().map(mysql_row).collect()
    }
}

// Catalog SQL casts every selected column to text, so decoding unchecked as
// a string is safe for both drivers.
fn pg_row(row: &PgRow) -> Result<CatalogRow> {
    let mut values = HashMap::with_capacity(row.len());
    for column in row.columns() {
        let value: Option<String> = row
            .try_get_unchecked(column.ordinal())
            .map_err(|e| Error::catalog(format!("decoding column {}", column.name()), e))?;
        values.insert(column.name().to_string(), value);
    }
    Ok(CatalogRow { values })
}

fn mysql_row(row: &MySqlRow) -> Result<CatalogRow> {
    let mut values = HashMap::with_capacity(row.len());
    for column in row.columns() {
        let value: Option<String> = row
            .try_get_unchecked(column.ordinal())
            .map_err(|e| Error::catalog(format!("decoding column {}", column.name()), e))?;
        values.insert(column.name().to_string(), value);
    }
    Ok(CatalogRow { values })
}

/// A query the [`RecordingExecutor`] received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<String>,
}

struct Response {
    sql_fragment: String,
    params: Option<Vec<String>>,
    rows: Vec<CatalogRow>,
}

/// In-memory executor that records every query and answers from canned rows.
///
/// A response matches when the SQL contains its fragment and, if given, the
/// parameters are equal. The first registered match wins; unmatched queries
/// return no rows.
#[derive(Default)]
pub struct RecordingExecutor {
    responses: Vec<Response>,
    queries: Mutex<Vec<RecordedQuery>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any query containing `sql_fragment` with `rows`.
    pub fn respond(mut self, sql_fragment: impl Into<String>, rows: Vec<CatalogRow>) -> Self {
        self.responses.push(Response {
            sql_fragment: sql_fragment.into(),
            params: None,
            rows,
        });
        self
    }

    /// Answer queries containing `sql_fragment` and bound to exactly `params`.
    pub fn respond_with_params(
        mut self,
        sql_fragment: impl Into<String>,
        params: &[&str],
        rows: Vec<CatalogRow>,
    ) -> Self {
        self.responses.push(Response {
            sql_fragment: sql_fragment.into(),
            params: Some(params.iter().map(|p| p.to_string()).collect()),
            rows,
        });
        self
    }

    /// Every query received so far, in arrival order.
    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogExecutor for RecordingExecutor {
    async fn fetch(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(RecordedQuery {
                sql: sql.to_string(),
                params: params.to_vec(),
            });
        }

        let rows = self
            .responses
            .iter()
            .find(|r| {
                sql.contains(&r.sql_fragment)
                    && r.params.as_ref().map_or(true, |p| p.as_slice() == params)
            })
            .map(|r| r.rows.clone())
            .unwrap_or_default();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_row_access() {
        let row = CatalogRow::from_pairs([("column_name", "id"), ("is_nullable", "NO")])
            .with_null("column_default");

        assert_eq!(row.get_str("column_name").unwrap(), "id");
        assert_eq!(row.get("column_default").unwrap(), None);
        assert!(matches!(
            row.get_str("column_default"),
            Err(Error::MalformedRow { column }) if column == "column_default"
        ));
        assert!(matches!(
            row.get("udt_name"),
            Err(Error::MalformedRow { column }) if column == "udt_name"
        ));
    }

    #[tokio::test]
    async fn test_recording_executor_matches_fragment_and_params() {
        let executor = RecordingExecutor::new()
            .respond_with_params(
                "FROM information_schema.columns",
                &["users", "public"],
                vec![CatalogRow::from_pairs([("column_name", "id")])],
            )
            .respond("FROM information_schema.tables", vec![CatalogRow::default()]);

        let users = executor
            .fetch(
                "SELECT * FROM information_schema.columns",
                &["users".to_string(), "public".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(users.len(), 1);

        let other = executor
            .fetch(
                "SELECT * FROM information_schema.columns",
                &["orders".to_string(), "public".to_string()],
            )
            .await
            .unwrap();
        assert!(other.is_empty());

        let tables = executor
            .fetch("SELECT * FROM information_schema.tables", &[])
            .await
            .unwrap();
        assert_eq!(tables.len(), 1);

        let queries = executor.queries();
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[1].params, vec!["orders", "public"]);
    }
}

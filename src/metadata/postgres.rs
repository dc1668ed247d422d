//! PostgreSQL schema source.
//!
//! Enumerations are first-class catalog objects (`pg_enum`), so columns
//! already carry the enum's type name in `udt_name` and need no rewriting.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use super::executor::{CatalogExecutor, CatalogRow};
use super::provider::SchemaSource;
use super::types::{ColumnDefinition, EnumDefinition, TableDefinition};
use crate::config::{ConnectionConfig, PUBLIC_SCHEMA};
use crate::error::{Error, Result};
use crate::typemap::{PostgresTypes, TypeMapping};

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

const ENUM_TYPES_SQL: &str = "\
SELECT n.nspname::text AS schema, t.typname::text AS name, e.enumlabel::text AS value \
FROM pg_type t \
JOIN pg_enum e ON t.oid = e.enumtypid \
JOIN pg_catalog.pg_namespace n ON n.oid = t.typnamespace";

const ENUM_SCHEMA_FILTER: &str = " WHERE n.nspname = $1";

const ENUM_ORDER: &str = " ORDER BY t.typname ASC, e.enumlabel ASC";

const TABLE_COLUMNS_SQL: &str = "\
SELECT column_name::text AS column_name, udt_name::text AS udt_name, is_nullable::text AS is_nullable \
FROM information_schema.columns \
WHERE table_name = $1 AND table_schema = $2 \
ORDER BY ordinal_position";

const SCHEMA_TABLES_SQL: &str = "\
SELECT table_name::text AS table_name \
FROM information_schema.tables \
WHERE table_schema = $1 \
ORDER BY table_name";

/// Schema source backed by the PostgreSQL catalog.
pub struct PostgresSource<E = PgPool> {
    executor: E,
}

impl PostgresSource<PgPool> {
    /// Open a pool for `config` and verify it answers.
    pub async fn connect(config: &ConnectionConfig, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect(config.as_str())
            .await
            .map_err(Error::Connection)?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(Error::Connection)?;

        info!(
            "Connected to PostgreSQL: {}:{}/{}",
            config.host,
            config.effective_port(),
            config.database
        );

        Ok(Self::new(pool))
    }
}

impl<E: CatalogExecutor> PostgresSource<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

#[async_trait]
impl<E: CatalogExecutor> SchemaSource for PostgresSource<E> {
    async fn query(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>> {
        self.executor.fetch(sql, params).await
    }

    async fn enum_types(&self, schema: Option<&str>) -> Result<EnumDefinition> {
        let (sql, params) = match schema {
            Some(schema) => (
                format!("{}{}{}", ENUM_TYPES_SQL, ENUM_SCHEMA_FILTER, ENUM_ORDER),
                vec![schema.to_string()],
            ),
            None => (format!("{}{}", ENUM_TYPES_SQL, ENUM_ORDER), Vec::new()),
        };

        let rows = self.query(&sql, &params).await?;

        let mut enums = EnumDefinition::new();
        for row in &rows {
            enums.push_label(row.get_str("name")?, row.get_str("value")?);
        }
        Ok(enums)
    }

    async fn table_definition(&self, table: &str, schema: &str) -> Result<TableDefinition> {
        let rows = self
            .query(TABLE_COLUMNS_SQL, &[table.to_string(), schema.to_string()])
            .await?;

        let mut definition = TableDefinition::new();
        for row in &rows {
            let column = ColumnDefinition::new(
                row.get_str("udt_name")?,
                row.get_str("is_nullable")? == "YES",
            );
            definition.insert(row.get_str("column_name")?, column);
        }
        Ok(definition)
    }

    async fn schema_tables(&self, schema: &str) -> Result<Vec<String>> {
        let rows = self
            .query(SCHEMA_TABLES_SQL, &[schema.to_string()])
            .await?;

        rows.iter()
            .map(|row| row.get_str("table_name").map(str::to_string))
            .collect()
    }

    fn default_schema(&self) -> String {
        PUBLIC_SCHEMA.to_string()
    }

    fn type_mapping(&self) -> &dyn TypeMapping {
        &PostgresTypes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::metadata::executor::RecordingExecutor;
    use crate::naming::NameTransformer;

    fn enum_row(name: &str, value: &str) -> CatalogRow {
        CatalogRow::from_pairs([("schema", "public"), ("name", name), ("value", value)])
    }

    fn column_row(name: &str, udt: &str, nullable: &str) -> CatalogRow {
        CatalogRow::from_pairs([
            ("column_name", name),
            ("udt_name", udt),
            ("is_nullable", nullable),
        ])
    }

    #[tokio::test]
    async fn test_enum_types_query_with_schema() {
        let source = PostgresSource::new(RecordingExecutor::new());
        source.enum_types(Some("schemaName")).await.unwrap();

        let queries = source.executor().queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].sql.contains("WHERE n.nspname = $1"));
        assert!(queries[0]
            .sql
            .ends_with("ORDER BY t.typname ASC, e.enumlabel ASC"));
        assert_eq!(queries[0].params, vec!["schemaName"]);
    }

    #[tokio::test]
    async fn test_enum_types_query_without_schema() {
        let source = PostgresSource::new(RecordingExecutor::new());
        source.enum_types(None).await.unwrap();

        let queries = source.executor().queries();
        assert!(!queries[0].sql.contains("WHERE"));
        assert!(queries[0].params.is_empty());
    }

    #[tokio::test]
    async fn test_enum_types_groups_rows_by_name() {
        let executor = RecordingExecutor::new().respond(
            "pg_enum",
            vec![
                enum_row("enum1", "value1"),
                enum_row("enum1", "value2"),
                enum_row("enum2", "value1"),
                enum_row("enum2", "value2"),
            ],
        );
        let source = PostgresSource::new(executor);

        let enums = source.enum_types(Some("public")).await.unwrap();

        assert_eq!(enums.len(), 2);
        assert_eq!(enums.get("enum1").unwrap(), ["value1", "value2"]);
        assert_eq!(enums.get("enum2").unwrap(), ["value1", "value2"]);
    }

    #[tokio::test]
    async fn test_table_definition_query_and_response() {
        let executor = RecordingExecutor::new().respond(
            "information_schema.columns",
            vec![
                column_row("col1", "int2", "YES"),
                column_row("col2", "text", "NO"),
            ],
        );
        let source = PostgresSource::new(executor);

        let table = source.table_definition("tableName", "schemaName").await.unwrap();

        let queries = source.executor().queries();
        assert_eq!(queries[0].params, vec!["tableName", "schemaName"]);
        assert!(queries[0].sql.contains("WHERE table_name = $1 AND table_schema = $2"));

        assert_eq!(table, TableDefinition::new()
            .with_column("col1", ColumnDefinition::new("int2", true))
            .with_column("col2", ColumnDefinition::new("text", false)));
    }

    #[tokio::test]
    async fn test_table_types_maps_enum_columns() {
        let executor = RecordingExecutor::new()
            .respond("pg_enum", vec![enum_row("mood", "happy"), enum_row("mood", "sad")])
            .respond(
                "information_schema.columns",
                vec![
                    column_row("id", "int4", "NO"),
                    column_row("feeling", "mood", "YES"),
                    column_row("shape", "tsvector", "YES"),
                ],
            );
        let source = PostgresSource::new(executor);
        let transformer = NameTransformer::new(&Options::plain());

        let table = source
            .table_types("people", "public", &transformer)
            .await
            .unwrap();

        assert_eq!(table.get("id").unwrap().target_type(), Some("number"));
        assert_eq!(table.get("feeling").unwrap().target_type(), Some("Mood"));
        assert_eq!(table.get("shape").unwrap().target_type(), Some("any"));

        // enums scoped to the requested schema
        let queries = source.executor().queries();
        assert_eq!(queries[0].params, vec!["public"]);
    }

    #[tokio::test]
    async fn test_quoted_mixed_case_enum_resolves() {
        let executor = RecordingExecutor::new()
            .respond("pg_enum", vec![enum_row("Mood", "happy")])
            .respond(
                "information_schema.columns",
                vec![column_row("feeling", "Mood", "YES")],
            );
        let source = PostgresSource::new(executor);
        let transformer = NameTransformer::new(&Options::plain());

        let table = source
            .table_types("people", "public", &transformer)
            .await
            .unwrap();

        let feeling = table.get("feeling").unwrap();
        assert_eq!(feeling.sql_type, "Mood");
        assert_eq!(feeling.target_type(), Some("Mood"));
    }

    #[tokio::test]
    async fn test_schema_tables() {
        let executor = RecordingExecutor::new().respond(
            "information_schema.tables",
            vec![
                CatalogRow::from_pairs([("table_name", "table1")]),
                CatalogRow::from_pairs([("table_name", "table2")]),
            ],
        );
        let source = PostgresSource::new(executor);

        let tables = source.schema_tables("schemaName").await.unwrap();

        assert_eq!(tables, vec!["table1", "table2"]);
        assert_eq!(source.executor().queries()[0].params, vec!["schemaName"]);
    }

    #[tokio::test]
    async fn test_malformed_row_is_an_error() {
        let executor = RecordingExecutor::new().respond(
            "information_schema.columns",
            vec![CatalogRow::from_pairs([("column_name", "id")])],
        );
        let source = PostgresSource::new(executor);

        let result = source.table_definition("users", "public").await;
        assert!(matches!(result, Err(Error::MalformedRow { .. })));
    }

    #[test]
    fn test_default_schema_is_public() {
        let source = PostgresSource::new(RecordingExecutor::new());
        assert_eq!(source.default_schema(), "public");
    }
}

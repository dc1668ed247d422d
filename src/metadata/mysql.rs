//! MySQL schema source.
//!
//! MySQL has no named enum types; `enum(...)` and `set(...)` are declared
//! inline per column. Each such column gets a synthesized type name
//! `<data_type>_<column_name>` and its labels are parsed out of
//! `COLUMN_TYPE`. Two columns that share a name but disagree on labels
//! cannot both be emitted, so that case is an error.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::{debug, info};

use super::executor::{CatalogExecutor, CatalogRow};
use super::provider::SchemaSource;
use super::types::{ColumnDefinition, EnumDefinition, TableDefinition};
use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::typemap::{MySqlTypes, TypeMapping};

const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

const ENUM_COLUMNS_SQL: &str = "\
SELECT CAST(column_name AS CHAR) AS column_name, \
CAST(column_type AS CHAR) AS column_type, \
CAST(data_type AS CHAR) AS data_type \
FROM information_schema.columns \
WHERE data_type IN ('enum', 'set')";

const ENUM_SCHEMA_FILTER: &str = " AND table_schema = ?";

const ENUM_ORDER: &str = " ORDER BY table_name, ordinal_position";

const TABLE_COLUMNS_SQL: &str = "\
SELECT CAST(column_name AS CHAR) AS column_name, \
CAST(data_type AS CHAR) AS data_type, \
CAST(column_type AS CHAR) AS column_type, \
CAST(is_nullable AS CHAR) AS is_nullable \
FROM information_schema.columns \
WHERE table_name = ? AND table_schema = ? \
ORDER BY ordinal_position";

const SCHEMA_TABLES_SQL: &str = "\
SELECT CAST(table_name AS CHAR) AS table_name \
FROM information_schema.tables \
WHERE table_schema = ? \
ORDER BY table_name";

/// Captures the quoted label list inside `enum(...)` / `set(...)`.
static LABEL_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)^(?:enum|set)\((.*)\)$").unwrap());

/// Synthesized enum type name for an inline `enum`/`set` column.
///
/// The kind is lower-cased; the column name is kept catalog-exact so it
/// matches the name `table_definition` assigns.
pub fn enum_type_name(data_type: &str, column_name: &str) -> String {
    format!("{}_{}", data_type.to_lowercase(), column_name)
}

/// Labels of an inline enumeration, in declaration order.
///
/// `enum('a','it''s')` yields `["a", "it's"]`; `enum('a'',''b')` is the
/// single label `a','b`.
pub fn parse_enum_labels(column_type: &str) -> Vec<String> {
    let list = LABEL_LIST
        .captures(column_type)
        .and_then(|caps| caps.get(1))
        .map_or(column_type, |m| m.as_str());

    let mut labels = Vec::new();
    let mut chars = list.chars().peekable();
    while let Some(c) = chars.next() {
        // separators between literals
        if c != '\'' {
            continue;
        }
        let mut label = String::new();
        while let Some(c) = chars.next() {
            if c != '\'' {
                label.push(c);
            } else if chars.peek() == Some(&'\'') {
                chars.next();
                label.push('\'');
            } else {
                break;
            }
        }
        labels.push(label);
    }
    labels
}

/// Schema source backed by MySQL's `information_schema`.
pub struct MySqlSource<E = MySqlPool> {
    executor: E,
    default_schema: String,
}

impl MySqlSource<MySqlPool> {
    /// Open a pool for `config` and verify it answers.
    pub async fn connect(config: &ConnectionConfig, max_connections: u32) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
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
            "Connected to MySQL: {}:{}/{}",
            config.host,
            config.effective_port(),
            config.database
        );

        Ok(Self::new(pool, config.default_schema()))
    }
}

impl<E: CatalogExecutor> MySqlSource<E> {
    /// Source over `executor`; `default_schema` is normally the connected
    /// database's name.
    pub fn new(executor: E, default_schema: impl Into<String>) -> Self {
        Self {
            executor,
            default_schema: default_schema.into(),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

#[async_trait]
impl<E: CatalogExecutor> SchemaSource for MySqlSource<E> {
    async fn query(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>> {
        self.executor.fetch(sql, params).await
    }

    async fn enum_types(&self, schema: Option<&str>) -> Result<EnumDefinition> {
        let (sql, params) = match schema {
            Some(schema) => (
                format!("{}{}{}", ENUM_COLUMNS_SQL, ENUM_SCHEMA_FILTER, ENUM_ORDER),
                vec![schema.to_string()],
            ),
            None => (format!("{}{}", ENUM_COLUMNS_SQL, ENUM_ORDER), Vec::new()),
        };

        let rows = self.query(&sql, &params).await?;

        let mut enums = EnumDefinition::new();
        for row in &rows {
            let column_name = row.get_str("column_name")?;
            let name = enum_type_name(row.get_str("data_type")?, column_name);
            let labels = parse_enum_labels(row.get_str("column_type")?);

            match enums.get(&name) {
                Some(existing) if existing != labels.as_slice() => {
                    return Err(Error::EnumConflict {
                        column: column_name.to_string(),
                        existing: existing.to_vec(),
                        found: labels,
                    });
                }
                Some(_) => debug!(enum_name = %name, "duplicate enum definition"),
                None => enums.insert(name, labels),
            }
        }
        Ok(enums)
    }

    async fn table_definition(&self, table: &str, schema: &str) -> Result<TableDefinition> {
        let rows = self
            .query(TABLE_COLUMNS_SQL, &[table.to_string(), schema.to_string()])
            .await?;

        let mut definition = TableDefinition::new();
        for row in &rows {
            let column_name = row.get_str("column_name")?;
            let data_type = row.get_str("data_type")?;

            let sql_type = if is_inline_enum(data_type) {
                enum_type_name(data_type, column_name)
            } else {
                data_type.to_lowercase()
            };

            let column = ColumnDefinition::new(sql_type, row.get_str("is_nullable")? == "YES")
                .with_column_type(row.get_str("column_type")?);
            definition.insert(column_name, column);
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
        self.default_schema.clone()
    }

    fn type_mapping(&self) -> &dyn TypeMapping {
        &MySqlTypes
    }
}

fn is_inline_enum(data_type: &str) -> bool {
    data_type.eq_ignore_ascii_case("enum") || data_type.eq_ignore_ascii_case("set")
}

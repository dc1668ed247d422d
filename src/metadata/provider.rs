//! SchemaSource trait definition.
//!
//! The SchemaSource trait abstracts over the catalog layouts of the
//! supported databases. Implementations own their connection pool and keep
//! their SQL text and enum parsing private; callers only see the unified
//! metadata types.

use async_trait::async_trait;

use super::executor::CatalogRow;
use super::types::{EnumDefinition, TableDefinition};
use crate::error::Result;
use crate::naming::NameTransformer;
use crate::typemap::TypeMapping;

/// Trait for reading schema metadata from a database catalog.
///
/// # Example
///
/// ```ignore
/// use schema_ts::metadata::SchemaSource;
///
/// async fn example(source: &dyn SchemaSource, transformer: &NameTransformer) -> Result<()> {
///     let schema = source.default_schema();
///     let tables = source.schema_tables(&schema).await?;
///     let users = source.table_types("users", &schema, transformer).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SchemaSource: Send + Sync {
    // =========================================================================
    // Catalog queries (async, network I/O)
    // =========================================================================

    /// Run raw SQL against the catalog connection.
    async fn query(&self, sql: &str, params: &[String]) -> Result<Vec<CatalogRow>>;

    /// Enumerations visible in `schema`, or in every schema when `None`.
    async fn enum_types(&self, schema: Option<&str>) -> Result<EnumDefinition>;

    /// Raw (unmapped) column metadata for one table.
    async fn table_definition(&self, table: &str, schema: &str) -> Result<TableDefinition>;

    /// Tables in `schema`, ordered by name.
    async fn schema_tables(&self, schema: &str) -> Result<Vec<String>>;

    // =========================================================================
    // Local helpers
    // =========================================================================

    /// Schema implied by the connection when none is given.
    fn default_schema(&self) -> String;

    /// Type mapping for this dialect.
    fn type_mapping(&self) -> &dyn TypeMapping;

    // =========================================================================
    // Composite operations (default implementations)
    // =========================================================================

    /// Fully typed column metadata for one table.
    ///
    /// Fetches the schema's enumerations first so enum-typed columns resolve
    /// to their emitted type names.
    async fn table_types(
        &self,
        table: &str,
        schema: &str,
        transformer: &NameTransformer,
    ) -> Result<TableDefinition> {
        let enums = self.enum_types(Some(schema)).await?;
        self.table_types_with(table, schema, &enums, transformer)
            .await
    }

    /// Same as [`table_types`](Self::table_types) with enumerations already
    /// fetched, so a run over many tables queries them once.
    async fn table_types_with(
        &self,
        table: &str,
        schema: &str,
        enums: &EnumDefinition,
        transformer: &NameTransformer,
    ) -> Result<TableDefinition> {
        let custom_types = enums.type_names();
        let definition = self.table_definition(table, schema).await?;
        Ok(self
            .type_mapping()
            .map_types(&definition, &custom_types, transformer))
    }
}

//! SQL type to TypeScript type mapping.
//!
//! Each dialect supplies a fixed lookup table through [`TypeMapping`]. The
//! shared [`TypeMapping::map_types`] fills every column's target type:
//!
//! 1. the dialect table, if it knows the SQL type;
//! 2. the emitted type name, if the SQL type is a custom (enum) type;
//! 3. `any` otherwise, with a warning. Mapping never fails.

mod mysql;
mod postgres;

use std::collections::BTreeSet;

use tracing::warn;

use crate::metadata::{ColumnDefinition, TableDefinition};
use crate::naming::NameTransformer;

pub use mysql::MySqlTypes;
pub use postgres::PostgresTypes;

/// TypeScript target types.
pub mod ts {
    pub const STRING: &str = "string";
    pub const NUMBER: &str = "number";
    pub const BOOLEAN: &str = "boolean";
    pub const OBJECT: &str = "Object";
    pub const DATE: &str = "Date";
    pub const BUFFER: &str = "Buffer";
    pub const ANY: &str = "any";

    pub const STRING_ARRAY: &str = "Array<string>";
    pub const NUMBER_ARRAY: &str = "Array<number>";
    pub const BOOLEAN_ARRAY: &str = "Array<boolean>";
    pub const OBJECT_ARRAY: &str = "Array<Object>";
    pub const DATE_ARRAY: &str = "Array<Date>";
}

/// Per-dialect type mapping.
pub trait TypeMapping: std::fmt::Debug + Send + Sync {
    /// Dialect name for diagnostics.
    fn dialect(&self) -> &'static str;

    /// Look the column up in the dialect's fixed table.
    fn builtin_type(&self, column: &ColumnDefinition) -> Option<&'static str>;

    /// Target type for a single column.
    fn map_column(
        &self,
        column_name: &str,
        column: &ColumnDefinition,
        custom_types: &BTreeSet<String>,
        transformer: &NameTransformer,
    ) -> String {
        if let Some(target) = self.builtin_type(column) {
            return target.to_string();
        }

        if custom_types.contains(&column.sql_type) {
            return transformer.transform_type_name(&column.sql_type);
        }

        warn!(
            dialect = self.dialect(),
            column = column_name,
            "Type [{}] has been mapped to [{}] because no specific type has been found.",
            column.sql_type,
            ts::ANY
        );
        ts::ANY.to_string()
    }

    /// Return a copy of `table` with every column's target type set.
    fn map_types(
        &self,
        table: &TableDefinition,
        custom_types: &BTreeSet<String>,
        transformer: &NameTransformer,
    ) -> TableDefinition {
        table
            .iter()
            .map(|(name, column)| {
                let target = self.map_column(name, column, custom_types, transformer);
                (name.to_string(), column.mapped(target))
            })
            .collect()
    }
}

//! MySQL type mapping.
//!
//! Keys are `DATA_TYPE` values from `information_schema.columns`. MySQL
//! stores booleans as `tinyint(1)`, so a non-nullable `tinyint(1)` maps to
//! `boolean` while every other `tinyint` stays a number.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{ts, TypeMapping};
use crate::metadata::ColumnDefinition;

/// Full column type MySQL reports for boolean columns.
const BOOLEAN_COLUMN_TYPE: &str = "tinyint(1)";

static MYSQL_TYPES: &[(&str, &str)] = &[
    ("char", ts::STRING),
    ("varchar", ts::STRING),
    ("text", ts::STRING),
    ("tinytext", ts::STRING),
    ("mediumtext", ts::STRING),
    ("longtext", ts::STRING),
    ("time", ts::STRING),
    ("geometry", ts::STRING),
    // enum/set columns are renamed to their synthesized enum; these only
    // match when that rewrite did not happen
    ("set", ts::STRING),
    ("enum", ts::STRING),
    ("integer", ts::NUMBER),
    ("int", ts::NUMBER),
    ("smallint", ts::NUMBER),
    ("mediumint", ts::NUMBER),
    ("bigint", ts::NUMBER),
    ("double", ts::NUMBER),
    ("decimal", ts::NUMBER),
    ("numeric", ts::NUMBER),
    ("float", ts::NUMBER),
    ("year", ts::NUMBER),
    ("tinyint", ts::NUMBER),
    ("json", ts::OBJECT),
    ("date", ts::DATE),
    ("datetime", ts::DATE),
    ("timestamp", ts::DATE),
    ("tinyblob", ts::BUFFER),
    ("mediumblob", ts::BUFFER),
    ("longblob", ts::BUFFER),
    ("blob", ts::BUFFER),
    ("binary", ts::BUFFER),
    ("varbinary", ts::BUFFER),
    ("bit", ts::BUFFER),
];

static LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| MYSQL_TYPES.iter().copied().collect());

/// MySQL type mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlTypes;

impl MySqlTypes {
    /// Every SQL type the fixed table knows, with its target.
    pub fn known_types() -> &'static [(&'static str, &'static str)] {
        MYSQL_TYPES
    }

    fn is_boolean_flag(column: &ColumnDefinition) -> bool {
        column.sql_type == "tinyint"
            && column.column_type.eq_ignore_ascii_case(BOOLEAN_COLUMN_TYPE)
            && !column.nullable
    }
}

impl TypeMapping for MySqlTypes {
    fn dialect(&self) -> &'static str {
        "mysql"
    }

    fn builtin_type(&self, column: &ColumnDefinition) -> Option<&'static str> {
        if Self::is_boolean_flag(column) {
            return Some(ts::BOOLEAN);
        }
        LOOKUP.get(column.sql_type.as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::map_single;
    use super::*;

    #[test]
    fn test_every_known_type_maps_regardless_of_nullability() {
        for (sql_type, expected) in MySqlTypes::known_types() {
            for nullable in [false, true] {
                let column = ColumnDefinition::new(*sql_type, nullable)
                    .with_column_type(format!("{}(11)", sql_type));
                let target = map_single(&MySqlTypes, column, &[]);
                assert_eq!(&target, expected, "{} (nullable: {})", sql_type, nullable);
            }
        }
    }

    #[test]
    fn test_tinyint_one_not_null_is_boolean() {
        let column = ColumnDefinition::new("tinyint", false).with_column_type("tinyint(1)");
        assert_eq!(map_single(&MySqlTypes, column, &[]), "boolean");
    }

    #[test]
    fn test_nullable_tinyint_one_is_number() {
        let column = ColumnDefinition::new("tinyint", true).with_column_type("tinyint(1)");
        assert_eq!(map_single(&MySqlTypes, column, &[]), "number");
    }

    #[test]
    fn test_wider_tinyint_is_number() {
        let column = ColumnDefinition::new("tinyint", false).with_column_type("tinyint(4)");
        assert_eq!(map_single(&MySqlTypes, column, &[]), "number");

        let unsigned = ColumnDefinition::new("tinyint", false).with_column_type("tinyint(1) unsigned");
        assert_eq!(map_single(&MySqlTypes, unsigned, &[]), "number");
    }

    #[test]
    fn test_synthesized_enum_resolves_through_custom_names() {
        let column = ColumnDefinition::new("enum_status", false)
            .with_column_type("enum('active','inactive')");
        assert_eq!(
            map_single(&MySqlTypes, column, &["enum_status"]),
            "Enum_status"
        );
    }

    #[test]
    fn test_enum_without_custom_entry_is_string() {
        let column = ColumnDefinition::new("enum", false);
        assert_eq!(map_single(&MySqlTypes, column, &[]), "string");
    }
}

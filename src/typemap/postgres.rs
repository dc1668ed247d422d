//! PostgreSQL type mapping.
//!
//! Keys are `udt_name` values from `information_schema.columns`. Array
//! types carry a leading underscore (`_int4`).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{ts, TypeMapping};
use crate::metadata::ColumnDefinition;

static POSTGRES_TYPES: &[(&str, &str)] = &[
    ("bpchar", ts::STRING),
    ("char", ts::STRING),
    ("varchar", ts::STRING),
    ("text", ts::STRING),
    ("citext", ts::STRING),
    ("uuid", ts::STRING),
    ("bytea", ts::STRING),
    ("inet", ts::STRING),
    ("time", ts::STRING),
    ("timetz", ts::STRING),
    ("interval", ts::STRING),
    ("name", ts::STRING),
    ("int2", ts::NUMBER),
    ("int4", ts::NUMBER),
    ("int8", ts::NUMBER),
    ("float4", ts::NUMBER),
    ("float8", ts::NUMBER),
    ("numeric", ts::NUMBER),
    ("money", ts::NUMBER),
    ("oid", ts::NUMBER),
    ("bool", ts::BOOLEAN),
    ("json", ts::OBJECT),
    ("jsonb", ts::OBJECT),
    ("date", ts::DATE),
    ("timestamp", ts::DATE),
    ("timestamptz", ts::DATE),
    ("_int2", ts::NUMBER_ARRAY),
    ("_int4", ts::NUMBER_ARRAY),
    ("_int8", ts::NUMBER_ARRAY),
    ("_float4", ts::NUMBER_ARRAY),
    ("_float8", ts::NUMBER_ARRAY),
    ("_numeric", ts::NUMBER_ARRAY),
    ("_money", ts::NUMBER_ARRAY),
    ("_bool", ts::BOOLEAN_ARRAY),
    ("_varchar", ts::STRING_ARRAY),
    ("_text", ts::STRING_ARRAY),
    ("_citext", ts::STRING_ARRAY),
    ("_uuid", ts::STRING_ARRAY),
    ("_bytea", ts::STRING_ARRAY),
    ("_json", ts::OBJECT_ARRAY),
    ("_jsonb", ts::OBJECT_ARRAY),
    ("_timestamptz", ts::DATE_ARRAY),
];

static LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| POSTGRES_TYPES.iter().copied().collect());

/// PostgreSQL type mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresTypes;

impl PostgresTypes {
    /// Every SQL type the fixed table knows, with its target.
    pub fn known_types() -> &'static [(&'static str, &'static str)] {
        POSTGRES_TYPES
    }
}

impl TypeMapping for PostgresTypes {
    fn dialect(&self) -> &'static str {
        "postgres"
    }

    fn builtin_type(&self, column: &ColumnDefinition) -> Option<&'static str> {
        LOOKUP.get(column.sql_type.as_str()).copied()
    }
}

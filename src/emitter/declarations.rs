//! Mapped table metadata → TypeScript declarations.
//!
//! Per table the output is an interface whose members point into a
//! companion `<Type>Fields` namespace holding one type alias per column:
//!
//! ```typescript
//! export interface Users {
//!     id: UsersFields.id;
//! }
//!
//! export namespace UsersFields {
//!     export type id = number;
//! }
//! ```

use super::format::{is_reserved, normalize_name, quote_string, IndentWriter};
use crate::metadata::{EnumDefinition, TableDefinition};
use crate::naming::NameTransformer;
use crate::typemap::ts;

/// Interface name for a table.
///
/// A table whose raw name is a keyword keeps that name with the escape
/// suffix; every other name is transformed first.
pub fn entity_name(table_name: &str, transformer: &NameTransformer) -> String {
    if is_reserved(table_name) {
        normalize_name(table_name)
    } else {
        normalize_name(&transformer.transform_type_name(table_name))
    }
}

/// Emit the interface for one table.
pub fn emit_entity(
    w: &mut IndentWriter,
    table_name: &str,
    table: &TableDefinition,
    transformer: &NameTransformer,
) {
    let type_name = transformer.transform_type_name(table_name);

    w.open_block(&format!(
        "export interface {}",
        entity_name(table_name, transformer)
    ));
    for (column_name, _) in table.iter() {
        let member = transformer.transform_column_name(column_name);
        w.write_line(&format!(
            "{}: {}Fields.{};",
            member,
            type_name,
            normalize_name(&member)
        ));
    }
    w.close_block("}");
}

/// Emit the `<Type>Fields` namespace for one mapped table.
pub fn emit_field_namespace(
    w: &mut IndentWriter,
    table_name: &str,
    table: &TableDefinition,
    transformer: &NameTransformer,
) {
    let type_name = transformer.transform_type_name(table_name);

    w.open_block(&format!("export namespace {}Fields", type_name));
    for (column_name, column) in table.iter() {
        let member = normalize_name(&transformer.transform_column_name(column_name));
        let target = column.target_type().unwrap_or(ts::ANY);
        let nullable = if column.nullable { "| null" } else { "" };
        w.write_line(&format!("export type {} = {}{};", member, target, nullable));
    }
    w.close_block("}");
}

/// Emit one union alias per enumeration, labels in stored order.
pub fn emit_enumerations(w: &mut IndentWriter, enums: &EnumDefinition, transformer: &NameTransformer) {
    for (name, labels) in enums.iter() {
        let union = labels
            .iter()
            .map(|label| quote_string(label))
            .collect::<Vec<_>>()
            .join(" | ");
        w.write_line(&format!(
            "export type {} = {};",
            transformer.transform_type_name(name),
            union
        ));
    }
}

/// Emit a `<Type>Meta` constant describing the table's catalog types.
pub fn emit_meta(
    w: &mut IndentWriter,
    table_name: &str,
    schema: &str,
    table: &TableDefinition,
    transformer: &NameTransformer,
) {
    let type_name = transformer.transform_type_name(table_name);

    w.open_block(&format!("export const {}Meta =", type_name));
    w.write_line(&format!("table: {},", quote_string(table_name)));
    w.write_line(&format!("schema: {},", quote_string(schema)));
    w.open_block("columns:");
    for (column_name, column) in table.iter() {
        w.write_line(&format!(
            "{}: {{ sqlType: {}, nullable: {} }},",
            quote_string(&transformer.transform_column_name(column_name)),
            quote_string(&column.sql_type),
            column.nullable
        ));
    }
    w.close_block("},");
    w.close_block("} as const;");
}

pub fn render_entity(table_name: &str, table: &TableDefinition, transformer: &NameTransformer) -> String {
    let mut w = IndentWriter::default();
    emit_entity(&mut w, table_name, table, transformer);
    w.into_string()
}

pub fn render_field_namespace(
    table_name: &str,
    table: &TableDefinition,
    transformer: &NameTransformer,
) -> String {
    let mut w = IndentWriter::default();
    emit_field_namespace(&mut w, table_name, table, transformer);
    w.into_string()
}

/// Empty when there are no enumerations.
pub fn render_enumerations(enums: &EnumDefinition, transformer: &NameTransformer) -> String {
    let mut w = IndentWriter::default();
    emit_enumerations(&mut w, enums, transformer);
    w.into_string()
}

pub fn render_meta(
    table_name: &str,
    schema: &str,
    table: &TableDefinition,
    transformer: &NameTransformer,
) -> String {
    let mut w = IndentWriter::default();
    emit_meta(&mut w, table_name, schema, table, transformer);
    w.into_string()
}

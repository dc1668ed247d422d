//! Catalog metadata types.

use std::collections::{BTreeMap, BTreeSet};

/// One column as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Catalog type name exactly as the dialect reports it, or the
    /// synthesized enum name for inline enumerations.
    pub sql_type: String,
    /// Full column type text (MySQL `COLUMN_TYPE`); empty when unused.
    pub column_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// TypeScript type, set once by the type mapper.
    target_type: Option<String>,
}

impl ColumnDefinition {
    pub fn new(sql_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            sql_type: sql_type.into(),
            column_type: String::new(),
            nullable,
            target_type: None,
        }
    }

    /// Attach the dialect's auxiliary type text.
    pub fn with_column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = column_type.into();
        self
    }

    /// Copy of this column with its target type filled in.
    ///
    /// Only unmapped columns may be mapped; mapping twice is a bug in the
    /// caller.
    pub fn mapped(&self, target_type: impl Into<String>) -> Self {
        debug_assert!(
            self.target_type.is_none(),
            "column of type {} mapped twice",
            self.sql_type
        );
        Self {
            target_type: Some(target_type.into()),
            ..self.clone()
        }
    }

    /// The mapped TypeScript type, if mapping has run.
    pub fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }
}

/// Columns of one table in catalog order.
///
/// Column names are catalog-exact and unique; inserting an existing name
/// replaces the column in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDefinition {
    columns: Vec<(String, ColumnDefinition)>,
}

impl TableDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, column: ColumnDefinition) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name, column)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_column(mut self, name: impl Into<String>, column: ColumnDefinition) -> Self {
        self.insert(name, column);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnDefinition)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True once every column has a target type.
    pub fn is_mapped(&self) -> bool {
        self.columns.iter().all(|(_, c)| c.target_type.is_some())
    }
}

impl FromIterator<(String, ColumnDefinition)> for TableDefinition {
    fn from_iter<I: IntoIterator<Item = (String, ColumnDefinition)>>(iter: I) -> Self {
        let mut table = TableDefinition::new();
        for (name, column) in iter {
            table.insert(name, column);
        }
        table
    }
}

/// Enumerations visible in a schema: name → ordered labels.
///
/// Names iterate in sorted order; label order is preserved as recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumDefinition {
    enums: BTreeMap<String, Vec<String>>,
}

impl EnumDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an enum, replacing any existing labels under the same name.
    pub fn insert(&mut self, name: impl Into<String>, labels: Vec<String>) {
        self.enums.insert(name.into(), labels);
    }

    /// Append one label to an enum, creating it if needed.
    pub fn push_label(&mut self, name: &str, label: impl Into<String>) {
        self.enums
            .entry(name.to_string())
            .or_default()
            .push(label.into());
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.enums.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.enums.iter().map(|(n, l)| (n.as_str(), l.as_slice()))
    }

    /// Names usable as custom column types.
    pub fn type_names(&self) -> BTreeSet<String> {
        self.enums.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_keeps_catalog_case() {
        let column = ColumnDefinition::new("Mood", true);
        assert_eq!(column.sql_type, "Mood");
        assert!(column.target_type().is_none());
    }

    #[test]
    fn test_mapped_returns_fresh_column() {
        let column = ColumnDefinition::new("int4", false);
        let mapped = column.mapped("number");

        assert!(column.target_type().is_none());
        assert_eq!(mapped.target_type(), Some("number"));
        assert_eq!(mapped.sql_type, "int4");
    }

    #[test]
    fn test_table_preserves_insertion_order() {
        let table = TableDefinition::new()
            .with_column("zeta", ColumnDefinition::new("text", false))
            .with_column("alpha", ColumnDefinition::new("text", false))
            .with_column("mid", ColumnDefinition::new("text", false));

        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_table_insert_replaces_existing() {
        let mut table = TableDefinition::new()
            .with_column("id", ColumnDefinition::new("int4", false))
            .with_column("name", ColumnDefinition::new("text", true));
        table.insert("id", ColumnDefinition::new("int8", false));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("id").unwrap().sql_type, "int8");
        assert_eq!(table.column_names().next(), Some("id"));
    }

    #[test]
    fn test_table_is_mapped() {
        let table = TableDefinition::new().with_column("id", ColumnDefinition::new("int4", false));
        assert!(!table.is_mapped());

        let mapped: TableDefinition = table
            .iter()
            .map(|(n, c)| (n.to_string(), c.mapped("number")))
            .collect();
        assert!(mapped.is_mapped());
        assert!(TableDefinition::new().is_mapped());
    }

    #[test]
    fn test_enum_definition_orders_names_keeps_labels() {
        let mut enums = EnumDefinition::new();
        enums.push_label("mood", "sad");
        enums.push_label("mood", "happy");
        enums.insert("color", vec!["red".into(), "blue".into()]);

        let names: Vec<_> = enums.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["color", "mood"]);
        assert_eq!(enums.get("mood").unwrap(), ["sad", "happy"]);
        assert!(enums.type_names().contains("color"));
    }
}

//! In-memory implementations of the host traits.

use std::collections::BTreeMap;

use datenorm_model::{ColumnSchema, FieldValue, Record, SchemaIntrospector};

/// A record held entirely in memory, with old-value and error tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRecord {
    table: String,
    fields: BTreeMap<String, FieldValue>,
    old_fields: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, Vec<String>>,
}

impl MemoryRecord {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_old_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.old_fields.insert(name.into(), value.into());
        self
    }

    pub fn errors_for(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Marks the current values as persisted: they become the old values.
    pub fn commit(&mut self) {
        self.old_fields = self.fields.clone();
    }
}

impl Record for MemoryRecord {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    fn old_field(&self, name: &str) -> Option<&FieldValue> {
        self.old_fields.get(name)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    fn has_errors(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }

    fn add_error(&mut self, name: &str, message: String) {
        self.errors.entry(name.to_string()).or_default().push(message);
    }
}

/// Fixed table schemas.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    tables: BTreeMap<String, Vec<ColumnSchema>>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table<I, N, T>(mut self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let columns = columns
            .into_iter()
            .map(|(name, column_type)| ColumnSchema::new(name, column_type))
            .collect();
        self.tables.insert(table.into(), columns);
        self
    }
}

impl SchemaIntrospector for StaticSchema {
    fn columns(&self, table: &str) -> Vec<ColumnSchema> {
        self.tables.get(table).cloned().unwrap_or_default()
    }
}

//! Host-facing seams: the record being normalized and its table schema.

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Key-value access to a persisted record.
///
/// Hosts implement this for their record type so the normalizer can read and
/// rewrite attributes by name.
pub trait Record {
    /// Name of the backing table, used for schema lookups.
    fn table_name(&self) -> &str;

    /// Current value of `name`, or `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<&FieldValue>;

    /// Value of `name` before the pending update, when the host tracks it.
    fn old_field(&self, name: &str) -> Option<&FieldValue>;

    fn set_field(&mut self, name: &str, value: FieldValue);

    fn has_errors(&self) -> bool;

    /// Attaches a validation error message to `name`.
    fn add_error(&mut self, name: &str, message: String);
}

/// A column of a table as reported by the host's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    /// Declared semantic type as the host spells it (`"datetime"`, `"integer"`, ...).
    #[serde(rename = "type")]
    pub column_type: String,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// Table schema lookup.
///
/// Implementations may cache; the normalizer treats every call as idempotent.
pub trait SchemaIntrospector {
    /// Columns of `table` in declaration order. Unknown tables yield no columns.
    fn columns(&self, table: &str) -> Vec<ColumnSchema>;
}

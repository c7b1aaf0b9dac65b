//! Effective attribute set for an event.
//!
//! Schema-imported date columns come first, in column order. Explicit
//! configuration is overlaid on top: an explicit entry replaces the declared
//! type of a schema entry with the same name in place, and new names are
//! appended in configured order.

use datenorm_model::{AttributeSpec, ColumnSchema, DeclaredType, NormalizerConfig};
use tracing::trace;

/// Date-ish columns of a schema, restricted to `import_types`.
pub fn schema_attributes(
    columns: &[ColumnSchema],
    import_types: &[DeclaredType],
) -> Vec<AttributeSpec> {
    let mut attributes = Vec::new();
    for column in columns {
        let Ok(declared_type) = column.column_type.parse::<DeclaredType>() else {
            continue;
        };
        if !import_types.contains(&declared_type) {
            trace!(
                column = %column.name,
                declared_type = %declared_type,
                "column type excluded from import"
            );
            continue;
        }
        upsert(&mut attributes, AttributeSpec::new(&column.name, declared_type));
    }
    attributes
}

/// Merges schema-derived and explicit attributes.
///
/// `columns` is ignored when schema import is disabled; `None` means no schema
/// is available for the record.
pub fn resolve_attributes(
    config: &NormalizerConfig,
    columns: Option<&[ColumnSchema]>,
) -> Vec<AttributeSpec> {
    let mut attributes = match columns {
        Some(columns) if config.import_schema_attributes => {
            schema_attributes(columns, &config.import_types)
        }
        _ => Vec::new(),
    };
    for spec in &config.attributes {
        upsert(&mut attributes, spec.clone());
    }
    attributes
}

fn upsert(attributes: &mut Vec<AttributeSpec>, spec: AttributeSpec) {
    match attributes.iter_mut().find(|existing| existing.name == spec.name) {
        Some(existing) => existing.declared_type = spec.declared_type,
        None => attributes.push(spec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSchema> {
        vec![
            ColumnSchema::new("id", "integer"),
            ColumnSchema::new("created_at", "datetime"),
            ColumnSchema::new("title", "string"),
            ColumnSchema::new("due_on", "date"),
            ColumnSchema::new("alarm", "time"),
        ]
    }

    #[test]
    fn imports_only_date_columns() {
        let attributes = schema_attributes(&columns(), &DeclaredType::ALL);
        assert_eq!(
            attributes,
            vec![
                AttributeSpec::new("created_at", DeclaredType::DateTime),
                AttributeSpec::new("due_on", DeclaredType::Date),
                AttributeSpec::new("alarm", DeclaredType::Time),
            ]
        );
    }

    #[test]
    fn import_types_filter_columns() {
        let attributes = schema_attributes(&columns(), &[DeclaredType::Date]);
        assert_eq!(attributes, vec![AttributeSpec::new("due_on", DeclaredType::Date)]);
    }

    #[test]
    fn explicit_attributes_override_schema() {
        let config = NormalizerConfig::default()
            .with_attribute("published", DeclaredType::Timestamp)
            .with_attribute("created_at", DeclaredType::Date);
        let attributes = resolve_attributes(&config, Some(&columns()));
        assert_eq!(
            attributes,
            vec![
                AttributeSpec::new("created_at", DeclaredType::Date),
                AttributeSpec::new("due_on", DeclaredType::Date),
                AttributeSpec::new("alarm", DeclaredType::Time),
                AttributeSpec::new("published", DeclaredType::Timestamp),
            ]
        );
    }

    #[test]
    fn later_explicit_entries_win() {
        let config = NormalizerConfig::default()
            .with_schema_import(false)
            .with_attribute("due_on", DeclaredType::DateTime)
            .with_attribute("due_on", DeclaredType::Date);
        let attributes = resolve_attributes(&config, None);
        assert_eq!(attributes, vec![AttributeSpec::new("due_on", DeclaredType::Date)]);
    }

    #[test]
    fn disabled_import_ignores_schema() {
        let config = NormalizerConfig::default()
            .with_schema_import(false)
            .with_attribute("published", DeclaredType::Timestamp);
        let attributes = resolve_attributes(&config, Some(&columns()));
        assert_eq!(
            attributes,
            vec![AttributeSpec::new("published", DeclaredType::Timestamp)]
        );
    }

    #[test]
    fn resolution_is_stable() {
        let config = NormalizerConfig::default().with_attribute("published", DeclaredType::Date);
        let first = resolve_attributes(&config, Some(&columns()));
        let second = resolve_attributes(&config, Some(&columns()));
        assert_eq!(first, second);
    }
}

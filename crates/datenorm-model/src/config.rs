//! Normalizer configuration.
//!
//! Templates and patterns use chrono's strftime syntax. The configuration is
//! fixed once a normalizer is built from it.

use std::collections::BTreeMap;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::{AttributeSpec, ConversionDirection, DeclaredType};

/// Format templates keyed by declared type.
pub type FormatTable = BTreeMap<DeclaredType, String>;

/// Everything a normalizer needs, set at attach time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Explicitly configured attributes. Later entries win over earlier ones
    /// and over schema-imported attributes of the same name.
    pub attributes: Vec<AttributeSpec>,

    /// Import date-ish columns from the record's table schema.
    pub import_schema_attributes: bool,

    /// Column types accepted by the schema import.
    pub import_types: Vec<DeclaredType>,

    /// Templates applied when converting to memory (display).
    pub display_formats: FormatTable,

    /// Templates applied when converting to storage. The `date` and `time`
    /// entries double as the strict patterns for stored values of those types.
    pub storage_formats: FormatTable,

    /// Patterns tried in order when parsing datetime input.
    pub input_patterns: Vec<String>,

    /// Attributes stamped with the current instant before insert.
    pub created_at_attributes: Vec<String>,

    /// Attributes stamped with the current instant before insert and update.
    pub updated_at_attributes: Vec<String>,

    /// Attach a validation error when input cannot be parsed.
    pub add_validation_errors: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            attributes: Vec::new(),
            import_schema_attributes: true,
            import_types: DeclaredType::ALL.to_vec(),
            display_formats: default_display_formats(),
            storage_formats: default_storage_formats(),
            input_patterns: default_input_patterns(),
            created_at_attributes: vec!["created_at".to_string()],
            updated_at_attributes: vec!["updated_at".to_string(), "update_at".to_string()],
            add_validation_errors: true,
        }
    }
}

fn default_display_formats() -> FormatTable {
    BTreeMap::from([
        (DeclaredType::DateTime, "%d/%m/%Y %H:%M:%S".to_string()),
        (DeclaredType::Timestamp, "%d/%m/%Y %H:%M:%S".to_string()),
        (DeclaredType::Date, "%d/%m/%Y".to_string()),
    ])
}

fn default_storage_formats() -> FormatTable {
    BTreeMap::from([
        (DeclaredType::Date, "%Y-%m-%d".to_string()),
        (DeclaredType::DateTime, "%Y-%m-%d %H:%M:%S".to_string()),
        (DeclaredType::Time, "%H:%M:%S".to_string()),
        (DeclaredType::Timestamp, "%Y-%m-%d %H:%M:%S".to_string()),
    ])
}

fn default_input_patterns() -> Vec<String> {
    [
        "%d/%m/%Y",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%H:%M:%S",
        "%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl NormalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or re-declares) an explicitly configured attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, declared_type: DeclaredType) -> Self {
        self.attributes.push(AttributeSpec::new(name, declared_type));
        self
    }

    #[must_use]
    pub fn with_schema_import(mut self, enable: bool) -> Self {
        self.import_schema_attributes = enable;
        self
    }

    #[must_use]
    pub fn with_import_types(mut self, types: impl IntoIterator<Item = DeclaredType>) -> Self {
        self.import_types = types.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_display_format(
        mut self,
        declared_type: DeclaredType,
        template: impl Into<String>,
    ) -> Self {
        self.display_formats.insert(declared_type, template.into());
        self
    }

    #[must_use]
    pub fn with_storage_format(
        mut self,
        declared_type: DeclaredType,
        template: impl Into<String>,
    ) -> Self {
        self.storage_formats.insert(declared_type, template.into());
        self
    }

    #[must_use]
    pub fn with_input_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_created_at_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.created_at_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_updated_at_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.updated_at_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_validation_errors(mut self, enable: bool) -> Self {
        self.add_validation_errors = enable;
        self
    }

    /// Template registered for `declared_type` in the table for `direction`.
    pub fn template_for(
        &self,
        direction: ConversionDirection,
        declared_type: DeclaredType,
    ) -> Option<&str> {
        let table = match direction {
            ConversionDirection::ToMemory => &self.display_formats,
            ConversionDirection::ToStorage => &self.storage_formats,
        };
        table.get(&declared_type).map(String::as_str)
    }

    /// Checks every template and pattern for strftime syntax chrono accepts.
    ///
    /// # Errors
    ///
    /// Returns the first empty or unparseable template.
    pub fn validate(&self) -> Result<()> {
        for (declared_type, template) in &self.display_formats {
            check_template(template, || format!("display_formats.{declared_type}"))?;
        }
        for (declared_type, template) in &self.storage_formats {
            check_template(template, || format!("storage_formats.{declared_type}"))?;
        }
        for (index, pattern) in self.input_patterns.iter().enumerate() {
            check_template(pattern, || format!("input_patterns[{index}]"))?;
        }
        Ok(())
    }
}

fn check_template(template: &str, location: impl Fn() -> String) -> Result<()> {
    if template.trim().is_empty() {
        return Err(ConfigError::EmptyTemplate {
            location: location(),
        });
    }
    if StrftimeItems::new(template).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidTemplate {
            template: template.to_string(),
            location: location(),
        });
    }
    Ok(())
}

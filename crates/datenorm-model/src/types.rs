//! Attribute, direction and lifecycle phase vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownDeclaredType;

/// Semantic date/time category of a column, independent of how it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    Date,
    DateTime,
    Time,
    Timestamp,
}

impl DeclaredType {
    /// Every date-ish declared type, in schema import order.
    pub const ALL: [DeclaredType; 4] = [
        DeclaredType::Date,
        DeclaredType::DateTime,
        DeclaredType::Time,
        DeclaredType::Timestamp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeclaredType::Date => "date",
            DeclaredType::DateTime => "datetime",
            DeclaredType::Time => "time",
            DeclaredType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclaredType {
    type Err = UnknownDeclaredType;

    /// Parses a schema column type string. Matching ignores ASCII case and
    /// surrounding whitespace; anything that is not date-ish is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(DeclaredType::Date),
            "datetime" => Ok(DeclaredType::DateTime),
            "time" => Ok(DeclaredType::Time),
            "timestamp" => Ok(DeclaredType::Timestamp),
            _ => Err(UnknownDeclaredType(s.to_string())),
        }
    }
}

/// An attribute selected for conversion together with its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: DeclaredType,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
        }
    }
}

/// Which way a conversion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionDirection {
    /// Stored or raw string to a display-formatted [`crate::DateTimeValue`].
    ToMemory,
    /// User input or in-memory value to a storage-formatted value.
    ToStorage,
}

impl fmt::Display for ConversionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionDirection::ToMemory => f.write_str("to-memory"),
            ConversionDirection::ToStorage => f.write_str("to-storage"),
        }
    }
}

/// A point in a record's find/insert/update/validate flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecyclePhase {
    AfterFind,
    AfterValidate,
    AfterInsert,
    AfterUpdate,
    BeforeValidate,
    BeforeInsert,
    BeforeUpdate,
    /// Raised by the host itself to re-render a record for display.
    ToOutputFormat,
}

impl LifecyclePhase {
    pub const ALL: [LifecyclePhase; 8] = [
        LifecyclePhase::AfterFind,
        LifecyclePhase::AfterValidate,
        LifecyclePhase::AfterInsert,
        LifecyclePhase::AfterUpdate,
        LifecyclePhase::BeforeValidate,
        LifecyclePhase::BeforeInsert,
        LifecyclePhase::BeforeUpdate,
        LifecyclePhase::ToOutputFormat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LifecyclePhase::AfterFind => "after-find",
            LifecyclePhase::AfterValidate => "after-validate",
            LifecyclePhase::AfterInsert => "after-insert",
            LifecyclePhase::AfterUpdate => "after-update",
            LifecyclePhase::BeforeValidate => "before-validate",
            LifecyclePhase::BeforeInsert => "before-insert",
            LifecyclePhase::BeforeUpdate => "before-update",
            LifecyclePhase::ToOutputFormat => "to-output-format",
        }
    }

    /// Phases in which the record carries pre-update ("old") values.
    pub fn is_update(self) -> bool {
        matches!(
            self,
            LifecyclePhase::BeforeUpdate | LifecyclePhase::AfterUpdate
        )
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

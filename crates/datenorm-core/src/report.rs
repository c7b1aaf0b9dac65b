//! Per-event record of what happened to each attribute.

use datenorm_model::{ConversionDirection, ConversionError, DeclaredType, LifecyclePhase};

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeOutcome {
    /// Parsed from text and written back.
    Converted { rendered: String },
    /// Already a date/time value; only its template changed.
    Reformatted { rendered: String },
    /// Overwritten with the current instant.
    Stamped { rendered: String },
    /// Absent value explicitly set to null (to-memory only).
    Cleared,
    /// Absent value left alone.
    Absent,
    /// Present but nothing to rewrite.
    Unchanged,
    /// Raw value left in place.
    ParseFailed {
        error: ConversionError,
        error_recorded: bool,
    },
}

impl AttributeOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, AttributeOutcome::ParseFailed { .. })
    }

    /// True when the record's value was rewritten.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            AttributeOutcome::Converted { .. }
                | AttributeOutcome::Reformatted { .. }
                | AttributeOutcome::Stamped { .. }
                | AttributeOutcome::Cleared
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeReport {
    pub attribute: String,
    pub declared_type: DeclaredType,
    pub outcome: AttributeOutcome,
}

/// Outcome of one lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationReport {
    pub phase: LifecyclePhase,
    pub direction: ConversionDirection,
    pub attributes: Vec<AttributeReport>,
}

impl NormalizationReport {
    pub fn new(phase: LifecyclePhase, direction: ConversionDirection) -> Self {
        Self {
            phase,
            direction,
            attributes: Vec::new(),
        }
    }

    pub fn push(
        &mut self,
        attribute: &str,
        declared_type: DeclaredType,
        outcome: AttributeOutcome,
    ) {
        self.attributes.push(AttributeReport {
            attribute: attribute.to_string(),
            declared_type,
            outcome,
        });
    }

    pub fn outcome(&self, attribute: &str) -> Option<&AttributeOutcome> {
        self.attributes
            .iter()
            .find(|report| report.attribute == attribute)
            .map(|report| &report.outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = &AttributeReport> {
        self.attributes
            .iter()
            .filter(|report| report.outcome.is_failure())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    pub fn write_count(&self) -> usize {
        self.attributes
            .iter()
            .filter(|report| report.outcome.is_write())
            .count()
    }
}

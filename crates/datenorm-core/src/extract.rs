//! Reading attribute values off a record.

use datenorm_model::{
    AttributeSpec, DateTimeValue, DeclaredType, FieldValue, LifecyclePhase, Record,
};
use tracing::trace;

use crate::parse::is_numeric;

/// Old values longer than this carry a time-of-day component.
///
/// Tied to the `YYYY-MM-DD HH:MM:SS` storage layout: a different datetime
/// storage template makes this check meaningless.
pub const FULL_DATETIME_MIN_LEN: usize = 16;

/// A present attribute value, ready for conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// Trimmed string form of a text or integer field.
    Text(String),
    /// Already a date/time value; never re-parsed.
    DateTime(DateTimeValue),
}

/// Current value of `spec` on `record`, or `None` when absent.
///
/// During update phases a date-only input for a `datetime` attribute inherits
/// the time of day of the previous stored value (see [`carry_time_of_day`]).
/// Numeric values are epoch seconds and are never reconciled.
pub fn extract_value(
    record: &dyn Record,
    spec: &AttributeSpec,
    phase: LifecyclePhase,
) -> Option<Extracted> {
    let value = record.field(&spec.name)?;
    if value.is_absent() {
        return None;
    }
    let text = match value {
        FieldValue::DateTime(date_time) => return Some(Extracted::DateTime(date_time.clone())),
        FieldValue::Text(text) => text.trim().to_string(),
        other => other.to_string(),
    };

    if phase.is_update() && spec.declared_type == DeclaredType::DateTime && !is_numeric(&text) {
        let old = record
            .old_field(&spec.name)
            .filter(|old| !old.is_absent())
            .and_then(FieldValue::to_text);
        let reconciled = carry_time_of_day(&text, old.as_deref());
        if reconciled != text {
            trace!(attribute = %spec.name, "kept time of day from previous value");
        }
        return Some(Extracted::Text(reconciled));
    }

    Some(Extracted::Text(text))
}

/// Appends the time of day of `old` to a date-only `value`.
///
/// Applies only when `old` is a full datetime (longer than
/// [`FULL_DATETIME_MIN_LEN`]) and `value` is shorter than that; the time is the
/// second whitespace-separated token of `old`. Otherwise `value` is returned
/// unchanged.
pub fn carry_time_of_day(value: &str, old: Option<&str>) -> String {
    let Some(old) = old else {
        return value.to_string();
    };
    if old.len() <= FULL_DATETIME_MIN_LEN || value.len() >= FULL_DATETIME_MIN_LEN {
        return value.to_string();
    }
    match old.split_whitespace().nth(1) {
        Some(time) => format!("{value} {time}").trim().to_string(),
        None => value.to_string(),
    }
}

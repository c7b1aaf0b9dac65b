//! Record field values and the immutable date/time value written onto them.

use std::fmt::{self, Write as _};

use chrono::{DateTime, NaiveDateTime, NaiveTime};

/// Rendering used when a value has no format template of its own.
pub const DEFAULT_RENDER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An instant paired with the template it renders with.
///
/// Re-formatting produces a new value with the same instant; the instant itself
/// never changes once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeValue {
    instant: NaiveDateTime,
    template: Option<String>,
}

impl DateTimeValue {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self {
            instant,
            template: None,
        }
    }

    /// Interprets `seconds` as a Unix epoch timestamp (UTC).
    ///
    /// Returns `None` when the timestamp falls outside chrono's calendar range.
    pub fn from_timestamp(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(|dt| Self::new(dt.naive_utc()))
    }

    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    /// The template applied by the last format call, if any.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Same instant, rendered with `template` from now on.
    #[must_use]
    pub fn with_template(self, template: impl Into<String>) -> Self {
        Self {
            instant: self.instant,
            template: Some(template.into()),
        }
    }

    /// Same calendar day at 00:00:00, keeping the template.
    #[must_use]
    pub fn start_of_day(self) -> Self {
        Self {
            instant: self.instant.date().and_time(NaiveTime::MIN),
            template: self.template,
        }
    }

    /// Renders the instant with the current template.
    ///
    /// Templates are validated before they reach a value, but a template chrono
    /// cannot render falls back to [`DEFAULT_RENDER_FORMAT`] instead of panicking.
    pub fn render(&self) -> String {
        let template = self.template().unwrap_or(DEFAULT_RENDER_FORMAT);
        let mut out = String::new();
        if write!(out, "{}", self.instant.format(template)).is_ok() {
            return out;
        }
        self.instant.format(DEFAULT_RENDER_FORMAT).to_string()
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A record attribute value as exchanged with the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    DateTime(DateTimeValue),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Absent values are skipped by every conversion.
    ///
    /// Null, text that is empty or `"0"` once trimmed, and the integer zero are
    /// absent. Every other value, including any date/time value, is present.
    pub fn is_absent(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => {
                let trimmed = text.trim();
                trimmed.is_empty() || trimmed == "0"
            }
            FieldValue::Integer(value) => *value == 0,
            FieldValue::DateTime(_) => false,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTimeValue> {
        match self {
            FieldValue::DateTime(value) => Some(value),
            _ => None,
        }
    }

    /// String form of the value, or `None` for null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::DateTime(value) => f.write_str(&value.render()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<DateTimeValue> for FieldValue {
    fn from(value: DateTimeValue) -> Self {
        FieldValue::DateTime(value)
    }
}

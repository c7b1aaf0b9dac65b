//! String to [`DateTimeValue`] parsing.
//!
//! Matching is locale-agnostic and anchored at both ends: trailing input and
//! impossible calendar values are rejected. Within the input, chrono's parser
//! is lenient about whitespace: a space in a pattern matches any run of
//! whitespace including none, and numeric fields accept leading spaces and
//! fewer digits than their padded width. Numeric input is always a Unix
//! timestamp and is never run through the pattern list.
//!
//! Patterns may omit part of the instant:
//!
//! - no time-of-day fields (`%d/%m/%Y`): the time is midnight
//! - no date fields (`%H:%M`): the date is `today`

use chrono::format::{self, Fixed, Item, Numeric, ParseErrorKind, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use datenorm_model::{ConversionError, DateTimeValue, DeclaredType, NormalizerConfig};

pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_PATTERN: &str = "%H:%M:%S";

/// An optionally signed run of ASCII digits.
pub fn is_numeric(value: &str) -> bool {
    let digits = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a numeric string as epoch seconds.
pub fn parse_epoch(value: &str) -> Result<DateTimeValue, ConversionError> {
    value
        .parse::<i64>()
        .ok()
        .and_then(DateTimeValue::from_timestamp)
        .ok_or_else(|| ConversionError::EpochOutOfRange(value.to_string()))
}

/// Matches `value` against a single strftime pattern.
pub fn parse_with_pattern(value: &str, pattern: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, value, StrftimeItems::new(pattern)).ok()?;

    let fields = PatternFields::of(pattern);
    let date = match parsed.to_naive_date() {
        Ok(date) => Some(date),
        Err(err) if err.kind() == ParseErrorKind::NotEnough && !fields.date => None,
        Err(_) => return None,
    };
    let time = match parsed.to_naive_time() {
        Ok(time) => Some(time),
        Err(err) if err.kind() == ParseErrorKind::NotEnough && !fields.time => None,
        Err(_) => return None,
    };

    match (date, time) {
        (Some(date), Some(time)) => Some(date.and_time(time)),
        (Some(date), None) => Some(date.and_time(NaiveTime::MIN)),
        (None, Some(time)) => Some(today.and_time(time)),
        (None, None) => None,
    }
}

/// First pattern in `patterns` that matches `value` wins.
pub fn parse_patterns<S: AsRef<str>>(
    value: &str,
    patterns: &[S],
    today: NaiveDate,
) -> Result<DateTimeValue, ConversionError> {
    patterns
        .iter()
        .find_map(|pattern| parse_with_pattern(value, pattern.as_ref(), today))
        .map(DateTimeValue::new)
        .ok_or_else(|| ConversionError::NoPatternMatched {
            value: value.to_string(),
            attempted: patterns.len(),
        })
}

/// Parses a stored (or otherwise trusted) value of `declared_type`.
///
/// Dates and times must match their storage template exactly; dates are
/// normalized to the start of the day. Datetimes and timestamps go through the
/// configured input patterns.
pub fn parse_stored(
    value: &str,
    declared_type: DeclaredType,
    config: &NormalizerConfig,
    today: NaiveDate,
) -> Result<DateTimeValue, ConversionError> {
    if is_numeric(value) {
        return parse_epoch(value);
    }
    match declared_type {
        DeclaredType::Date => {
            let pattern = storage_pattern(config, declared_type, DEFAULT_DATE_PATTERN);
            parse_patterns(value, &[pattern], today).map(DateTimeValue::start_of_day)
        }
        DeclaredType::Time => {
            let pattern = storage_pattern(config, declared_type, DEFAULT_TIME_PATTERN);
            parse_patterns(value, &[pattern], today)
        }
        DeclaredType::DateTime | DeclaredType::Timestamp => {
            parse_patterns(value, &config.input_patterns, today)
        }
    }
}

/// Parses user input of `declared_type` against the full input pattern list.
pub fn parse_input(
    value: &str,
    declared_type: DeclaredType,
    config: &NormalizerConfig,
    today: NaiveDate,
) -> Result<DateTimeValue, ConversionError> {
    if is_numeric(value) {
        return parse_epoch(value);
    }
    let parsed = parse_patterns(value, &config.input_patterns, today)?;
    Ok(match declared_type {
        DeclaredType::Date => parsed.start_of_day(),
        _ => parsed,
    })
}

fn storage_pattern<'a>(
    config: &'a NormalizerConfig,
    declared_type: DeclaredType,
    fallback: &'a str,
) -> &'a str {
    config
        .storage_formats
        .get(&declared_type)
        .map_or(fallback, String::as_str)
}

/// Which halves of an instant a pattern spells out.
#[derive(Debug, Clone, Copy, Default)]
struct PatternFields {
    date: bool,
    time: bool,
}

impl PatternFields {
    fn of(pattern: &str) -> Self {
        let mut fields = Self::default();
        for item in StrftimeItems::new(pattern) {
            match item {
                Item::Numeric(
                    Numeric::Year
                    | Numeric::YearDiv100
                    | Numeric::YearMod100
                    | Numeric::IsoYear
                    | Numeric::IsoYearDiv100
                    | Numeric::IsoYearMod100
                    | Numeric::Month
                    | Numeric::Day
                    | Numeric::WeekFromSun
                    | Numeric::WeekFromMon
                    | Numeric::IsoWeek
                    | Numeric::Ordinal,
                    _,
                )
                | Item::Fixed(Fixed::ShortMonthName | Fixed::LongMonthName) => fields.date = true,
                Item::Numeric(
                    Numeric::Hour | Numeric::Hour12 | Numeric::Minute | Numeric::Second,
                    _,
                ) => fields.time = true,
                Item::Numeric(Numeric::Timestamp, _) => {
                    fields.date = true;
                    fields.time = true;
                }
                _ => {}
            }
        }
        fields
    }
}

use thiserror::Error;

/// A schema column type that is not one of the date-ish declared types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown declared type: {0}")]
pub struct UnknownDeclaredType(pub String);

/// Why a single attribute value could not be turned into a date/time value.
///
/// These never abort an event; the normalizer records them per attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("value {value:?} matches none of the {attempted} accepted pattern(s)")]
    NoPatternMatched { value: String, attempted: usize },
    #[error("epoch timestamp {0} is outside the representable range")]
    EpochOutOfRange(String),
}

/// Invalid normalizer configuration, reported when the normalizer is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid format template {template:?} in {location}")]
    InvalidTemplate { template: String, location: String },
    #[error("empty format template in {location}")]
    EmptyTemplate { location: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub mod config;
pub mod error;
pub mod record;
pub mod types;
pub mod value;

pub use config::{FormatTable, NormalizerConfig};
pub use error::{ConfigError, ConversionError, Result, UnknownDeclaredType};
pub use record::{ColumnSchema, Record, SchemaIntrospector};
pub use types::{AttributeSpec, ConversionDirection, DeclaredType, LifecyclePhase};
pub use value::{DEFAULT_RENDER_FORMAT, DateTimeValue, FieldValue};

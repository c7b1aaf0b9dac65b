//! Date/time normalization for persisted records.
//!
//! A [`DateNormalizer`] is attached to a host's record lifecycle and rewrites
//! date-ish attributes between three forms:
//!
//! - **storage**: the string written to the database (`2024-02-20 09:30:00`)
//! - **display**: the string shown to people (`20/02/2024 09:30:00`)
//! - **memory**: a [`DateTimeValue`] carrying the instant and its template
//!
//! The crate is organized by step:
//!
//! - **attributes**: effective attribute set (schema import + explicit config)
//! - **extract**: reading values, absent detection, time-of-day carry-over
//! - **parse**: strict pattern and epoch parsing
//! - **format**: template selection per direction
//! - **stamp**: created/updated timestamps
//! - **dispatch**: lifecycle phase to handler bindings
//! - **normalizer**: the per-event conversion loops
//! - **memory**: in-memory record and schema implementations
//!
//! # Example
//!
//! ```
//! use datenorm_core::{DateNormalizer, MemoryRecord, StaticSchema};
//! use datenorm_model::{FieldValue, LifecyclePhase, NormalizerConfig, Record};
//!
//! let schema = StaticSchema::new().with_table("events", [("starts_at", "datetime")]);
//! let normalizer = DateNormalizer::new(NormalizerConfig::default())
//!     .expect("default config is valid")
//!     .with_schema(schema);
//!
//! let mut record = MemoryRecord::new("events").with_field("starts_at", "2024-02-20 09:30:00");
//! normalizer.handle(LifecyclePhase::AfterFind, &mut record);
//! assert_eq!(
//!     record.field("starts_at").map(FieldValue::to_string).as_deref(),
//!     Some("20/02/2024 09:30:00")
//! );
//! ```

pub mod attributes;
pub mod clock;
pub mod dispatch;
pub mod extract;
pub mod format;
pub mod memory;
pub mod normalizer;
pub mod parse;
pub mod report;
pub mod stamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datenorm_model::{DateTimeValue, FieldValue};
pub use dispatch::{PhaseHandler, direction_for, events, handler_for};
pub use memory::{MemoryRecord, StaticSchema};
pub use normalizer::{DateNormalizer, invalid_date_message};
pub use report::{AttributeOutcome, AttributeReport, NormalizationReport};

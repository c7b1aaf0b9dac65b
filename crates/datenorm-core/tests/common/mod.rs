//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Once;

use chrono::{NaiveDate, NaiveDateTime};
use datenorm_core::{DateNormalizer, FixedClock, MemoryRecord, StaticSchema};
use datenorm_model::{NormalizerConfig, Record};
use tracing_subscriber::EnvFilter;

pub const TABLE: &str = "events";

static INIT_LOGGING: Once = Once::new();

/// Routes `tracing` output to the test harness; `RUST_LOG` overrides the level.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

/// The fixed "now" every test normalizer runs at.
pub fn now() -> NaiveDateTime {
    at(2026, 10, 16, 8, 15, 0)
}

pub fn schema() -> StaticSchema {
    StaticSchema::new().with_table(
        TABLE,
        [
            ("id", "integer"),
            ("title", "string"),
            ("starts_at", "datetime"),
            ("due_on", "date"),
            ("alarm", "time"),
            ("published", "timestamp"),
            ("created_at", "datetime"),
            ("updated_at", "datetime"),
        ],
    )
}

pub fn normalizer_with(config: NormalizerConfig) -> DateNormalizer {
    init_logging();
    DateNormalizer::new(config)
        .expect("valid config")
        .with_schema(schema())
        .with_clock(FixedClock(now()))
}

pub fn normalizer() -> DateNormalizer {
    normalizer_with(NormalizerConfig::default())
}

pub fn record() -> MemoryRecord {
    MemoryRecord::new(TABLE)
}

/// String form of a field, `None` when the record lacks it.
pub fn text(record: &MemoryRecord, name: &str) -> Option<String> {
    record.field(name).map(ToString::to_string)
}

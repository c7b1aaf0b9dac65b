//! Created/updated timestamp stamping.

use datenorm_model::{
    AttributeSpec, ConversionDirection, DateTimeValue, LifecyclePhase, NormalizerConfig,
};

use crate::clock::Clock;
use crate::format::apply_format;

/// Whether `attribute` is overwritten with the current instant in `phase`.
///
/// Inserts stamp both created and updated attributes; updates stamp only the
/// updated ones. No other phase stamps.
pub fn should_stamp(phase: LifecyclePhase, attribute: &str, config: &NormalizerConfig) -> bool {
    let listed = |names: &[String]| names.iter().any(|name| name == attribute);
    match phase {
        LifecyclePhase::BeforeInsert => {
            listed(&config.created_at_attributes) || listed(&config.updated_at_attributes)
        }
        LifecyclePhase::BeforeUpdate => listed(&config.updated_at_attributes),
        _ => false,
    }
}

/// The current instant, rendered with the storage template of `spec`.
pub fn stamp_value(
    spec: &AttributeSpec,
    config: &NormalizerConfig,
    clock: &dyn Clock,
) -> DateTimeValue {
    apply_format(
        DateTimeValue::new(clock.now()),
        spec.declared_type,
        ConversionDirection::ToStorage,
        config,
    )
}

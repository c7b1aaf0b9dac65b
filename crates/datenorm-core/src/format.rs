//! Selecting the rendering template for a converted value.

use datenorm_model::{ConversionDirection, DateTimeValue, DeclaredType, NormalizerConfig};
use tracing::trace;

/// Applies the `direction` template registered for `declared_type`.
///
/// Without a registered template the value comes back as it was. Only the
/// rendering changes; the instant is untouched.
pub fn apply_format(
    value: DateTimeValue,
    declared_type: DeclaredType,
    direction: ConversionDirection,
    config: &NormalizerConfig,
) -> DateTimeValue {
    match config.template_for(direction, declared_type) {
        Some(template) => value.with_template(template),
        None => {
            trace!(%declared_type, %direction, "no format template registered");
            value
        }
    }
}

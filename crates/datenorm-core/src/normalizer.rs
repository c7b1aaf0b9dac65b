//! The per-event conversion loops.

use chrono::NaiveDate;
use tracing::{debug, debug_span, trace, warn};

use datenorm_model::{
    AttributeSpec, ConversionDirection, FieldValue, LifecyclePhase, NormalizerConfig, Record,
    Result, SchemaIntrospector,
};

use crate::attributes::resolve_attributes;
use crate::clock::{Clock, SystemClock};
use crate::dispatch::{direction_for, handler_for};
use crate::extract::{Extracted, extract_value};
use crate::format::apply_format;
use crate::parse::{parse_input, parse_stored};
use crate::report::{AttributeOutcome, NormalizationReport};
use crate::stamp::{should_stamp, stamp_value};

/// Validation message attached when input cannot be parsed.
pub fn invalid_date_message(attribute: &str) -> String {
    format!("{attribute} The given date is invalid.")
}

/// Rewrites a record's date/time attributes as lifecycle phases fire.
///
/// Attributes are handled independently: a value that fails to parse is left
/// as it was and the remaining attributes are still converted.
pub struct DateNormalizer {
    config: NormalizerConfig,
    schema: Option<Box<dyn SchemaIntrospector>>,
    clock: Box<dyn Clock>,
}

impl DateNormalizer {
    /// Builds a normalizer with the system clock and no schema.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured template or pattern is not valid
    /// strftime syntax.
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            schema: None,
            clock: Box::new(SystemClock),
        })
    }

    /// Attaches the schema used for attribute auto-import.
    #[must_use]
    pub fn with_schema(mut self, schema: impl SchemaIntrospector + 'static) -> Self {
        self.schema = Some(Box::new(schema));
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Effective attribute set for `record`.
    pub fn attributes_for(&self, record: &dyn Record) -> Vec<AttributeSpec> {
        let columns = match &self.schema {
            Some(schema) if self.config.import_schema_attributes => {
                Some(schema.columns(record.table_name()))
            }
            _ => None,
        };
        resolve_attributes(&self.config, columns.as_deref())
    }

    /// Entry point for the host's event notification.
    pub fn handle(&self, phase: LifecyclePhase, record: &mut dyn Record) -> NormalizationReport {
        let handler = handler_for(phase);
        handler(self, phase, record)
    }

    /// After-validate: back to memory when validation failed, on to storage otherwise.
    pub fn convert_after_validate(
        &self,
        phase: LifecyclePhase,
        record: &mut dyn Record,
    ) -> NormalizationReport {
        match direction_for(phase, record.has_errors()) {
            ConversionDirection::ToMemory => self.convert_to_memory(phase, record),
            ConversionDirection::ToStorage => self.convert_to_storage(phase, record),
        }
    }

    /// Parses stored values and applies the display templates.
    pub fn convert_to_memory(
        &self,
        phase: LifecyclePhase,
        record: &mut dyn Record,
    ) -> NormalizationReport {
        let direction = ConversionDirection::ToMemory;
        let span = debug_span!("normalize", %phase, %direction, table = record.table_name());
        let _enter = span.enter();

        let today = self.today();
        let mut report = NormalizationReport::new(phase, direction);
        for spec in self.attributes_for(record) {
            let outcome = self.attribute_to_memory(&spec, phase, today, record);
            report.push(&spec.name, spec.declared_type, outcome);
        }
        debug!(written = report.write_count(), "converted to memory");
        report
    }

    /// Stamps, parses input and applies the storage templates.
    pub fn convert_to_storage(
        &self,
        phase: LifecyclePhase,
        record: &mut dyn Record,
    ) -> NormalizationReport {
        let direction = ConversionDirection::ToStorage;
        let span = debug_span!("normalize", %phase, %direction, table = record.table_name());
        let _enter = span.enter();

        let today = self.today();
        let mut report = NormalizationReport::new(phase, direction);
        for spec in self.attributes_for(record) {
            let outcome = self.attribute_to_storage(&spec, phase, today, record);
            report.push(&spec.name, spec.declared_type, outcome);
        }
        debug!(
            written = report.write_count(),
            failed = report.failure_count(),
            "converted to storage"
        );
        report
    }

    fn attribute_to_memory(
        &self,
        spec: &AttributeSpec,
        phase: LifecyclePhase,
        today: NaiveDate,
        record: &mut dyn Record,
    ) -> AttributeOutcome {
        let direction = ConversionDirection::ToMemory;
        let Some(value) = extract_value(record, spec, phase) else {
            if record
                .field(&spec.name)
                .is_some_and(|value| *value != FieldValue::Null)
            {
                record.set_field(&spec.name, FieldValue::Null);
                return AttributeOutcome::Cleared;
            }
            return AttributeOutcome::Absent;
        };

        match value {
            Extracted::DateTime(value) => {
                if self.config.template_for(direction, spec.declared_type).is_none() {
                    return AttributeOutcome::Unchanged;
                }
                let value = apply_format(value, spec.declared_type, direction, &self.config);
                let rendered = value.render();
                record.set_field(&spec.name, value.into());
                AttributeOutcome::Reformatted { rendered }
            }
            Extracted::Text(text) => {
                match parse_stored(&text, spec.declared_type, &self.config, today) {
                    Ok(value) => {
                        let value =
                            apply_format(value, spec.declared_type, direction, &self.config);
                        let rendered = value.render();
                        trace!(attribute = %spec.name, raw = %text, %rendered, "converted");
                        record.set_field(&spec.name, value.into());
                        AttributeOutcome::Converted { rendered }
                    }
                    Err(error) => {
                        debug!(
                            attribute = %spec.name,
                            declared_type = %spec.declared_type,
                            %error,
                            "stored value left as is"
                        );
                        AttributeOutcome::ParseFailed {
                            error,
                            error_recorded: false,
                        }
                    }
                }
            }
        }
    }

    fn attribute_to_storage(
        &self,
        spec: &AttributeSpec,
        phase: LifecyclePhase,
        today: NaiveDate,
        record: &mut dyn Record,
    ) -> AttributeOutcome {
        let direction = ConversionDirection::ToStorage;
        if should_stamp(phase, &spec.name, &self.config) {
            let value = stamp_value(spec, &self.config, self.clock.as_ref());
            let rendered = value.render();
            trace!(attribute = %spec.name, %rendered, "stamped");
            record.set_field(&spec.name, value.into());
            return AttributeOutcome::Stamped { rendered };
        }

        let Some(value) = extract_value(record, spec, phase) else {
            return AttributeOutcome::Absent;
        };

        match value {
            Extracted::DateTime(value) => {
                if self.config.template_for(direction, spec.declared_type).is_none() {
                    return AttributeOutcome::Unchanged;
                }
                let value = apply_format(value, spec.declared_type, direction, &self.config);
                let rendered = value.render();
                record.set_field(&spec.name, value.into());
                AttributeOutcome::Reformatted { rendered }
            }
            Extracted::Text(text) => {
                match parse_input(&text, spec.declared_type, &self.config, today) {
                    Ok(value) => {
                        let value =
                            apply_format(value, spec.declared_type, direction, &self.config);
                        let rendered = value.render();
                        trace!(attribute = %spec.name, raw = %text, %rendered, "converted");
                        record.set_field(&spec.name, value.into());
                        AttributeOutcome::Converted { rendered }
                    }
                    Err(error) => {
                        warn!(
                            attribute = %spec.name,
                            declared_type = %spec.declared_type,
                            "invalid date input"
                        );
                        let error_recorded = self.config.add_validation_errors;
                        if error_recorded {
                            record.add_error(&spec.name, invalid_date_message(&spec.name));
                        }
                        AttributeOutcome::ParseFailed {
                            error,
                            error_recorded,
                        }
                    }
                }
            }
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }
}

//! Lifecycle phase to handler bindings.
//!
//! | Phase                                        | Direction                                   |
//! |----------------------------------------------|---------------------------------------------|
//! | after-find, after-insert, after-update       | to-memory                                   |
//! | to-output-format                             | to-memory                                   |
//! | after-validate                               | to-memory with validation errors, else to-storage |
//! | before-validate, before-insert, before-update | to-storage (stamping first on insert/update) |

use datenorm_model::{ConversionDirection, LifecyclePhase, Record};

use crate::normalizer::DateNormalizer;
use crate::report::NormalizationReport;

/// A handler invoked by the host when a phase fires.
pub type PhaseHandler = fn(&DateNormalizer, LifecyclePhase, &mut dyn Record) -> NormalizationReport;

pub fn handler_for(phase: LifecyclePhase) -> PhaseHandler {
    match phase {
        LifecyclePhase::AfterFind
        | LifecyclePhase::AfterInsert
        | LifecyclePhase::AfterUpdate
        | LifecyclePhase::ToOutputFormat => DateNormalizer::convert_to_memory,
        LifecyclePhase::AfterValidate => DateNormalizer::convert_after_validate,
        LifecyclePhase::BeforeValidate
        | LifecyclePhase::BeforeInsert
        | LifecyclePhase::BeforeUpdate => DateNormalizer::convert_to_storage,
    }
}

/// Every phase with its handler, for hosts that register listeners up front.
pub fn events() -> [(LifecyclePhase, PhaseHandler); 8] {
    LifecyclePhase::ALL.map(|phase| (phase, handler_for(phase)))
}

/// Direction a phase converts in, given the record's validation state.
pub fn direction_for(phase: LifecyclePhase, has_errors: bool) -> ConversionDirection {
    match phase {
        LifecyclePhase::AfterFind
        | LifecyclePhase::AfterInsert
        | LifecyclePhase::AfterUpdate
        | LifecyclePhase::ToOutputFormat => ConversionDirection::ToMemory,
        LifecyclePhase::AfterValidate if has_errors => ConversionDirection::ToMemory,
        LifecyclePhase::AfterValidate
        | LifecyclePhase::BeforeValidate
        | LifecyclePhase::BeforeInsert
        | LifecyclePhase::BeforeUpdate => ConversionDirection::ToStorage,
    }
}

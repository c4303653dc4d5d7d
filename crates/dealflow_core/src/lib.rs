//! Core stage-progression logic for sales deals.
//! This crate is the single source of truth for pipeline invariants.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod rules;
pub mod service;

pub use config::{ConfigError, PipelineConfig, DEFAULT_CURRENCY};
pub use engine::mutator::{
    apply_transition, apply_transition_at, prepare_save, prepare_save_at, resolve_title,
    DEFAULT_UNTITLED_DEAL_NAME,
};
pub use engine::transition::{
    can_advance, can_move, eligible_targets, outlook, GateDetail, GateReport, TransitionOutlook,
    ValidationMode, INCOMPLETE_FIELDS_MESSAGE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::deal::{Deal, DealId, DealIdError};
pub use model::field::{DealField, FieldValue};
pub use model::stage::{Stage, StageParseError};
pub use rules::cross_field::{validate_date_logic, validate_revenue_sum, DateRule, DATE_RULES};
pub use rules::error::{DealValidationError, IllegalTransition};
pub use rules::requirements::{
    check_requirements, completion_status, field_errors, is_satisfied, required_fields,
    visible_fields, RequirementCheck, StageCompletion,
};
pub use service::pipeline_service::{Clock, PipelineService, SystemClock};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

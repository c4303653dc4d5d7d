//! Deal pipeline use-case service.
//!
//! # Responsibility
//! - Provide create/save/move/advance entry points for UI and store callers.
//! - Apply configured defaults and log metadata-only pipeline events.
//!
//! # Invariants
//! - Every returned deal went through the engine mutator.
//! - Entering `Won` requires quarterly revenue to reconcile with the amount.
//! - The service never persists; callers own the returned value.

use crate::config::PipelineConfig;
use crate::engine::mutator::{apply_transition_at, prepare_save_at};
use crate::engine::transition::{eligible_targets, outlook, TransitionOutlook, ValidationMode};
use crate::model::deal::{Deal, DealId};
use crate::model::stage::Stage;
use crate::rules::cross_field::validate_revenue_sum;
use crate::rules::error::{DealValidationError, IllegalTransition};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

/// Source of the current instant.
///
/// Abstracted so callers and tests can pin modification timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Use-case facade over the transition engine.
pub struct PipelineService<C: Clock = SystemClock> {
    config: PipelineConfig,
    clock: C,
}

impl PipelineService<SystemClock> {
    /// Creates a service using wall-clock time.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> PipelineService<C> {
    /// Creates a service using the provided clock.
    pub fn with_clock(config: PipelineConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Creates an unsaved deal at `initial_stage`.
    ///
    /// # Contract
    /// - Currency is the configured default.
    /// - Quarterly revenue is zero.
    /// - `created_by` and `modified_by` are `creator`.
    pub fn create_deal(&self, initial_stage: Stage, creator: Option<&str>) -> Deal {
        let now = self.clock.now();
        let mut deal = Deal::with_id(
            DealId::new(),
            initial_stage,
            self.config.default_currency.clone(),
            now,
        );
        deal.created_by = creator.map(str::to_string);
        deal.modified_by = deal.created_by.clone();
        debug!(
            "event=deal_create module=service status=ok deal_id={} stage={}",
            deal.id, deal.stage
        );
        deal
    }

    /// Validates and stamps `deal` for persisting in its current stage.
    ///
    /// Used for the first persist of a new deal as well as later edits.
    pub fn save(&self, deal: &Deal, actor: Option<&str>) -> Result<Deal, DealValidationError> {
        match prepare_save_at(
            deal,
            actor,
            self.clock.now(),
            &self.config.untitled_deal_name,
        ) {
            Ok(saved) => {
                info!(
                    "event=deal_save module=service status=ok deal_id={} stage={}",
                    saved.id, saved.stage
                );
                Ok(saved)
            }
            Err(err) => {
                warn!(
                    "event=deal_save module=service status=rejected deal_id={} stage={} reason={}",
                    deal.id,
                    deal.stage,
                    error_kind(&err)
                );
                Err(err)
            }
        }
    }

    /// Moves `deal` to `target` and returns the version to persist.
    ///
    /// # Errors
    /// - `IllegalTransition` when `target` is not eligible now.
    /// - `RevenueMismatch` when entering `Won` with unreconciled revenue.
    pub fn move_to(
        &self,
        deal: &Deal,
        target: Stage,
        actor: Option<&str>,
    ) -> Result<Deal, DealValidationError> {
        let moved = apply_transition_at(
            deal,
            target,
            actor,
            self.clock.now(),
            &self.config.untitled_deal_name,
        )?;

        if target == Stage::Won {
            if let Err(err) = validate_revenue_sum(&moved) {
                warn!(
                    "event=stage_transition module=service status=rejected deal_id={} from={} to={} reason={}",
                    deal.id,
                    deal.stage,
                    target,
                    error_kind(&err)
                );
                return Err(err);
            }
        }

        info!(
            "event=stage_transition module=service status=ok deal_id={} from={} to={}",
            deal.id, deal.stage, moved.stage
        );
        Ok(moved)
    }

    /// Moves `deal` to its next linear stage.
    ///
    /// # Errors
    /// - `IllegalTransition` when the deal has no linear successor (targeting
    ///   the current stage) or the current stage's gate does not pass.
    pub fn advance(&self, deal: &Deal, actor: Option<&str>) -> Result<Deal, DealValidationError> {
        let Some(next) = deal.stage.next() else {
            return Err(IllegalTransition {
                current: deal.stage,
                requested: deal.stage,
                eligible: eligible_targets(deal),
            }
            .into());
        };
        self.move_to(deal, next, actor)
    }

    /// Eligible targets with detail controlled by `mode`.
    pub fn outlook(&self, deal: &Deal, mode: ValidationMode) -> TransitionOutlook {
        outlook(deal, mode)
    }
}

fn error_kind(err: &DealValidationError) -> &'static str {
    match err {
        DealValidationError::MissingRequiredFields { .. } => "missing_required_fields",
        DealValidationError::DateOrderViolation { .. } => "date_order_violation",
        DealValidationError::RevenueMismatch { .. } => "revenue_mismatch",
        DealValidationError::IllegalTransition(_) => "illegal_transition",
    }
}

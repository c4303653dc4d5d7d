//! Stage transition decisions.
//!
//! # Responsibility
//! - Compute the eligible target set for a deal's current stage.
//! - Answer `can_move` / `can_advance` from that set.
//! - Report gate detail in surfaced mode for callers that display it.
//!
//! # Invariants
//! - Backward targets are always eligible, regardless of completeness.
//! - Forward targets require the current stage's gate to pass.
//! - Terminal stages are eligible only from `Offered`.
//! - All functions are pure; repeated calls on one snapshot agree.

use crate::model::deal::Deal;
use crate::model::field::DealField;
use crate::model::stage::Stage;
use crate::rules::cross_field::{validate_date_logic, validate_revenue_sum};
use crate::rules::error::DealValidationError;
use crate::rules::requirements::{check_requirements, field_errors, RequirementCheck};
use std::collections::{BTreeMap, BTreeSet};

/// Message shown when only required fields block progression.
pub const INCOMPLETE_FIELDS_MESSAGE: &str =
    "Complete all required fields to enable stage progression";

/// How much detail a gate evaluation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Gating only; detail is dropped.
    #[default]
    Silent,
    /// Gating plus detail for display.
    Surfaced,
}

/// Gate evaluation of a deal's current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateReport {
    pub requirements: RequirementCheck,
    pub date_logic: Result<(), DealValidationError>,
    pub revenue: Result<(), DealValidationError>,
}

impl GateReport {
    /// Evaluates every validator for `deal.stage` once.
    pub fn evaluate(deal: &Deal) -> Self {
        Self {
            requirements: check_requirements(deal, deal.stage),
            date_logic: validate_date_logic(deal),
            revenue: validate_revenue_sum(deal),
        }
    }

    /// Gate for leaving the stage forward to a terminal stage.
    ///
    /// Revenue is not part of this gate; it is enforced when entering `Won`.
    pub fn allows_terminal(&self) -> bool {
        self.requirements.is_satisfied() && self.date_logic.is_ok()
    }

    /// Gate for leaving the stage forward along the linear path.
    pub fn allows_forward(&self) -> bool {
        // Vacuous for every stage with a linear successor; Won has none.
        let revenue_ok = self.requirements.stage != Stage::Won || self.revenue.is_ok();
        self.allows_terminal() && revenue_ok
    }

    /// Gate for saving the deal in place.
    pub fn allows_save(&self) -> bool {
        self.allows_forward()
    }

    /// Banner text for a blocked deal, `None` when nothing blocks.
    ///
    /// Order: date error, then revenue error on won deals, then missing fields.
    pub fn blocking_message(&self) -> Option<String> {
        if let Err(err) = &self.date_logic {
            return Some(err.to_string());
        }
        if self.requirements.stage == Stage::Won {
            if let Err(err) = &self.revenue {
                return Some(err.to_string());
            }
        }
        if !self.requirements.is_satisfied() {
            return Some(INCOMPLETE_FIELDS_MESSAGE.to_string());
        }
        None
    }

    /// First failure in save order: date logic, revenue, required fields.
    pub fn first_error(&self) -> Option<DealValidationError> {
        if let Err(err) = &self.date_logic {
            return Some(err.clone());
        }
        if self.requirements.stage == Stage::Won {
            if let Err(err) = &self.revenue {
                return Some(err.clone());
            }
        }
        self.requirements.clone().into_result().err()
    }
}

/// Eligibility decision with optional display detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutlook {
    pub current: Stage,
    pub eligible: BTreeSet<Stage>,
    /// Present only in `ValidationMode::Surfaced`.
    pub detail: Option<GateDetail>,
}

/// Display detail for a blocked or partially blocked deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDetail {
    pub missing_fields: Vec<DealField>,
    pub field_errors: BTreeMap<DealField, String>,
    pub blocking_message: Option<String>,
}

/// Eligible targets from an already evaluated gate.
fn eligible_from_gate(current: Stage, gate: &GateReport) -> BTreeSet<Stage> {
    let mut eligible: BTreeSet<Stage> = current.preceding().iter().copied().collect();

    if let Some(next) = current.next() {
        if gate.allows_forward() {
            eligible.insert(next);
        }
    }

    if current == Stage::Offered && gate.allows_terminal() {
        eligible.extend(Stage::TERMINAL);
    }

    eligible
}

/// Every stage `deal` may legally move to from its current stage.
pub fn eligible_targets(deal: &Deal) -> BTreeSet<Stage> {
    eligible_from_gate(deal.stage, &GateReport::evaluate(deal))
}

/// Returns whether `deal` may move to `target` now.
pub fn can_move(deal: &Deal, target: Stage) -> bool {
    eligible_targets(deal).contains(&target)
}

/// Returns whether `deal` may move to the next linear stage now.
pub fn can_advance(deal: &Deal) -> bool {
    match deal.stage.next() {
        Some(next) => can_move(deal, next),
        None => false,
    }
}

/// Eligibility with detail controlled by `mode`.
pub fn outlook(deal: &Deal, mode: ValidationMode) -> TransitionOutlook {
    let gate = GateReport::evaluate(deal);
    let eligible = eligible_from_gate(deal.stage, &gate);
    let detail = match mode {
        ValidationMode::Silent => None,
        ValidationMode::Surfaced => Some(GateDetail {
            field_errors: field_errors(deal, deal.stage),
            blocking_message: gate.blocking_message(),
            missing_fields: gate.requirements.missing,
        }),
    };
    TransitionOutlook {
        current: deal.stage,
        eligible,
        detail,
    }
}

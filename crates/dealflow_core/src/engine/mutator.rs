//! Deal record mutation.
//!
//! # Responsibility
//! - Produce the next deal version for an approved stage move or a save.
//! - Normalize the title and stamp modification metadata.
//!
//! # Invariants
//! - This is the only code path that writes `stage`.
//! - A move to a stage outside the eligible set fails with `IllegalTransition`.
//! - `modified_at` never moves backwards.
//! - The input deal is never mutated; a new value is returned.

use crate::engine::transition::{eligible_targets, GateReport};
use crate::model::deal::Deal;
use crate::model::stage::Stage;
use crate::rules::error::{DealValidationError, IllegalTransition};
use chrono::{DateTime, Utc};
use log::warn;

/// Title used when neither a title nor a project name is present.
pub const DEFAULT_UNTITLED_DEAL_NAME: &str = "Untitled Deal";

/// Title fallback chain: explicit title, project name, `placeholder`.
pub fn resolve_title(deal: &Deal, placeholder: &str) -> String {
    [deal.deal_name.as_deref(), deal.project_name.as_deref()]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

/// Stamps title and modification metadata on a deal version.
fn stamp(deal: &mut Deal, actor: Option<&str>, now: DateTime<Utc>, placeholder: &str) {
    deal.deal_name = Some(resolve_title(deal, placeholder));
    deal.modified_at = now.max(deal.modified_at);
    deal.modified_by = actor
        .map(str::to_string)
        .or_else(|| deal.created_by.clone());
}

/// Moves `deal` to `target` at the current instant.
///
/// See [`apply_transition_at`].
pub fn apply_transition(
    deal: &Deal,
    target: Stage,
    actor: Option<&str>,
) -> Result<Deal, IllegalTransition> {
    apply_transition_at(deal, target, actor, Utc::now(), DEFAULT_UNTITLED_DEAL_NAME)
}

/// Moves `deal` to `target`, stamping `now` and `actor`.
///
/// Performs no field validation beyond re-checking that `target` is in the
/// eligible set of the deal's current stage.
///
/// # Warning
/// Entering `Stage::Won` here skips the quarterly revenue reconciliation, so a
/// won deal whose quarters disagree with `amount` can be produced. Commit moves
/// to `Won` through `PipelineService::move_to`, which runs that check before
/// returning the new version.
///
/// # Errors
/// - Returns `IllegalTransition` when `target` is not eligible.
pub fn apply_transition_at(
    deal: &Deal,
    target: Stage,
    actor: Option<&str>,
    now: DateTime<Utc>,
    placeholder: &str,
) -> Result<Deal, IllegalTransition> {
    let eligible = eligible_targets(deal);
    if !eligible.contains(&target) {
        warn!(
            "event=stage_transition module=engine status=rejected deal_id={} from={} to={} eligible_count={}",
            deal.id,
            deal.stage,
            target,
            eligible.len()
        );
        return Err(IllegalTransition {
            current: deal.stage,
            requested: target,
            eligible,
        });
    }

    let mut next = deal.clone();
    next.stage = target;
    stamp(&mut next, actor, now, placeholder);
    Ok(next)
}

/// Prepares a save of `deal` in its current stage.
///
/// # Errors
/// - Returns the first failing check: date order, revenue (won deals),
///   then missing required fields.
pub fn prepare_save_at(
    deal: &Deal,
    actor: Option<&str>,
    now: DateTime<Utc>,
    placeholder: &str,
) -> Result<Deal, DealValidationError> {
    if let Some(err) = GateReport::evaluate(deal).first_error() {
        return Err(err);
    }
    let mut next = deal.clone();
    stamp(&mut next, actor, now, placeholder);
    Ok(next)
}

/// Prepares a save at the current instant. See [`prepare_save_at`].
pub fn prepare_save(deal: &Deal, actor: Option<&str>) -> Result<Deal, DealValidationError> {
    prepare_save_at(deal, actor, Utc::now(), DEFAULT_UNTITLED_DEAL_NAME)
}

#[cfg(test)]
mod tests {
    use super::{resolve_title, DEFAULT_UNTITLED_DEAL_NAME};
    use crate::model::deal::Deal;
    use crate::model::stage::Stage;

    #[test]
    fn title_prefers_explicit_then_project_then_placeholder() {
        let mut deal = Deal::new(Stage::Lead, "EUR");
        assert_eq!(resolve_title(&deal, DEFAULT_UNTITLED_DEAL_NAME), "Untitled Deal");

        deal.project_name = Some("Atlas".to_string());
        assert_eq!(resolve_title(&deal, DEFAULT_UNTITLED_DEAL_NAME), "Atlas");

        deal.deal_name = Some(String::new());
        assert_eq!(resolve_title(&deal, DEFAULT_UNTITLED_DEAL_NAME), "Atlas");

        deal.deal_name = Some("Atlas Renewal".to_string());
        assert_eq!(
            resolve_title(&deal, DEFAULT_UNTITLED_DEAL_NAME),
            "Atlas Renewal"
        );
    }
}

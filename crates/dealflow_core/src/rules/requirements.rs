//! Per-stage required field catalog.
//!
//! # Responsibility
//! - Declare which fields must be filled before a deal may leave a stage.
//! - Report missing fields, per-field messages and stage completion.
//! - Derive which fields are visible for a deal's progress.
//!
//! # Invariants
//! - Catalog lookups are pure and never touch a record.
//! - Required sets of different stages are disjoint.
//! - Every required field is owned by the stage that requires it.

use crate::model::deal::Deal;
use crate::model::field::DealField;
use crate::model::stage::Stage;
use crate::rules::error::DealValidationError;
use std::collections::BTreeMap;

const LEAD_REQUIRED: &[DealField] = &[
    DealField::ProjectName,
    DealField::CustomerName,
    DealField::LeadName,
    DealField::LeadOwner,
];

const DISCUSSIONS_REQUIRED: &[DealField] = &[
    DealField::CustomerNeedIdentified,
    DealField::NeedSummary,
    DealField::DecisionMakerPresent,
    DealField::CustomerAgreedOnNeed,
];

const QUALIFIED_REQUIRED: &[DealField] = &[
    DealField::NdaSigned,
    DealField::BudgetConfirmed,
    DealField::SupplierPortalAccess,
    DealField::ExpectedDealTimelineStart,
    DealField::ExpectedDealTimelineEnd,
    DealField::BudgetHolder,
    DealField::DecisionMakers,
];

const RFQ_REQUIRED: &[DealField] = &[
    DealField::RfqValue,
    DealField::RfqDocumentUrl,
    DealField::ProductServiceScope,
];

const OFFERED_REQUIRED: &[DealField] = &[
    DealField::ProposalSentDate,
    DealField::NegotiationStatus,
    DealField::DecisionExpectedDate,
];

const WON_REQUIRED: &[DealField] = &[DealField::WinReason, DealField::SignedContractDate];

const LOST_REQUIRED: &[DealField] = &[DealField::LossReason];

const DROPPED_REQUIRED: &[DealField] = &[DealField::DropReason];

/// Fields that must be non-empty before a deal may leave `stage`.
pub fn required_fields(stage: Stage) -> &'static [DealField] {
    match stage {
        Stage::Lead => LEAD_REQUIRED,
        Stage::Discussions => DISCUSSIONS_REQUIRED,
        Stage::Qualified => QUALIFIED_REQUIRED,
        Stage::Rfq => RFQ_REQUIRED,
        Stage::Offered => OFFERED_REQUIRED,
        Stage::Won => WON_REQUIRED,
        Stage::Lost => LOST_REQUIRED,
        Stage::Dropped => DROPPED_REQUIRED,
    }
}

/// Outcome of checking one stage's required fields against a deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementCheck {
    pub stage: Stage,
    /// Missing fields in catalog order.
    pub missing: Vec<DealField>,
}

impl RequirementCheck {
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }

    /// Human-readable summary, `None` when satisfied.
    pub fn message(&self) -> Option<String> {
        if self.is_satisfied() {
            return None;
        }
        let labels = self
            .missing
            .iter()
            .map(|field| field.label())
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "Please fill in all required fields for the {} stage: {labels}",
            self.stage
        ))
    }

    pub fn into_result(self) -> Result<(), DealValidationError> {
        if self.is_satisfied() {
            return Ok(());
        }
        Err(DealValidationError::MissingRequiredFields {
            stage: self.stage,
            fields: self.missing,
        })
    }
}

/// Checks `stage`'s required fields on `deal`.
pub fn check_requirements(deal: &Deal, stage: Stage) -> RequirementCheck {
    let missing = required_fields(stage)
        .iter()
        .copied()
        .filter(|field| !deal.field_value(*field).is_populated())
        .collect();
    RequirementCheck { stage, missing }
}

/// Returns whether every required field of `stage` is filled on `deal`.
pub fn is_satisfied(deal: &Deal, stage: Stage) -> bool {
    required_fields(stage)
        .iter()
        .all(|field| deal.field_value(*field).is_populated())
}

/// Per-field error messages for missing required fields of `stage`.
pub fn field_errors(deal: &Deal, stage: Stage) -> BTreeMap<DealField, String> {
    check_requirements(deal, stage)
        .missing
        .into_iter()
        .map(|field| (field, format!("{} is required", field.label())))
        .collect()
}

/// Required-field progress of a deal's current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCompletion {
    pub stage: Stage,
    pub filled: usize,
    pub total: usize,
}

impl StageCompletion {
    pub fn is_complete(&self) -> bool {
        self.filled == self.total
    }

    /// Whole-number percentage, 100 for stages without requirements.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        // filled <= total, so the ratio fits in u8.
        ((self.filled * 100) / self.total) as u8
    }
}

/// Completion status of the deal's current stage.
pub fn completion_status(deal: &Deal) -> StageCompletion {
    let required = required_fields(deal.stage);
    let filled = required
        .iter()
        .filter(|field| deal.field_value(**field).is_populated())
        .count();
    StageCompletion {
        stage: deal.stage,
        filled,
        total: required.len(),
    }
}

/// Fields owned by stages the deal has reached.
///
/// Linear deals see every linear stage up to and including the current one.
/// Terminal deals see the whole linear path plus their own terminal stage.
pub fn visible_fields(deal: &Deal) -> Vec<DealField> {
    let current = deal.stage;
    DealField::ALL
        .into_iter()
        .filter(|field| {
            let owner = field.owner_stage();
            owner == current || current.preceding().contains(&owner)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        check_requirements, completion_status, field_errors, required_fields, visible_fields,
    };
    use crate::model::deal::Deal;
    use crate::model::field::DealField;
    use crate::model::stage::Stage;
    use std::collections::HashSet;

    #[test]
    fn required_sets_are_disjoint_and_owned_by_their_stage() {
        let mut seen = HashSet::new();
        for stage in Stage::ALL {
            for field in required_fields(stage) {
                assert_eq!(field.owner_stage(), stage, "{field} owner mismatch");
                assert!(seen.insert(*field), "{field} required twice");
            }
        }
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut deal = Deal::new(Stage::Lead, "EUR");
        deal.project_name = Some(String::new());
        deal.customer_name = Some("Acme".to_string());
        deal.lead_name = Some("Jane".to_string());
        deal.lead_owner = Some("owner-1".to_string());

        let check = check_requirements(&deal, Stage::Lead);
        assert_eq!(check.missing, vec![DealField::ProjectName]);
        assert!(check
            .message()
            .expect("message for unsatisfied check")
            .contains("Project Name"));
    }

    #[test]
    fn field_errors_map_each_missing_field() {
        let deal = Deal::new(Stage::Lost, "EUR");
        let errors = field_errors(&deal, Stage::Lost);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(&DealField::LossReason).map(String::as_str),
            Some("Loss Reason is required")
        );
    }

    #[test]
    fn completion_counts_filled_required_fields() {
        let mut deal = Deal::new(Stage::Rfq, "EUR");
        deal.rfq_value = Some(0);
        let status = completion_status(&deal);
        assert_eq!(status.filled, 1);
        assert_eq!(status.total, 3);
        assert_eq!(status.percent(), 33);
        assert!(!status.is_complete());
    }

    #[test]
    fn terminal_visibility_excludes_sibling_terminal_fields() {
        let deal = Deal::new(Stage::Lost, "EUR");
        let fields = visible_fields(&deal);
        assert!(fields.contains(&DealField::ProjectName));
        assert!(fields.contains(&DealField::NegotiationNotes));
        assert!(fields.contains(&DealField::LossReason));
        assert!(!fields.contains(&DealField::WinReason));
        assert!(!fields.contains(&DealField::DropReason));
    }

    #[test]
    fn linear_visibility_stops_at_current_stage() {
        let deal = Deal::new(Stage::Discussions, "EUR");
        let fields = visible_fields(&deal);
        assert!(fields.contains(&DealField::LeadOwner));
        assert!(fields.contains(&DealField::NeedSummary));
        assert!(!fields.contains(&DealField::NdaSigned));
    }
}

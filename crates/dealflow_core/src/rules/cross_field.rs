//! Whole-record consistency checks.
//!
//! # Responsibility
//! - Enforce chronological order of declared date pairs.
//! - Reconcile quarterly revenue against the declared amount for won deals.
//!
//! # Invariants
//! - Validators are pure: no mutation, no I/O.
//! - A date rule is skipped unless both of its dates are populated.
//! - Revenue reconciliation is exact integer equality.

use crate::model::deal::Deal;
use crate::model::field::DealField;
use crate::model::stage::Stage;
use crate::rules::error::DealValidationError;

/// Declared "earlier must not be after later" relationship between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRule {
    pub earlier: DealField,
    pub later: DealField,
    pub message: &'static str,
}

/// Date pair rules in evaluation order.
pub const DATE_RULES: &[DateRule] = &[
    DateRule {
        earlier: DealField::ExpectedDealTimelineStart,
        later: DealField::ExpectedDealTimelineEnd,
        message: "Expected deal timeline end cannot be before its start",
    },
    DateRule {
        earlier: DealField::ProposalSentDate,
        later: DealField::DecisionExpectedDate,
        message: "Decision expected date cannot be before the proposal sent date",
    },
    DateRule {
        earlier: DealField::SignedContractDate,
        later: DealField::BeginExecutionDate,
        message: "Execution cannot begin before the contract was signed",
    },
];

impl DateRule {
    /// Checks this rule on `deal`; unpopulated dates pass.
    pub fn check(&self, deal: &Deal) -> Result<(), DealValidationError> {
        let earlier = deal.field_value(self.earlier).as_date();
        let later = deal.field_value(self.later).as_date();
        match (earlier, later) {
            (Some(earlier), Some(later)) if later < earlier => {
                Err(DealValidationError::DateOrderViolation {
                    earlier_field: self.earlier,
                    later_field: self.later,
                    earlier,
                    later,
                    message: self.message,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Returns the first violated date rule, if any.
pub fn validate_date_logic(deal: &Deal) -> Result<(), DealValidationError> {
    DATE_RULES.iter().try_for_each(|rule| rule.check(deal))
}

/// Reconciles `q1 + q2 + q3 + q4` with `amount` for won deals.
///
/// Deals outside `Won` always pass. An absent amount reconciles as zero.
pub fn validate_revenue_sum(deal: &Deal) -> Result<(), DealValidationError> {
    if deal.stage != Stage::Won {
        return Ok(());
    }
    let quarterly_sum = deal.quarterly_revenue_total();
    let amount = deal.amount.unwrap_or(0);
    if quarterly_sum != i128::from(amount) {
        return Err(DealValidationError::RevenueMismatch {
            quarterly_sum,
            amount,
        });
    }
    Ok(())
}

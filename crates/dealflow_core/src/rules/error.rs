//! Validation and transition error taxonomy.

use crate::model::field::DealField;
use crate::model::stage::Stage;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Requested target stage is not eligible from the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllegalTransition {
    pub current: Stage,
    pub requested: Stage,
    pub eligible: BTreeSet<Stage>,
}

impl Display for IllegalTransition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let eligible = self
            .eligible
            .iter()
            .map(|stage| stage.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "cannot move deal from {} to {}; eligible targets: [{}]",
            self.current, self.requested, eligible
        )
    }
}

impl Error for IllegalTransition {}

/// Deal validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealValidationError {
    /// Required fields of `stage` are empty.
    MissingRequiredFields {
        stage: Stage,
        fields: Vec<DealField>,
    },
    /// A populated date pair violates its ordering rule.
    DateOrderViolation {
        earlier_field: DealField,
        later_field: DealField,
        earlier: NaiveDate,
        later: NaiveDate,
        message: &'static str,
    },
    /// Quarterly revenue does not reconcile with the declared amount.
    RevenueMismatch { quarterly_sum: i128, amount: i64 },
    IllegalTransition(IllegalTransition),
}

impl Display for DealValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredFields { stage, fields } => {
                let labels = fields
                    .iter()
                    .map(|field| field.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "missing required fields for {stage} stage: {labels}")
            }
            Self::DateOrderViolation {
                earlier_field,
                later_field,
                earlier,
                later,
                message,
            } => write!(
                f,
                "{message} ({earlier_field}={earlier}, {later_field}={later})"
            ),
            Self::RevenueMismatch {
                quarterly_sum,
                amount,
            } => write!(
                f,
                "sum of quarterly revenue ({quarterly_sum}) must equal total contract value ({amount})"
            ),
            Self::IllegalTransition(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DealValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IllegalTransition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IllegalTransition> for DealValidationError {
    fn from(value: IllegalTransition) -> Self {
        Self::IllegalTransition(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{DealValidationError, IllegalTransition};
    use crate::model::field::DealField;
    use crate::model::stage::Stage;
    use std::collections::BTreeSet;

    #[test]
    fn revenue_message_names_both_values() {
        let err = DealValidationError::RevenueMismatch {
            quarterly_sum: 101,
            amount: 100,
        };
        let message = err.to_string();
        assert!(message.contains("101"));
        assert!(message.contains("100"));
    }

    #[test]
    fn missing_fields_message_uses_labels() {
        let err = DealValidationError::MissingRequiredFields {
            stage: Stage::Rfq,
            fields: vec![DealField::RfqValue, DealField::ProductServiceScope],
        };
        assert_eq!(
            err.to_string(),
            "missing required fields for RFQ stage: RFQ Value, Product/Service Scope"
        );
    }

    #[test]
    fn illegal_transition_lists_eligible_targets() {
        let err = IllegalTransition {
            current: Stage::Lead,
            requested: Stage::Qualified,
            eligible: BTreeSet::from([Stage::Discussions]),
        };
        assert_eq!(
            err.to_string(),
            "cannot move deal from Lead to Qualified; eligible targets: [Discussions]"
        );
    }
}

//! Typed field identifiers for deal records.
//!
//! # Responsibility
//! - Name every stage-scoped deal attribute with a closed enum.
//! - Describe which stage semantically owns each attribute.
//! - Provide a read-only typed view (`FieldValue`) used by rule checks.
//!
//! # Invariants
//! - Every field has exactly one owner stage.
//! - Emptiness: `None` and `""` are empty; numeric zero and `false` are not.

use crate::model::stage::Stage;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of one stage-scoped deal attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealField {
    // Lead
    ProjectName,
    CustomerName,
    LeadName,
    LeadOwner,
    // Discussions
    CustomerNeedIdentified,
    NeedSummary,
    DecisionMakerPresent,
    CustomerAgreedOnNeed,
    // Qualified
    NdaSigned,
    BudgetConfirmed,
    SupplierPortalAccess,
    SupplierPortalRequired,
    ExpectedDealTimelineStart,
    ExpectedDealTimelineEnd,
    BudgetHolder,
    DecisionMakers,
    // RFQ
    RfqValue,
    RfqDocumentUrl,
    ProductServiceScope,
    RfqConfirmationNote,
    // Offered
    ProposalSentDate,
    NegotiationStatus,
    DecisionExpectedDate,
    NegotiationNotes,
    // Won
    WinReason,
    SignedContractDate,
    ExecutionStarted,
    BeginExecutionDate,
    // Lost
    LossReason,
    // Dropped
    DropReason,
}

impl DealField {
    /// Every field in declaration order.
    pub const ALL: [DealField; 30] = [
        DealField::ProjectName,
        DealField::CustomerName,
        DealField::LeadName,
        DealField::LeadOwner,
        DealField::CustomerNeedIdentified,
        DealField::NeedSummary,
        DealField::DecisionMakerPresent,
        DealField::CustomerAgreedOnNeed,
        DealField::NdaSigned,
        DealField::BudgetConfirmed,
        DealField::SupplierPortalAccess,
        DealField::SupplierPortalRequired,
        DealField::ExpectedDealTimelineStart,
        DealField::ExpectedDealTimelineEnd,
        DealField::BudgetHolder,
        DealField::DecisionMakers,
        DealField::RfqValue,
        DealField::RfqDocumentUrl,
        DealField::ProductServiceScope,
        DealField::RfqConfirmationNote,
        DealField::ProposalSentDate,
        DealField::NegotiationStatus,
        DealField::DecisionExpectedDate,
        DealField::NegotiationNotes,
        DealField::WinReason,
        DealField::SignedContractDate,
        DealField::ExecutionStarted,
        DealField::BeginExecutionDate,
        DealField::LossReason,
        DealField::DropReason,
    ];

    /// Stage that semantically owns this field.
    pub fn owner_stage(self) -> Stage {
        match self {
            Self::ProjectName | Self::CustomerName | Self::LeadName | Self::LeadOwner => {
                Stage::Lead
            }
            Self::CustomerNeedIdentified
            | Self::NeedSummary
            | Self::DecisionMakerPresent
            | Self::CustomerAgreedOnNeed => Stage::Discussions,
            Self::NdaSigned
            | Self::BudgetConfirmed
            | Self::SupplierPortalAccess
            | Self::SupplierPortalRequired
            | Self::ExpectedDealTimelineStart
            | Self::ExpectedDealTimelineEnd
            | Self::BudgetHolder
            | Self::DecisionMakers => Stage::Qualified,
            Self::RfqValue
            | Self::RfqDocumentUrl
            | Self::ProductServiceScope
            | Self::RfqConfirmationNote => Stage::Rfq,
            Self::ProposalSentDate
            | Self::NegotiationStatus
            | Self::DecisionExpectedDate
            | Self::NegotiationNotes => Stage::Offered,
            Self::WinReason
            | Self::SignedContractDate
            | Self::ExecutionStarted
            | Self::BeginExecutionDate => Stage::Won,
            Self::LossReason => Stage::Lost,
            Self::DropReason => Stage::Dropped,
        }
    }

    /// Store column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectName => "project_name",
            Self::CustomerName => "customer_name",
            Self::LeadName => "lead_name",
            Self::LeadOwner => "lead_owner",
            Self::CustomerNeedIdentified => "customer_need_identified",
            Self::NeedSummary => "need_summary",
            Self::DecisionMakerPresent => "decision_maker_present",
            Self::CustomerAgreedOnNeed => "customer_agreed_on_need",
            Self::NdaSigned => "nda_signed",
            Self::BudgetConfirmed => "budget_confirmed",
            Self::SupplierPortalAccess => "supplier_portal_access",
            Self::SupplierPortalRequired => "supplier_portal_required",
            Self::ExpectedDealTimelineStart => "expected_deal_timeline_start",
            Self::ExpectedDealTimelineEnd => "expected_deal_timeline_end",
            Self::BudgetHolder => "budget_holder",
            Self::DecisionMakers => "decision_makers",
            Self::RfqValue => "rfq_value",
            Self::RfqDocumentUrl => "rfq_document_url",
            Self::ProductServiceScope => "product_service_scope",
            Self::RfqConfirmationNote => "rfq_confirmation_note",
            Self::ProposalSentDate => "proposal_sent_date",
            Self::NegotiationStatus => "negotiation_status",
            Self::DecisionExpectedDate => "decision_expected_date",
            Self::NegotiationNotes => "negotiation_notes",
            Self::WinReason => "win_reason",
            Self::SignedContractDate => "signed_contract_date",
            Self::ExecutionStarted => "execution_started",
            Self::BeginExecutionDate => "begin_execution_date",
            Self::LossReason => "loss_reason",
            Self::DropReason => "drop_reason",
        }
    }

    /// Human-readable label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::ProjectName => "Project Name",
            Self::CustomerName => "Customer Name",
            Self::LeadName => "Lead Name",
            Self::LeadOwner => "Lead Owner",
            Self::CustomerNeedIdentified => "Customer Need Identified",
            Self::NeedSummary => "Need Summary",
            Self::DecisionMakerPresent => "Decision Maker Present",
            Self::CustomerAgreedOnNeed => "Customer Agreed on Need",
            Self::NdaSigned => "NDA Signed",
            Self::BudgetConfirmed => "Budget Confirmed",
            Self::SupplierPortalAccess => "Supplier Portal Access",
            Self::SupplierPortalRequired => "Supplier Portal Required",
            Self::ExpectedDealTimelineStart => "Expected Deal Timeline Start",
            Self::ExpectedDealTimelineEnd => "Expected Deal Timeline End",
            Self::BudgetHolder => "Budget Holder",
            Self::DecisionMakers => "Decision Makers",
            Self::RfqValue => "RFQ Value",
            Self::RfqDocumentUrl => "RFQ Document URL",
            Self::ProductServiceScope => "Product/Service Scope",
            Self::RfqConfirmationNote => "RFQ Confirmation Note",
            Self::ProposalSentDate => "Proposal Sent Date",
            Self::NegotiationStatus => "Negotiation Status",
            Self::DecisionExpectedDate => "Decision Expected Date",
            Self::NegotiationNotes => "Negotiation Notes",
            Self::WinReason => "Win Reason",
            Self::SignedContractDate => "Signed Contract Date",
            Self::ExecutionStarted => "Execution Started",
            Self::BeginExecutionDate => "Begin Execution Date",
            Self::LossReason => "Loss Reason",
            Self::DropReason => "Drop Reason",
        }
    }
}

impl Display for DealField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed, typed value of one deal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Flag(Option<bool>),
    Money(Option<i64>),
    Date(Option<NaiveDate>),
}

impl FieldValue<'_> {
    /// Returns whether the value counts as filled in.
    pub fn is_populated(&self) -> bool {
        match self {
            Self::Text(value) => value.is_some_and(|text| !text.is_empty()),
            Self::Flag(value) => value.is_some(),
            Self::Money(value) => value.is_some(),
            Self::Date(value) => value.is_some(),
        }
    }

    /// Date payload when this is a populated date field.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(value) => *value,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DealField, FieldValue};
    use crate::model::stage::Stage;

    #[test]
    fn every_stage_owns_at_least_one_field() {
        for stage in Stage::ALL {
            assert!(
                DealField::ALL.iter().any(|field| field.owner_stage() == stage),
                "stage {stage} owns no fields"
            );
        }
    }

    #[test]
    fn empty_string_is_empty_but_zero_and_false_are_not() {
        assert!(!FieldValue::Text(Some("")).is_populated());
        assert!(!FieldValue::Text(None).is_populated());
        assert!(FieldValue::Text(Some(" ")).is_populated());
        assert!(FieldValue::Money(Some(0)).is_populated());
        assert!(FieldValue::Flag(Some(false)).is_populated());
        assert!(!FieldValue::Date(None).is_populated());
    }

    #[test]
    fn serde_name_matches_store_column() {
        for field in DealField::ALL {
            let json = serde_json::to_value(field).expect("serialize field");
            assert_eq!(json, field.as_str());
        }
    }
}

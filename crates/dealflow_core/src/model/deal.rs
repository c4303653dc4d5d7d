//! Deal domain model.
//!
//! # Responsibility
//! - Define the sparse deal record carried through the pipeline.
//! - Expose typed read access to stage-scoped fields via `DealField`.
//!
//! # Invariants
//! - `id` is stable and never nil.
//! - Quarterly revenue components are never null; absent input means zero.
//! - `stage` is written only by the engine mutator after creation.
//!
//! # See also
//! - `engine::mutator` for the only write path of `stage` and audit fields.

use crate::model::field::{DealField, FieldValue};
use crate::model::stage::Stage;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a deal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Uuid", into = "Uuid")]
pub struct DealId(Uuid);

impl DealId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an externally assigned id.
    ///
    /// # Errors
    /// - Returns `DealIdError::Nil` for the nil UUID.
    pub fn from_uuid(uuid: Uuid) -> Result<Self, DealIdError> {
        if uuid.is_nil() {
            return Err(DealIdError::Nil);
        }
        Ok(Self(uuid))
    }
}

impl Default for DealId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DealId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Uuid> for DealId {
    type Error = DealIdError;

    fn try_from(value: Uuid) -> Result<Self, Self::Error> {
        Self::from_uuid(value)
    }
}

impl From<DealId> for Uuid {
    fn from(value: DealId) -> Self {
        value.0
    }
}

/// Deal id construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealIdError {
    Nil,
}

impl Display for DealIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "deal id must not be nil"),
        }
    }
}

impl Error for DealIdError {}

/// Sales record moving through the stage pipeline.
///
/// Stage-scoped fields stay optional on every stage; a field is only
/// populated once the deal has visited its owner stage and is never cleared
/// by forward moves. Money values are integer minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub stage: Stage,
    /// Display title. Recomputed on every save and move.
    pub deal_name: Option<String>,

    pub project_name: Option<String>,
    pub customer_name: Option<String>,
    pub lead_name: Option<String>,
    pub lead_owner: Option<String>,

    pub customer_need_identified: Option<bool>,
    pub need_summary: Option<String>,
    pub decision_maker_present: Option<bool>,
    pub customer_agreed_on_need: Option<String>,

    pub nda_signed: Option<bool>,
    pub budget_confirmed: Option<String>,
    pub supplier_portal_access: Option<String>,
    pub supplier_portal_required: Option<bool>,
    pub expected_deal_timeline_start: Option<NaiveDate>,
    pub expected_deal_timeline_end: Option<NaiveDate>,
    pub budget_holder: Option<String>,
    pub decision_makers: Option<String>,

    pub rfq_value: Option<i64>,
    pub rfq_document_url: Option<String>,
    pub product_service_scope: Option<String>,
    pub rfq_confirmation_note: Option<String>,

    pub proposal_sent_date: Option<NaiveDate>,
    pub negotiation_status: Option<String>,
    pub decision_expected_date: Option<NaiveDate>,
    pub negotiation_notes: Option<String>,

    pub win_reason: Option<String>,
    pub signed_contract_date: Option<NaiveDate>,
    pub execution_started: Option<bool>,
    pub begin_execution_date: Option<NaiveDate>,

    pub loss_reason: Option<String>,
    pub drop_reason: Option<String>,

    /// Declared total value. Reconciled as zero when absent.
    pub amount: Option<i64>,
    /// ISO 4217 code, e.g. `EUR`.
    pub currency: String,
    #[serde(default)]
    pub quarterly_revenue_q1: i64,
    #[serde(default)]
    pub quarterly_revenue_q2: i64,
    #[serde(default)]
    pub quarterly_revenue_q3: i64,
    #[serde(default)]
    pub quarterly_revenue_q4: i64,

    pub internal_notes: Option<String>,
    /// Read-only linkage to the originating lead.
    pub related_lead_id: Option<Uuid>,
    /// Read-only linkage to the originating meeting.
    pub related_meeting_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_at: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl Deal {
    /// Creates a new deal at `stage` with a generated id.
    ///
    /// # Invariants
    /// - Quarterly revenue starts at zero.
    /// - `created_at == modified_at`.
    pub fn new(stage: Stage, currency: impl Into<String>) -> Self {
        Self::with_id(DealId::new(), stage, currency, Utc::now())
    }

    /// Creates a new deal with caller-provided identity and creation instant.
    ///
    /// Used by conversion paths (lead/meeting) where identity already exists.
    pub fn with_id(
        id: DealId,
        stage: Stage,
        currency: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            stage,
            deal_name: None,
            project_name: None,
            customer_name: None,
            lead_name: None,
            lead_owner: None,
            customer_need_identified: None,
            need_summary: None,
            decision_maker_present: None,
            customer_agreed_on_need: None,
            nda_signed: None,
            budget_confirmed: None,
            supplier_portal_access: None,
            supplier_portal_required: None,
            expected_deal_timeline_start: None,
            expected_deal_timeline_end: None,
            budget_holder: None,
            decision_makers: None,
            rfq_value: None,
            rfq_document_url: None,
            product_service_scope: None,
            rfq_confirmation_note: None,
            proposal_sent_date: None,
            negotiation_status: None,
            decision_expected_date: None,
            negotiation_notes: None,
            win_reason: None,
            signed_contract_date: None,
            execution_started: None,
            begin_execution_date: None,
            loss_reason: None,
            drop_reason: None,
            amount: None,
            currency: currency.into(),
            quarterly_revenue_q1: 0,
            quarterly_revenue_q2: 0,
            quarterly_revenue_q3: 0,
            quarterly_revenue_q4: 0,
            internal_notes: None,
            related_lead_id: None,
            related_meeting_id: None,
            created_at,
            created_by: None,
            modified_at: created_at,
            modified_by: None,
        }
    }

    /// Typed read access to one stage-scoped field.
    pub fn field_value(&self, field: DealField) -> FieldValue<'_> {
        match field {
            DealField::ProjectName => FieldValue::Text(self.project_name.as_deref()),
            DealField::CustomerName => FieldValue::Text(self.customer_name.as_deref()),
            DealField::LeadName => FieldValue::Text(self.lead_name.as_deref()),
            DealField::LeadOwner => FieldValue::Text(self.lead_owner.as_deref()),
            DealField::CustomerNeedIdentified => FieldValue::Flag(self.customer_need_identified),
            DealField::NeedSummary => FieldValue::Text(self.need_summary.as_deref()),
            DealField::DecisionMakerPresent => FieldValue::Flag(self.decision_maker_present),
            DealField::CustomerAgreedOnNeed => {
                FieldValue::Text(self.customer_agreed_on_need.as_deref())
            }
            DealField::NdaSigned => FieldValue::Flag(self.nda_signed),
            DealField::BudgetConfirmed => FieldValue::Text(self.budget_confirmed.as_deref()),
            DealField::SupplierPortalAccess => {
                FieldValue::Text(self.supplier_portal_access.as_deref())
            }
            DealField::SupplierPortalRequired => FieldValue::Flag(self.supplier_portal_required),
            DealField::ExpectedDealTimelineStart => {
                FieldValue::Date(self.expected_deal_timeline_start)
            }
            DealField::ExpectedDealTimelineEnd => FieldValue::Date(self.expected_deal_timeline_end),
            DealField::BudgetHolder => FieldValue::Text(self.budget_holder.as_deref()),
            DealField::DecisionMakers => FieldValue::Text(self.decision_makers.as_deref()),
            DealField::RfqValue => FieldValue::Money(self.rfq_value),
            DealField::RfqDocumentUrl => FieldValue::Text(self.rfq_document_url.as_deref()),
            DealField::ProductServiceScope => {
                FieldValue::Text(self.product_service_scope.as_deref())
            }
            DealField::RfqConfirmationNote => {
                FieldValue::Text(self.rfq_confirmation_note.as_deref())
            }
            DealField::ProposalSentDate => FieldValue::Date(self.proposal_sent_date),
            DealField::NegotiationStatus => FieldValue::Text(self.negotiation_status.as_deref()),
            DealField::DecisionExpectedDate => FieldValue::Date(self.decision_expected_date),
            DealField::NegotiationNotes => FieldValue::Text(self.negotiation_notes.as_deref()),
            DealField::WinReason => FieldValue::Text(self.win_reason.as_deref()),
            DealField::SignedContractDate => FieldValue::Date(self.signed_contract_date),
            DealField::ExecutionStarted => FieldValue::Flag(self.execution_started),
            DealField::BeginExecutionDate => FieldValue::Date(self.begin_execution_date),
            DealField::LossReason => FieldValue::Text(self.loss_reason.as_deref()),
            DealField::DropReason => FieldValue::Text(self.drop_reason.as_deref()),
        }
    }

    /// Sum of the four quarterly revenue components.
    ///
    /// Widened to `i128` so four `i64` components can never overflow.
    pub fn quarterly_revenue_total(&self) -> i128 {
        [
            self.quarterly_revenue_q1,
            self.quarterly_revenue_q2,
            self.quarterly_revenue_q3,
            self.quarterly_revenue_q4,
        ]
        .into_iter()
        .map(i128::from)
        .sum()
    }

    /// Returns whether the deal reached a terminal stage.
    pub fn is_closed(&self) -> bool {
        self.stage.is_terminal()
    }
}

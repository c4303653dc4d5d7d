#![allow(dead_code)]

use chrono::NaiveDate;
use dealflow_core::{Deal, Stage};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Fills every required field owned by `stage`.
pub fn fill_stage(deal: &mut Deal, stage: Stage) {
    match stage {
        Stage::Lead => {
            deal.project_name = Some("Atlas".to_string());
            deal.customer_name = Some("Acme GmbH".to_string());
            deal.lead_name = Some("Jane Roe".to_string());
            deal.lead_owner = Some("owner-1".to_string());
        }
        Stage::Discussions => {
            deal.customer_need_identified = Some(true);
            deal.need_summary = Some("Fleet telemetry".to_string());
            deal.decision_maker_present = Some(false);
            deal.customer_agreed_on_need = Some("Yes".to_string());
        }
        Stage::Qualified => {
            deal.nda_signed = Some(true);
            deal.budget_confirmed = Some("Yes".to_string());
            deal.supplier_portal_access = Some("Granted".to_string());
            deal.expected_deal_timeline_start = Some(date(2024, 1, 1));
            deal.expected_deal_timeline_end = Some(date(2024, 12, 31));
            deal.budget_holder = Some("CFO".to_string());
            deal.decision_makers = Some("CFO, CTO".to_string());
        }
        Stage::Rfq => {
            deal.rfq_value = Some(0);
            deal.rfq_document_url = Some("https://example.com/rfq.pdf".to_string());
            deal.product_service_scope = Some("Hardware and support".to_string());
        }
        Stage::Offered => {
            deal.proposal_sent_date = Some(date(2024, 1, 5));
            deal.negotiation_status = Some("Ongoing".to_string());
            deal.decision_expected_date = Some(date(2024, 1, 10));
        }
        Stage::Won => {
            deal.win_reason = Some("Best price".to_string());
            deal.signed_contract_date = Some(date(2024, 2, 1));
        }
        Stage::Lost => deal.loss_reason = Some("Competitor".to_string()),
        Stage::Dropped => deal.drop_reason = Some("Budget cut".to_string()),
    }
}

/// Deal at `stage` with every field of the whole pipeline filled.
pub fn complete_deal(stage: Stage) -> Deal {
    let mut deal = Deal::new(stage, "EUR");
    for owner in Stage::ALL {
        fill_stage(&mut deal, owner);
    }
    deal
}

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{complete_deal, fill_stage};
use dealflow_core::{
    apply_transition, apply_transition_at, prepare_save_at, Deal, DealValidationError, Stage,
    DEFAULT_UNTITLED_DEAL_NAME,
};
use std::collections::BTreeSet;

#[test]
fn skipping_discussions_is_illegal_even_when_fields_are_complete() {
    let deal = complete_deal(Stage::Lead);
    let err = apply_transition(&deal, Stage::Qualified, Some("user-1"))
        .expect_err("Lead -> Qualified must be rejected");

    assert_eq!(err.current, Stage::Lead);
    assert_eq!(err.requested, Stage::Qualified);
    assert_eq!(err.eligible, BTreeSet::from([Stage::Discussions]));
}

#[test]
fn approved_move_stamps_stage_title_and_metadata() {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let now = created + Duration::hours(3);
    let mut deal = Deal::new(Stage::Lead, "EUR");
    deal.created_at = created;
    deal.modified_at = created;
    fill_stage(&mut deal, Stage::Lead);

    let moved = apply_transition_at(
        &deal,
        Stage::Discussions,
        Some("user-2"),
        now,
        DEFAULT_UNTITLED_DEAL_NAME,
    )
    .expect("Lead -> Discussions should be allowed");

    assert_eq!(moved.stage, Stage::Discussions);
    assert_eq!(moved.deal_name.as_deref(), Some("Atlas"));
    assert_eq!(moved.modified_at, now);
    assert_eq!(moved.modified_by.as_deref(), Some("user-2"));
    assert_eq!(moved.id, deal.id);
    assert_eq!(deal.stage, Stage::Lead, "input snapshot is untouched");
}

#[test]
fn missing_actor_falls_back_to_creator() {
    let mut deal = Deal::new(Stage::Rfq, "EUR");
    deal.created_by = Some("creator-9".to_string());

    let moved = apply_transition(&deal, Stage::Lead, None).expect("backward move");
    assert_eq!(moved.modified_by.as_deref(), Some("creator-9"));
    assert_eq!(moved.deal_name.as_deref(), Some("Untitled Deal"));
}

#[test]
fn modified_at_never_moves_backwards() {
    let future = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut deal = Deal::new(Stage::Discussions, "EUR");
    deal.modified_at = future;

    let moved = apply_transition_at(&deal, Stage::Lead, None, earlier, "Untitled")
        .expect("backward move");
    assert_eq!(moved.modified_at, future);
}

#[test]
fn save_rejects_incomplete_stage_with_missing_fields() {
    let deal = Deal::new(Stage::Discussions, "EUR");
    let err = prepare_save_at(&deal, Some("user-1"), Utc::now(), "Untitled")
        .expect_err("incomplete deal must not save");
    match err {
        DealValidationError::MissingRequiredFields { stage, fields } => {
            assert_eq!(stage, Stage::Discussions);
            assert_eq!(fields.len(), 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn save_checks_revenue_before_missing_fields_on_won() {
    let mut deal = Deal::new(Stage::Won, "EUR");
    deal.amount = Some(100);
    let err = prepare_save_at(&deal, None, Utc::now(), "Untitled").expect_err("revenue mismatch");
    assert!(matches!(err, DealValidationError::RevenueMismatch { .. }));
}

#[test]
fn save_keeps_stage_and_stamps_title() {
    let mut deal = complete_deal(Stage::Offered);
    deal.deal_name = Some("Atlas Renewal".to_string());
    let saved = prepare_save_at(&deal, Some("user-3"), Utc::now(), "Untitled").expect("save");
    assert_eq!(saved.stage, Stage::Offered);
    assert_eq!(saved.deal_name.as_deref(), Some("Atlas Renewal"));
    assert_eq!(saved.modified_by.as_deref(), Some("user-3"));
}

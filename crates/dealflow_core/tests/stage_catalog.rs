use dealflow_core::{
    completion_status, required_fields, visible_fields, Deal, DealField, Stage,
};

#[test]
fn next_follows_fixed_linear_order() {
    let linear = [
        Stage::Lead,
        Stage::Discussions,
        Stage::Qualified,
        Stage::Rfq,
        Stage::Offered,
    ];
    assert_eq!(Stage::LINEAR, linear);
    for pair in linear.windows(2) {
        assert_eq!(pair[0].next(), Some(pair[1]));
    }
    assert_eq!(Stage::Offered.next(), None);
    for terminal in Stage::TERMINAL {
        assert_eq!(terminal.next(), None);
    }
}

#[test]
fn every_stage_has_required_fields() {
    for stage in Stage::ALL {
        assert!(!required_fields(stage).is_empty(), "{stage} has no requirements");
    }
}

#[test]
fn completion_and_visibility_follow_current_stage() {
    let mut deal = Deal::new(Stage::Won, "EUR");
    deal.win_reason = Some("Relationship".to_string());

    let status = completion_status(&deal);
    assert_eq!(status.stage, Stage::Won);
    assert_eq!((status.filled, status.total), (1, 2));

    let fields = visible_fields(&deal);
    assert!(fields.contains(&DealField::BeginExecutionDate));
    assert!(!fields.contains(&DealField::LossReason));
}

#[test]
fn deal_json_uses_store_names() {
    let deal = Deal::new(Stage::Rfq, "EUR");
    let json = serde_json::to_value(&deal).expect("serialize deal");
    assert_eq!(json["stage"], "RFQ");
    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["quarterly_revenue_q4"], 0);
    assert_eq!(json["id"], deal.id.to_string());

    let decoded: Deal = serde_json::from_value(json).expect("decode deal");
    assert_eq!(decoded, deal);
}

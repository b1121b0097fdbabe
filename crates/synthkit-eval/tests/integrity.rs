mod common;

use synthkit_core::{
    BusinessMetrics, ChargeStatus, Dataset, Stage, SubscriptionStatus,
};
use synthkit_eval::{check_integrity, validate_dataset_json};

use common::{charge, customer, invoice, linked_charge, plan, subscription};

fn consistent_dataset() -> Dataset {
    let customers = vec![customer("cus_a"), customer("cus_b")];
    let plans = vec![plan("plan_a", 2_900)];
    let subscriptions = vec![
        subscription("sub_a", "cus_a", "plan_a", SubscriptionStatus::Active, 2_900),
        subscription("sub_b", "cus_b", "plan_a", SubscriptionStatus::PastDue, 2_900),
    ];
    let invoices = vec![
        invoice("in_a", &subscriptions[0]),
        invoice("in_b", &subscriptions[1]),
    ];
    let charges = vec![
        linked_charge("ch_a", &invoices[0]),
        linked_charge("ch_b", &invoices[1]),
        charge("ch_c", "cus_b", 4_500, ChargeStatus::Succeeded),
    ];

    Dataset {
        business_type: "b2b-saas-subscriptions".to_string(),
        stage: Stage::Growth,
        seed: 42,
        currency: "usd".to_string(),
        customers,
        plans,
        subscriptions,
        invoices,
        charges,
        business_metrics: BusinessMetrics::default(),
        metrics: Vec::new(),
    }
}

#[test]
fn consistent_dataset_has_no_violations() {
    let dataset = consistent_dataset();
    let report = check_integrity(dataset.view());
    assert!(report.is_ok(), "unexpected violations: {:?}", report.violations);
    assert_eq!(report.checked, 10);
}

#[test]
fn dangling_references_are_reported() {
    let mut dataset = consistent_dataset();
    dataset.subscriptions[0].plan = "plan_missing".to_string();
    dataset.invoices[1].subscription = "sub_missing".to_string();
    dataset.charges[2].customer = "cus_missing".to_string();

    let report = check_integrity(dataset.view());
    let codes = report.codes();
    assert!(codes.contains(&"dangling_plan"));
    assert!(codes.contains(&"dangling_subscription"));
    assert!(codes.contains(&"dangling_customer"));

    let plan_violation = report
        .violations
        .iter()
        .find(|violation| violation.code == "dangling_plan")
        .expect("dangling plan violation");
    assert_eq!(plan_violation.path, "/subscriptions/0/plan");
    assert_eq!(plan_violation.row_index, Some(0));
}

#[test]
fn temporal_and_amount_rules_are_enforced() {
    let mut dataset = consistent_dataset();
    dataset.subscriptions[1].current_period_start = dataset.customers[1].created - 1;
    dataset.charges[0].created = dataset.invoices[0].created + 73 * 3_600;
    dataset.charges[1].amount += 1;
    dataset.invoices[0].amount_remaining = 1;

    let report = check_integrity(dataset.view());
    let codes = report.codes();
    assert!(codes.contains(&"period_before_customer"));
    assert!(codes.contains(&"settlement_window"));
    assert!(codes.contains(&"amount_mismatch"));
}

#[test]
fn duplicate_ids_and_customer_mismatch_are_reported() {
    let mut dataset = consistent_dataset();
    dataset.customers[1].id = "cus_a".to_string();
    dataset.charges[0].customer = "cus_b".to_string();

    let report = check_integrity(dataset.view());
    let codes = report.codes();
    assert!(codes.contains(&"duplicate_id"));
    assert!(codes.contains(&"customer_mismatch"));
}

#[test]
fn refunds_and_disputes_need_a_succeeded_charge() {
    let mut dataset = consistent_dataset();
    dataset.charges[2].status = ChargeStatus::Failed;
    dataset.charges[2].paid = false;
    dataset.charges[2].amount_refunded = 1_000;

    let report = check_integrity(dataset.view());
    assert_eq!(report.codes(), vec!["adjustment_on_unpaid_charge"]);
    assert_eq!(report.violations[0].path, "/charges/2/status");

    dataset.charges[2].amount_refunded = 0;
    dataset.charges[2].disputed = true;
    assert_eq!(
        check_integrity(dataset.view()).codes(),
        vec!["adjustment_on_unpaid_charge"]
    );
}

#[test]
fn serialized_dataset_matches_json_schema() {
    let dataset = consistent_dataset();
    let json = serde_json::to_value(&dataset).expect("serialize dataset");
    let violations = validate_dataset_json(&json).expect("schema compiles");
    assert!(violations.is_empty(), "schema violations: {violations:?}");
}

#[test]
fn malformed_dataset_json_is_rejected() {
    let dataset = consistent_dataset();
    let mut json = serde_json::to_value(&dataset).expect("serialize dataset");
    json["stage"] = serde_json::json!("hypergrowth");
    json["customers"][0]["created"] = serde_json::json!("yesterday");

    let violations = validate_dataset_json(&json).expect("schema compiles");
    assert!(violations.len() >= 2);
    assert!(violations.iter().all(|violation| violation.code == "schema_violation"));
}

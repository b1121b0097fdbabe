use synthkit_core::{BusinessTypeRegistry, Charge, Stage};
use synthkit_eval::check_integrity;
use synthkit_generate::{
    GenerateOptions, GenerationEngine, GenerationError, GenerationRequest, MAX_POOL_SIZE,
    RequestedCounts, generate_dataset,
};

fn counts(customers: i64, subscriptions: i64, invoices: i64, charges: i64) -> RequestedCounts {
    RequestedCounts {
        customers: Some(customers),
        plans: None,
        subscriptions: Some(subscriptions),
        invoices: Some(invoices),
        charges: Some(charges),
    }
}

#[test]
fn b2b_saas_growth_dataset_is_relational() {
    let registry = BusinessTypeRegistry::builtin();
    let dataset = generate_dataset(
        &registry,
        "b2b-saas-subscriptions",
        Stage::Growth,
        12345,
        Some(counts(25, 15, 20, 40)),
    )
    .expect("generate dataset");

    assert_eq!(dataset.customers.len(), 25);
    assert_eq!(dataset.subscriptions.len(), 15);
    assert_eq!(dataset.invoices.len(), 20);
    assert_eq!(dataset.charges.len(), 40);
    assert_eq!(dataset.business_type, "b2b-saas-subscriptions");
    for subscription in &dataset.subscriptions {
        assert!(
            dataset
                .customers
                .iter()
                .any(|customer| customer.id == subscription.customer)
        );
    }
    assert!(dataset.business_metrics.monthly_recurring_revenue > 0.0);

    let report = check_integrity(dataset.view());
    assert!(report.is_ok(), "violations: {:?}", report.violations);
}

#[test]
fn same_request_serializes_identically() {
    let registry = BusinessTypeRegistry::builtin();
    let generate = || {
        generate_dataset(
            &registry,
            "b2b-saas-subscriptions",
            Stage::Growth,
            12345,
            Some(counts(25, 15, 20, 40)),
        )
        .expect("generate dataset")
    };

    let first = serde_json::to_string(&generate()).expect("serialize");
    let second = serde_json::to_string(&generate()).expect("serialize");
    assert_eq!(first, second);

    let other = generate_dataset(
        &registry,
        "b2b-saas-subscriptions",
        Stage::Growth,
        12346,
        Some(counts(25, 15, 20, 40)),
    )
    .expect("generate dataset");
    assert_ne!(first, serde_json::to_string(&other).expect("serialize"));
}

#[test]
fn ecommerce_without_subscriptions_generates_one_time_charges() {
    let registry = BusinessTypeRegistry::builtin();
    let dataset = generate_dataset(
        &registry,
        "checkout-ecommerce",
        Stage::Early,
        1,
        Some(counts(5, 0, 0, 10)),
    )
    .expect("generate dataset");

    assert_eq!(dataset.customers.len(), 5);
    assert!(dataset.subscriptions.is_empty());
    assert!(dataset.invoices.is_empty());
    assert_eq!(dataset.charges.len(), 10);
    assert!(dataset.charges.iter().all(Charge::is_one_time));
    assert!(
        dataset
            .metrics
            .iter()
            .all(|card| card.id != "monthlyRecurringRevenue")
    );
}

#[test]
fn every_business_type_and_stage_passes_integrity() {
    let registry = BusinessTypeRegistry::builtin();
    let reference = GenerateOptions::default().reference_time.timestamp();
    let mut keys: Vec<String> = registry.keys().map(str::to_string).collect();
    keys.push("default".to_string());

    for key in &keys {
        for stage in Stage::ALL {
            let dataset = generate_dataset(&registry, key, stage, 2024, None)
                .unwrap_or_else(|err| panic!("{key}/{stage}: {err}"));
            let report = check_integrity(dataset.view());
            assert!(report.is_ok(), "{key}/{stage}: {:?}", report.violations);

            let customers = 20 * stage.count_multiplier() as usize;
            assert_eq!(dataset.customers.len(), customers, "{key}/{stage}");
            assert!(dataset.charges.iter().all(|charge| charge.created <= reference));
            assert!(dataset.customers.iter().all(|customer| customer.created <= reference));
            assert!(
                dataset
                    .charges
                    .iter()
                    .all(|charge| charge.amount_refunded <= charge.amount)
            );
        }
    }
}

#[test]
fn capabilities_gate_generated_fields() {
    let registry = BusinessTypeRegistry::builtin();
    let dataset = generate_dataset(&registry, "usage-based-api", Stage::Enterprise, 77, None)
        .expect("generate dataset");

    assert!(dataset.charges.iter().all(|charge| !charge.disputed));
    assert!(
        dataset
            .charges
            .iter()
            .all(|charge| charge.outcome.risk_score.is_none())
    );
    assert!(
        dataset
            .charges
            .iter()
            .all(|charge| charge.payment_method_details.card.three_d_secure.is_none())
    );
}

#[test]
fn amounts_scale_with_stage_record_by_record() {
    let registry = BusinessTypeRegistry::builtin();
    let fixed = RequestedCounts {
        customers: Some(12),
        plans: Some(5),
        subscriptions: Some(10),
        invoices: Some(15),
        charges: Some(30),
    };
    let datasets: Vec<_> = Stage::ALL
        .iter()
        .map(|stage| {
            generate_dataset(&registry, "b2b-saas-subscriptions", *stage, 9, Some(fixed))
                .expect("generate dataset")
        })
        .collect();

    for pair in datasets.windows(2) {
        let (lower, higher) = (&pair[0], &pair[1]);
        assert_eq!(lower.charges.len(), higher.charges.len());
        for (small, large) in lower.plans.iter().zip(&higher.plans) {
            assert!(large.amount >= small.amount, "plan {}", small.id);
        }
        for (small, large) in lower.subscriptions.iter().zip(&higher.subscriptions) {
            assert!(large.amount >= small.amount, "subscription {}", small.id);
        }
        for (small, large) in lower.invoices.iter().zip(&higher.invoices) {
            assert!(large.amount_due >= small.amount_due, "invoice {}", small.id);
        }
        for (small, large) in lower.charges.iter().zip(&higher.charges) {
            assert_eq!(small.invoice.is_some(), large.invoice.is_some());
            assert!(large.amount >= small.amount, "charge {}", small.id);
        }
    }

    let early = &datasets[0];
    assert!(early.charges.iter().any(|charge| charge.invoice.is_some()));
    assert!(early.charges.iter().any(|charge| charge.invoice.is_none()));
}

#[test]
fn default_counts_scale_with_stage() {
    let registry = BusinessTypeRegistry::builtin();
    let early = generate_dataset(&registry, "b2c-subscription-app", Stage::Early, 3, None)
        .expect("generate dataset");
    let enterprise =
        generate_dataset(&registry, "b2c-subscription-app", Stage::Enterprise, 3, None)
            .expect("generate dataset");

    assert_eq!(early.customers.len(), 20);
    assert_eq!(enterprise.customers.len(), 80);
    assert_eq!(early.charges.len(), 40);
    assert_eq!(enterprise.charges.len(), 160);
}

#[test]
fn unknown_business_type_falls_back_to_default() {
    let registry = BusinessTypeRegistry::builtin();
    let dataset = generate_dataset(&registry, "quantum-bakery", Stage::Growth, 5, None)
        .expect("generate dataset");
    assert_eq!(dataset.business_type, "default");
    assert_eq!(dataset.currency, "usd");
    assert!(!dataset.customers.is_empty());
}

#[test]
fn zero_counts_produce_empty_pools() {
    let registry = BusinessTypeRegistry::builtin();
    let empty = RequestedCounts {
        customers: Some(0),
        plans: Some(0),
        subscriptions: Some(0),
        invoices: Some(0),
        charges: Some(0),
    };
    let dataset = generate_dataset(&registry, "creator-platform", Stage::Growth, 8, Some(empty))
        .expect("generate dataset");
    assert!(dataset.customers.is_empty());
    assert!(dataset.charges.is_empty());
    assert_eq!(dataset.business_metrics.gross_payment_volume, 0.0);
    assert_eq!(dataset.business_metrics.payment_success_rate, 0.0);
}

#[test]
fn negative_counts_are_rejected() {
    let registry = BusinessTypeRegistry::builtin();
    let result = generate_dataset(
        &registry,
        "b2b-saas-subscriptions",
        Stage::Growth,
        1,
        Some(counts(-1, 0, 0, 0)),
    );
    assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));
}

#[test]
fn oversized_counts_are_rejected() {
    let registry = BusinessTypeRegistry::builtin();
    let result = generate_dataset(
        &registry,
        "b2b-saas-subscriptions",
        Stage::Growth,
        1,
        Some(RequestedCounts {
            customers: Some(1),
            plans: Some(1),
            subscriptions: Some(1 << 60),
            invoices: Some(0),
            charges: Some(0),
        }),
    );
    assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));

    let over = i64::try_from(MAX_POOL_SIZE).expect("limit fits in i64") + 1;
    let result = generate_dataset(
        &registry,
        "checkout-ecommerce",
        Stage::Early,
        1,
        Some(counts(over, 0, 0, 0)),
    );
    assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));
}

#[test]
fn dependent_pools_require_parents() {
    let registry = BusinessTypeRegistry::builtin();

    let no_customers = generate_dataset(
        &registry,
        "b2b-saas-subscriptions",
        Stage::Growth,
        1,
        Some(counts(0, 0, 0, 5)),
    );
    assert!(matches!(
        no_customers,
        Err(GenerationError::InconsistentState(_))
    ));

    let no_plans = generate_dataset(
        &registry,
        "b2b-saas-subscriptions",
        Stage::Growth,
        1,
        Some(RequestedCounts {
            customers: Some(3),
            plans: Some(0),
            subscriptions: Some(2),
            invoices: Some(0),
            charges: Some(0),
        }),
    );
    assert!(matches!(no_plans, Err(GenerationError::InconsistentState(_))));

    let no_subscriptions = generate_dataset(
        &registry,
        "b2b-saas-subscriptions",
        Stage::Growth,
        1,
        Some(counts(3, 0, 4, 0)),
    );
    assert!(matches!(
        no_subscriptions,
        Err(GenerationError::InconsistentState(_))
    ));
}

#[test]
fn engine_assembles_records_without_metrics() {
    let registry = BusinessTypeRegistry::builtin();
    let engine = GenerationEngine::new(&registry, GenerateOptions::default());
    let request = GenerationRequest::new("Food Delivery Platform", Stage::Early, 11)
        .with_counts(counts(4, 3, 3, 6));

    let records = engine.assemble(&request).expect("assemble records");
    assert_eq!(records.business_type, "food-delivery-platform");
    assert!(!records.fallback);
    assert_eq!(records.counts.customers, 4);
    assert_eq!(records.charges.len(), 6);

    let dataset = engine.generate(&request).expect("generate dataset");
    assert_eq!(dataset.customers, records.customers);
    assert_eq!(dataset.charges, records.charges);
}

#[test]
fn negative_seeds_are_supported() {
    let registry = BusinessTypeRegistry::builtin();
    let dataset = generate_dataset(&registry, "nonprofit-donations", Stage::Early, -7, None)
        .expect("generate dataset");
    assert_eq!(dataset.seed, -7);
    assert!(check_integrity(dataset.view()).is_ok());
}

#[test]
fn fingerprint_covers_counts_and_reference_time() {
    let options = GenerateOptions::default();
    let base = GenerationRequest::new("b2b-saas-subscriptions", Stage::Growth, 42);
    let small = base.clone().with_counts(counts(5, 0, 0, 0));
    let large = base.clone().with_counts(counts(50, 0, 0, 0));

    let small_print = small.fingerprint(&options).expect("fingerprint");
    assert_eq!(small_print, small.clone().fingerprint(&options).expect("fingerprint"));
    assert_ne!(small_print, large.fingerprint(&options).expect("fingerprint"));
    assert_eq!(small_print["counts"]["customers"], 5);
    assert_eq!(small_print["reference_time"], "2024-06-01T00:00:00Z");

    let shifted = GenerateOptions {
        reference_time: options.reference_time + chrono::Duration::days(1),
    };
    assert_ne!(small_print, small.fingerprint(&shifted).expect("fingerprint"));
}

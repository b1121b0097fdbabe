use std::collections::BTreeMap;

use synthkit_core::{
    BusinessTypeRegistry, Capability, DEFAULT_BUSINESS_TYPE, Error, Stage,
};

#[test]
fn builtin_registry_resolves_known_business_types() {
    let registry = BusinessTypeRegistry::builtin();

    let resolved = registry.resolve("b2b-saas-subscriptions");
    assert_eq!(resolved.key, "b2b-saas-subscriptions");
    assert!(!resolved.fallback);
    assert!(resolved.profile.availability.subscriptions);
}

#[test]
fn unknown_business_type_falls_back_to_default_profile() {
    let registry = BusinessTypeRegistry::builtin();

    let resolved = registry.resolve("interplanetary-logistics");
    assert_eq!(resolved.key, DEFAULT_BUSINESS_TYPE);
    assert!(resolved.fallback);
    assert_eq!(resolved.profile, registry.default_profile());
}

#[test]
fn resolve_normalizes_the_requested_key() {
    let registry = BusinessTypeRegistry::builtin();

    let resolved = registry.resolve(" Checkout_Ecommerce ");
    assert_eq!(resolved.key, "checkout-ecommerce");
    assert!(!resolved.fallback);
}

#[test]
fn checkout_ecommerce_has_no_subscription_metrics() {
    let registry = BusinessTypeRegistry::builtin();
    let availability = registry.availability("checkout-ecommerce");

    assert!(!availability.allows(Capability::Subscriptions));
    assert!(availability.allows(Capability::Refunds));
}

#[test]
fn registry_round_trips_through_json() {
    let registry = BusinessTypeRegistry::builtin();
    let json = registry.to_json_pretty().expect("serialize registry");

    let loaded = BusinessTypeRegistry::from_json_str(&json).expect("load registry");
    assert_eq!(loaded, registry);
}

#[test]
fn edited_registry_json_changes_availability_without_code_changes() {
    let registry = BusinessTypeRegistry::builtin();
    let mut json: serde_json::Value =
        serde_json::from_str(&registry.to_json_pretty().expect("serialize registry"))
            .expect("parse registry json");

    json["profiles"]["checkout-ecommerce"]["availability"]["subscriptions"] =
        serde_json::Value::Bool(true);

    let edited = BusinessTypeRegistry::from_json_str(&json.to_string()).expect("load edited");
    assert!(edited.availability("checkout-ecommerce").subscriptions);
}

#[test]
fn registry_rejects_inverted_amount_ranges() {
    let registry = BusinessTypeRegistry::builtin();
    let mut profile = registry.default_profile().clone();
    profile.amounts.one_time.min = 900.0;
    profile.amounts.one_time.max = 10.0;

    let mut profiles = BTreeMap::new();
    profiles.insert("broken".to_string(), profile);

    let result = BusinessTypeRegistry::new(registry.default_profile().clone(), profiles);
    assert!(matches!(result, Err(Error::Registry(_))));
}

#[test]
fn registry_rejects_reserved_default_key() {
    let registry = BusinessTypeRegistry::builtin();
    let mut profiles = BTreeMap::new();
    profiles.insert(
        DEFAULT_BUSINESS_TYPE.to_string(),
        registry.default_profile().clone(),
    );

    let result = BusinessTypeRegistry::new(registry.default_profile().clone(), profiles);
    assert!(matches!(result, Err(Error::Registry(_))));
}

#[test]
fn stage_multipliers_are_strictly_increasing() {
    let [early, growth, enterprise] = Stage::ALL;

    assert!(early.amount_multiplier() < growth.amount_multiplier());
    assert!(growth.amount_multiplier() < enterprise.amount_multiplier());
    assert!(early.count_multiplier() < growth.count_multiplier());
    assert!(growth.count_multiplier() < enterprise.count_multiplier());
}

#[test]
fn stage_parsing_rejects_unknown_values() {
    assert_eq!("Enterprise".parse::<Stage>().expect("parse"), Stage::Enterprise);
    assert!(matches!(
        "seed-round".parse::<Stage>(),
        Err(Error::InvalidArgument(_))
    ));
}

use std::collections::BTreeMap;

use crate::entities::PlanInterval;

use super::{
    AmountRange, AmountRanges, Audience, BusinessProfile, BusinessTypeRegistry,
    MetricAvailability, PlanTemplate, ProfileRates, PropertySpec,
};

pub(super) fn registry() -> BusinessTypeRegistry {
    let mut profiles = BTreeMap::new();
    profiles.insert("b2b-saas-subscriptions".to_string(), b2b_saas());
    profiles.insert("checkout-ecommerce".to_string(), checkout_ecommerce());
    profiles.insert("food-delivery-platform".to_string(), food_delivery());
    profiles.insert("marketplace-platform".to_string(), marketplace());
    profiles.insert("usage-based-api".to_string(), usage_based_api());
    profiles.insert("creator-platform".to_string(), creator_platform());
    profiles.insert("nonprofit-donations".to_string(), nonprofit_donations());
    profiles.insert("b2c-subscription-app".to_string(), b2c_subscription_app());

    BusinessTypeRegistry {
        default_profile: default_profile(),
        profiles,
    }
}

fn default_profile() -> BusinessProfile {
    BusinessProfile {
        label: "General Business".to_string(),
        audience: Audience::B2c,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(20.0, 200.0),
            one_time: AmountRange::new(10.0, 500.0),
        },
        plans: templates(&[
            ("Starter", PlanInterval::Month),
            ("Standard", PlanInterval::Month),
            ("Plus", PlanInterval::Month),
            ("Premium", PlanInterval::Month),
            ("Premium Annual", PlanInterval::Year),
        ]),
        company_stems: Vec::new(),
        descriptions: strings(&[
            "Standard service fee",
            "Product purchase",
            "Service package",
            "Monthly membership",
            "Custom order",
        ]),
        properties: vec![property(
            "acquisition_channel",
            &["organic", "paid_search", "referral", "social", "email"],
        )],
        availability: MetricAvailability::ALL,
        rates: ProfileRates {
            one_time_charge_rate: 0.30,
            success_rate: 0.92,
            refund_rate: 0.04,
            dispute_rate: 0.006,
            base_conversion_rate: 0.03,
        },
    }
}

fn b2b_saas() -> BusinessProfile {
    BusinessProfile {
        label: "B2B SaaS".to_string(),
        audience: Audience::B2b,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(49.0, 2000.0),
            one_time: AmountRange::new(500.0, 5000.0),
        },
        plans: templates(&[
            ("Starter", PlanInterval::Month),
            ("Team", PlanInterval::Month),
            ("Business", PlanInterval::Month),
            ("Business Annual", PlanInterval::Year),
            ("Enterprise", PlanInterval::Month),
        ]),
        company_stems: strings(&[
            "Cloud", "Data", "Stack", "Pipeline", "Vector", "Signal", "Beacon", "Atlas",
            "Northwind", "Bluefin", "Keystone", "Lattice",
        ]),
        descriptions: strings(&[
            "Onboarding and implementation package",
            "Professional services hours",
            "Additional seat pack",
            "Premium support add-on",
            "Data migration service",
        ]),
        properties: vec![
            property(
                "industry",
                &["fintech", "healthcare", "logistics", "retail", "media", "education"],
            ),
            property("company_size", &["1-10", "11-50", "51-200", "201-1000", "1000+"]),
            property("billing_contact_role", &["finance", "operations", "engineering"]),
        ],
        availability: MetricAvailability {
            subscriptions: true,
            radar: true,
            disputes: true,
            refunds: true,
            authentication: false,
        },
        rates: ProfileRates {
            one_time_charge_rate: 0.30,
            success_rate: 0.95,
            refund_rate: 0.02,
            dispute_rate: 0.003,
            base_conversion_rate: 0.035,
        },
    }
}

fn checkout_ecommerce() -> BusinessProfile {
    BusinessProfile {
        label: "Checkout E-commerce".to_string(),
        audience: Audience::B2c,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(10.0, 50.0),
            one_time: AmountRange::new(15.0, 250.0),
        },
        plans: Vec::new(),
        company_stems: Vec::new(),
        descriptions: strings(&[
            "Order: wireless headphones",
            "Order: running shoes",
            "Order: ceramic cookware set",
            "Order: organic skincare bundle",
            "Order: denim jacket",
            "Order: smart home starter kit",
        ]),
        properties: vec![
            property("loyalty_tier", &["none", "silver", "gold", "platinum"]),
            property(
                "preferred_category",
                &["electronics", "apparel", "home", "beauty", "outdoor"],
            ),
        ],
        availability: MetricAvailability {
            subscriptions: false,
            radar: true,
            disputes: true,
            refunds: true,
            authentication: true,
        },
        rates: ProfileRates {
            one_time_charge_rate: 1.0,
            success_rate: 0.90,
            refund_rate: 0.06,
            dispute_rate: 0.008,
            base_conversion_rate: 0.025,
        },
    }
}

fn food_delivery() -> BusinessProfile {
    BusinessProfile {
        label: "Food Delivery Platform".to_string(),
        audience: Audience::B2c,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(9.99, 19.99),
            one_time: AmountRange::new(12.0, 85.0),
        },
        plans: templates(&[
            ("Delivery Pass", PlanInterval::Month),
            ("Delivery Pass Annual", PlanInterval::Year),
        ]),
        company_stems: Vec::new(),
        descriptions: strings(&[
            "Order from Golden Wok",
            "Order from Bella Pasta",
            "Order from Taqueria Sol",
            "Order from Green Bowl",
            "Grocery delivery",
            "Late night snacks",
        ]),
        properties: vec![
            property(
                "favorite_cuisine",
                &["italian", "mexican", "chinese", "indian", "thai", "american"],
            ),
            property("delivery_zone", &["downtown", "midtown", "uptown", "suburbs"]),
        ],
        availability: MetricAvailability::ALL,
        rates: ProfileRates {
            one_time_charge_rate: 0.70,
            success_rate: 0.93,
            refund_rate: 0.05,
            dispute_rate: 0.004,
            base_conversion_rate: 0.045,
        },
    }
}

fn marketplace() -> BusinessProfile {
    BusinessProfile {
        label: "Marketplace Platform".to_string(),
        audience: Audience::B2c,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(29.0, 299.0),
            one_time: AmountRange::new(20.0, 800.0),
        },
        plans: templates(&[
            ("Seller Basic", PlanInterval::Month),
            ("Seller Pro", PlanInterval::Month),
            ("Seller Premier", PlanInterval::Month),
        ]),
        company_stems: Vec::new(),
        descriptions: strings(&[
            "Marketplace purchase: vintage lamp",
            "Marketplace purchase: handmade rug",
            "Marketplace purchase: refurbished laptop",
            "Marketplace purchase: concert tickets",
            "Marketplace booking: weekend rental",
        ]),
        properties: vec![
            property("account_type", &["buyer", "seller", "both"]),
            property("verification", &["unverified", "email", "identity"]),
        ],
        availability: MetricAvailability::ALL,
        rates: ProfileRates {
            one_time_charge_rate: 0.60,
            success_rate: 0.91,
            refund_rate: 0.05,
            dispute_rate: 0.009,
            base_conversion_rate: 0.03,
        },
    }
}

fn usage_based_api() -> BusinessProfile {
    BusinessProfile {
        label: "Usage-based API".to_string(),
        audience: Audience::B2b,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(20.0, 1500.0),
            one_time: AmountRange::new(50.0, 5000.0),
        },
        plans: templates(&[
            ("Developer", PlanInterval::Month),
            ("Growth", PlanInterval::Month),
            ("Scale", PlanInterval::Month),
            ("Scale Annual", PlanInterval::Year),
        ]),
        company_stems: strings(&[
            "Byte", "Query", "Relay", "Edge", "Quantum", "Packet", "Kernel", "Render",
        ]),
        descriptions: strings(&[
            "API usage overage",
            "Prepaid request credits",
            "Dedicated throughput reservation",
            "Additional storage block",
        ]),
        properties: vec![
            property("primary_sdk", &["python", "node", "go", "rust", "java"]),
            property("monthly_requests", &["<1M", "1M-10M", "10M-100M", "100M+"]),
        ],
        availability: MetricAvailability {
            subscriptions: true,
            radar: false,
            disputes: false,
            refunds: true,
            authentication: false,
        },
        rates: ProfileRates {
            one_time_charge_rate: 0.20,
            success_rate: 0.96,
            refund_rate: 0.02,
            dispute_rate: 0.001,
            base_conversion_rate: 0.05,
        },
    }
}

fn creator_platform() -> BusinessProfile {
    BusinessProfile {
        label: "Creator Platform".to_string(),
        audience: Audience::B2c,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(5.0, 50.0),
            one_time: AmountRange::new(3.0, 100.0),
        },
        plans: templates(&[
            ("Supporter", PlanInterval::Month),
            ("Insider", PlanInterval::Month),
            ("Patron", PlanInterval::Month),
            ("Patron Annual", PlanInterval::Year),
        ]),
        company_stems: Vec::new(),
        descriptions: strings(&[
            "One-time tip",
            "Exclusive video pack",
            "Digital art download",
            "Live stream ticket",
            "Merch pre-order",
        ]),
        properties: vec![
            property("creator_category", &["music", "podcast", "art", "writing", "gaming"]),
            property("fan_since", &["2021", "2022", "2023", "2024"]),
        ],
        availability: MetricAvailability {
            subscriptions: true,
            radar: true,
            disputes: true,
            refunds: true,
            authentication: false,
        },
        rates: ProfileRates {
            one_time_charge_rate: 0.40,
            success_rate: 0.92,
            refund_rate: 0.03,
            dispute_rate: 0.005,
            base_conversion_rate: 0.06,
        },
    }
}

fn nonprofit_donations() -> BusinessProfile {
    BusinessProfile {
        label: "Nonprofit Donations".to_string(),
        audience: Audience::B2c,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(10.0, 250.0),
            one_time: AmountRange::new(10.0, 1000.0),
        },
        plans: templates(&[
            ("Monthly Friend", PlanInterval::Month),
            ("Monthly Champion", PlanInterval::Month),
            ("Annual Sustainer", PlanInterval::Year),
        ]),
        company_stems: Vec::new(),
        descriptions: strings(&[
            "General fund donation",
            "Disaster relief donation",
            "Scholarship fund gift",
            "Gala ticket",
            "In memory gift",
        ]),
        properties: vec![
            property("campaign", &["spring_appeal", "year_end", "gala", "peer_to_peer"]),
            property("gift_aid", &["yes", "no"]),
        ],
        availability: MetricAvailability {
            subscriptions: true,
            radar: true,
            disputes: false,
            refunds: true,
            authentication: false,
        },
        rates: ProfileRates {
            one_time_charge_rate: 0.50,
            success_rate: 0.94,
            refund_rate: 0.01,
            dispute_rate: 0.001,
            base_conversion_rate: 0.08,
        },
    }
}

fn b2c_subscription_app() -> BusinessProfile {
    BusinessProfile {
        label: "B2C Subscription App".to_string(),
        audience: Audience::B2c,
        currency: "usd".to_string(),
        amounts: AmountRanges {
            plan: AmountRange::new(4.99, 29.99),
            one_time: AmountRange::new(1.99, 49.99),
        },
        plans: templates(&[
            ("Basic", PlanInterval::Month),
            ("Premium", PlanInterval::Month),
            ("Family", PlanInterval::Month),
            ("Premium Annual", PlanInterval::Year),
            ("Weekly Pass", PlanInterval::Week),
        ]),
        company_stems: Vec::new(),
        descriptions: strings(&[
            "In-app purchase: theme pack",
            "In-app purchase: extra storage",
            "Gift subscription",
            "Course unlock",
        ]),
        properties: vec![
            property("platform", &["ios", "android", "web"]),
            property("acquisition_channel", &["app_store", "referral", "paid_social", "organic"]),
        ],
        availability: MetricAvailability::ALL,
        rates: ProfileRates {
            one_time_charge_rate: 0.25,
            success_rate: 0.91,
            refund_rate: 0.04,
            dispute_rate: 0.004,
            base_conversion_rate: 0.04,
        },
    }
}

fn templates(entries: &[(&str, PlanInterval)]) -> Vec<PlanTemplate> {
    entries
        .iter()
        .map(|(nickname, interval)| PlanTemplate {
            nickname: nickname.to_string(),
            interval: *interval,
        })
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn property(name: &str, values: &[&str]) -> PropertySpec {
    PropertySpec {
        name: name.to_string(),
        values: strings(values),
    }
}

use std::collections::BTreeMap;

use synthkit_core::Customer;

use crate::generators::EntityContext;
use crate::generators::primitives::{stripe_id, timestamp};
use crate::generators::semantic::{address, city, customer_name, email, phone};
use crate::prng::{chance, field_seed, pick};

/// Customers sign up within this many days before the reference time.
pub const CUSTOMER_WINDOW_DAYS: i64 = 365;

pub fn generate_customer(seed: i64, index: usize, ctx: &EntityContext<'_>) -> Customer {
    let profile = ctx.profile;
    let name = customer_name(field_seed(seed, 1), profile);
    let home = city(field_seed(seed, 10));

    let mut metadata = BTreeMap::new();
    for (offset, spec) in profile.properties.iter().enumerate() {
        if let Some(value) = pick(field_seed(seed, 40 + offset as i64), &spec.values) {
            metadata.insert(spec.name.clone(), value.clone());
        }
    }

    Customer {
        id: stripe_id("cus", field_seed(seed, 0), index),
        object: "customer".to_string(),
        email: email(field_seed(seed, 5), &name, profile.audience),
        phone: phone(field_seed(seed, 15), &home),
        address: address(field_seed(seed, 20), &home),
        created: timestamp(field_seed(seed, 30), ctx.reference, CUSTOMER_WINDOW_DAYS).timestamp(),
        description: format!("{} customer", profile.label),
        currency: ctx.currency().to_string(),
        delinquent: chance(field_seed(seed, 35), 0.05),
        metadata,
        name,
    }
}

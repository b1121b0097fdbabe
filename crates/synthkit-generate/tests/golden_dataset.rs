use std::fmt::Write;

use sha2::{Digest, Sha256};

use synthkit_core::{BusinessTypeRegistry, Dataset, Stage};
use synthkit_generate::{RequestedCounts, generate_dataset};

/// One line per record: ids, foreign keys, statuses and amounts in minor units.
fn skeleton(dataset: &Dataset) -> String {
    let mut out = String::new();
    for customer in &dataset.customers {
        let _ = writeln!(out, "cus {}", customer.id);
    }
    for plan in &dataset.plans {
        let _ = writeln!(out, "plan {} {}", plan.id, plan.amount);
    }
    for sub in &dataset.subscriptions {
        let _ = writeln!(
            out,
            "sub {} {} {} {:?} {} {}",
            sub.id, sub.customer, sub.plan, sub.status, sub.quantity, sub.amount
        );
    }
    for invoice in &dataset.invoices {
        let _ = writeln!(
            out,
            "in {} {} {} {:?} {}",
            invoice.id, invoice.subscription, invoice.customer, invoice.status, invoice.amount_due
        );
    }
    for charge in &dataset.charges {
        match &charge.invoice {
            Some(invoice) => {
                let _ = writeln!(
                    out,
                    "ch {} {} {} {} {:?}",
                    charge.id, charge.customer, invoice, charge.amount, charge.status
                );
            }
            None => {
                let _ = writeln!(out, "ch {} {} - {}", charge.id, charge.customer, charge.amount);
            }
        }
    }
    out
}

#[test]
fn b2b_saas_growth_dataset_is_stable() {
    let registry = BusinessTypeRegistry::builtin();
    let dataset = generate_dataset(
        &registry,
        "b2b-saas-subscriptions",
        Stage::Growth,
        12345,
        Some(RequestedCounts {
            customers: Some(25),
            plans: None,
            subscriptions: Some(15),
            invoices: Some(20),
            charges: Some(40),
        }),
    )
    .expect("generate dataset");

    assert_eq!(dataset.customers[0].id, "cus_UPkpM2kisZ0000");
    assert_eq!(dataset.plans[0].id, "plan_JbWjFo1Zrn0000");
    assert_eq!(dataset.plans[0].amount, 60_395);
    assert_eq!(dataset.subscriptions[0].customer, "cus_BoN7zF5K5J0005");

    let hash = hex::encode(Sha256::digest(skeleton(&dataset).as_bytes()));
    let expected = "0411e8ead332390e33a1ad19b3459a3c9385b8570535c9b68d628a3cf1beed61";
    assert_eq!(hash, expected, "dataset skeleton hash mismatch");
}

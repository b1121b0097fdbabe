use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use synthkit_core::{Customer, DatasetView, Invoice, Subscription};

/// Recurring charges must settle within this window after their invoice.
pub const SETTLEMENT_WINDOW_SECS: i64 = 72 * 3_600;

/// Structured violation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u64>,
}

impl Violation {
    fn new(code: &str, path: String, message: String, row_index: usize) -> Self {
        Self {
            code: code.to_string(),
            path,
            message,
            row_index: Some(row_index as u64),
        }
    }
}

/// Outcome of a referential integrity pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Number of records inspected.
    pub checked: u64,
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.code.as_str()).collect()
    }
}

/// Verify foreign keys, id uniqueness and the temporal ordering of a dataset.
pub fn check_integrity(view: DatasetView<'_>) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    check_unique(&mut report, "customers", view.customers.iter().map(|c| c.id.as_str()));
    check_unique(&mut report, "plans", view.plans.iter().map(|p| p.id.as_str()));
    check_unique(
        &mut report,
        "subscriptions",
        view.subscriptions.iter().map(|s| s.id.as_str()),
    );
    check_unique(&mut report, "invoices", view.invoices.iter().map(|i| i.id.as_str()));
    check_unique(&mut report, "charges", view.charges.iter().map(|c| c.id.as_str()));

    let customers: HashMap<&str, &Customer> =
        view.customers.iter().map(|c| (c.id.as_str(), c)).collect();
    let plans: HashSet<&str> = view.plans.iter().map(|p| p.id.as_str()).collect();
    let subscriptions: HashMap<&str, &Subscription> = view
        .subscriptions
        .iter()
        .map(|s| (s.id.as_str(), s))
        .collect();
    let invoices: HashMap<&str, &Invoice> =
        view.invoices.iter().map(|i| (i.id.as_str(), i)).collect();

    for (idx, subscription) in view.subscriptions.iter().enumerate() {
        let path = format!("/subscriptions/{idx}");
        match customers.get(subscription.customer.as_str()) {
            None => report.violations.push(Violation::new(
                "dangling_customer",
                format!("{path}/customer"),
                format!("customer '{}' does not exist", subscription.customer),
                idx,
            )),
            Some(customer) if subscription.current_period_start < customer.created => {
                report.violations.push(Violation::new(
                    "period_before_customer",
                    format!("{path}/current_period_start"),
                    format!(
                        "period starts at {} before customer '{}' was created at {}",
                        subscription.current_period_start, customer.id, customer.created
                    ),
                    idx,
                ));
            }
            Some(_) => {}
        }
        if !plans.contains(subscription.plan.as_str()) {
            report.violations.push(Violation::new(
                "dangling_plan",
                format!("{path}/plan"),
                format!("plan '{}' does not exist", subscription.plan),
                idx,
            ));
        }
        if subscription.current_period_end < subscription.current_period_start {
            report.violations.push(Violation::new(
                "inverted_period",
                format!("{path}/current_period_end"),
                "period ends before it starts".to_string(),
                idx,
            ));
        }
    }

    for (idx, invoice) in view.invoices.iter().enumerate() {
        let path = format!("/invoices/{idx}");
        match subscriptions.get(invoice.subscription.as_str()) {
            None => report.violations.push(Violation::new(
                "dangling_subscription",
                format!("{path}/subscription"),
                format!("subscription '{}' does not exist", invoice.subscription),
                idx,
            )),
            Some(subscription) => {
                if invoice.customer != subscription.customer {
                    report.violations.push(Violation::new(
                        "customer_mismatch",
                        format!("{path}/customer"),
                        format!(
                            "invoice customer '{}' differs from subscription customer '{}'",
                            invoice.customer, subscription.customer
                        ),
                        idx,
                    ));
                }
                if invoice.created < subscription.current_period_start {
                    report.violations.push(Violation::new(
                        "invoice_before_period",
                        format!("{path}/created"),
                        format!(
                            "invoice created at {} before period start {}",
                            invoice.created, subscription.current_period_start
                        ),
                        idx,
                    ));
                }
            }
        }
        if invoice.amount_remaining != invoice.amount_due - invoice.amount_paid {
            report.violations.push(Violation::new(
                "amount_mismatch",
                format!("{path}/amount_remaining"),
                "amount_remaining must equal amount_due - amount_paid".to_string(),
                idx,
            ));
        }
    }

    for (idx, charge) in view.charges.iter().enumerate() {
        let path = format!("/charges/{idx}");
        if !customers.contains_key(charge.customer.as_str()) {
            report.violations.push(Violation::new(
                "dangling_customer",
                format!("{path}/customer"),
                format!("customer '{}' does not exist", charge.customer),
                idx,
            ));
        }
        if charge.amount_refunded > charge.amount || charge.amount_refunded < 0 {
            report.violations.push(Violation::new(
                "refund_out_of_range",
                format!("{path}/amount_refunded"),
                format!(
                    "refunded {} of a {} charge",
                    charge.amount_refunded, charge.amount
                ),
                idx,
            ));
        }
        if !charge.is_succeeded() && (charge.amount_refunded > 0 || charge.disputed) {
            report.violations.push(Violation::new(
                "adjustment_on_unpaid_charge",
                format!("{path}/status"),
                "refunds and disputes require a succeeded charge".to_string(),
                idx,
            ));
        }
        let Some(invoice_id) = charge.invoice.as_deref() else {
            continue;
        };
        let Some(invoice) = invoices.get(invoice_id) else {
            report.violations.push(Violation::new(
                "dangling_invoice",
                format!("{path}/invoice"),
                format!("invoice '{invoice_id}' does not exist"),
                idx,
            ));
            continue;
        };
        if charge.customer != invoice.customer {
            report.violations.push(Violation::new(
                "customer_mismatch",
                format!("{path}/customer"),
                format!(
                    "charge customer '{}' differs from invoice customer '{}'",
                    charge.customer, invoice.customer
                ),
                idx,
            ));
        }
        if charge.amount != invoice.amount_due {
            report.violations.push(Violation::new(
                "amount_mismatch",
                format!("{path}/amount"),
                format!(
                    "charge amount {} differs from invoice amount_due {}",
                    charge.amount, invoice.amount_due
                ),
                idx,
            ));
        }
        if charge.created < invoice.created
            || charge.created > invoice.created + SETTLEMENT_WINDOW_SECS
        {
            report.violations.push(Violation::new(
                "settlement_window",
                format!("{path}/created"),
                format!(
                    "charge created at {} outside 72h after invoice created at {}",
                    charge.created, invoice.created
                ),
                idx,
            ));
        }
    }

    report.checked = (view.customers.len()
        + view.plans.len()
        + view.subscriptions.len()
        + view.invoices.len()
        + view.charges.len()) as u64;
    report
}

fn check_unique<'a>(
    report: &mut IntegrityReport,
    pool: &str,
    ids: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for (idx, id) in ids.enumerate() {
        if !seen.insert(id) {
            report.violations.push(Violation::new(
                "duplicate_id",
                format!("/{pool}/{idx}/id"),
                format!("id '{id}' appears more than once"),
                idx,
            ));
        }
    }
}

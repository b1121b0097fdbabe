//! Plan, subscription and invoice generators.
//!
//! Parents are passed in by reference; these functions never invent a
//! foreign key.

use chrono::Duration;

use synthkit_core::{
    Audience, Customer, Invoice, InvoiceStatus, Plan, PlanInterval, PlanTemplate, Subscription,
    SubscriptionStatus,
};

use crate::generators::EntityContext;
use crate::generators::primitives::{
    advance_interval, code, stripe_id, tiered_amount, timestamp_between, to_minor_units,
};
use crate::prng::{chance, field_seed, random_int, weighted_pick};

const TRIAL_DAYS: i64 = 14;
/// Yearly plans are priced at ten monthly payments.
const YEARLY_PRICE_MONTHS: f64 = 10.0;
/// Invoices are finalized up to two days after their period starts.
const INVOICE_FINALIZE_WINDOW_SECS: i64 = 2 * 86_400;

pub fn generate_plan(seed: i64, index: usize, pool_size: usize, ctx: &EntityContext<'_>) -> Plan {
    let profile = ctx.profile;
    let template = profile
        .plans
        .get(index % profile.plans.len().max(1))
        .cloned()
        .unwrap_or_else(|| PlanTemplate {
            nickname: "Standard".to_string(),
            interval: PlanInterval::Month,
        });
    let nickname = match profile.plans.len() {
        0 => format!("{} {}", template.nickname, index + 1),
        len if index >= len => format!("{} {}", template.nickname, index / len + 1),
        _ => template.nickname.clone(),
    };

    let monthly = tiered_amount(
        field_seed(seed, 1),
        &profile.amounts.plan,
        index,
        pool_size,
        ctx.stage,
    );
    let amount = match template.interval {
        PlanInterval::Year => to_minor_units(monthly * YEARLY_PRICE_MONTHS),
        PlanInterval::Month | PlanInterval::Week => to_minor_units(monthly),
    };

    // Plans predate every customer: they are created one to two years back.
    let reference = ctx.reference_ts();
    let created = timestamp_between(
        field_seed(seed, 3),
        reference - 730 * 86_400,
        reference - 366 * 86_400,
    );

    Plan {
        id: stripe_id("plan", field_seed(seed, 0), index),
        object: "plan".to_string(),
        nickname,
        product: stripe_id("prod", field_seed(seed, 2), index),
        amount,
        currency: ctx.currency().to_string(),
        interval: template.interval,
        interval_count: 1,
        active: true,
        created,
    }
}

pub fn generate_subscription(
    seed: i64,
    index: usize,
    customer: &Customer,
    plan: &Plan,
    ctx: &EntityContext<'_>,
) -> Subscription {
    let reference = ctx.reference_ts();
    let status = weighted_pick(
        field_seed(seed, 1),
        &[
            (SubscriptionStatus::Active, 0.65),
            (SubscriptionStatus::Trialing, 0.10),
            (SubscriptionStatus::PastDue, 0.10),
            (SubscriptionStatus::Canceled, 0.15),
        ],
    )
    .unwrap_or(SubscriptionStatus::Active);

    let quantity = match ctx.profile.audience {
        Audience::B2b => random_int(field_seed(seed, 2), 1, 25) as u32,
        Audience::B2c => 1,
    };

    let created = timestamp_between(field_seed(seed, 3), customer.created, reference);

    let (current_period_start, current_period_end) = if status == SubscriptionStatus::Trialing {
        (created, created + Duration::days(TRIAL_DAYS).num_seconds())
    } else {
        current_period(created, reference, plan.interval, plan.interval_count)
    };

    let canceled_at = (status == SubscriptionStatus::Canceled).then(|| {
        timestamp_between(
            field_seed(seed, 4),
            current_period_start,
            current_period_end.min(reference),
        )
    });
    let cancel_at_period_end =
        status == SubscriptionStatus::Active && chance(field_seed(seed, 5), 0.05);

    Subscription {
        id: stripe_id("sub", field_seed(seed, 0), index),
        object: "subscription".to_string(),
        customer: customer.id.clone(),
        plan: plan.id.clone(),
        status,
        quantity,
        created,
        current_period_start,
        current_period_end,
        amount: plan.amount * i64::from(quantity),
        currency: plan.currency.clone(),
        cancel_at_period_end,
        canceled_at,
    }
}

pub fn generate_invoice(
    seed: i64,
    index: usize,
    subscription: &Subscription,
    ctx: &EntityContext<'_>,
) -> Invoice {
    let status_weights: &[(InvoiceStatus, f64)] = match subscription.status {
        SubscriptionStatus::Active | SubscriptionStatus::Trialing => {
            &[(InvoiceStatus::Paid, 0.85), (InvoiceStatus::Open, 0.15)]
        }
        SubscriptionStatus::PastDue => &[
            (InvoiceStatus::Open, 0.6),
            (InvoiceStatus::Uncollectible, 0.4),
        ],
        SubscriptionStatus::Canceled => &[
            (InvoiceStatus::Paid, 0.7),
            (InvoiceStatus::Uncollectible, 0.3),
        ],
    };
    let status = weighted_pick(field_seed(seed, 1), status_weights).unwrap_or(InvoiceStatus::Open);

    let period_start = subscription.current_period_start;
    let latest = (period_start + INVOICE_FINALIZE_WINDOW_SECS).min(ctx.reference_ts());
    let created = timestamp_between(field_seed(seed, 2), period_start, latest);

    let amount_due = subscription.amount;
    let amount_paid = if status == InvoiceStatus::Paid {
        amount_due
    } else {
        0
    };

    Invoice {
        id: stripe_id("in", field_seed(seed, 0), index),
        object: "invoice".to_string(),
        number: format!("{}-{:04}", code(field_seed(seed, 3), 8), index + 1),
        customer: subscription.customer.clone(),
        subscription: subscription.id.clone(),
        status,
        amount_due,
        amount_paid,
        amount_remaining: amount_due - amount_paid,
        currency: subscription.currency.clone(),
        period_start,
        period_end: subscription.current_period_end,
        created,
        description: format!("{} subscription", ctx.profile.label),
    }
}

/// Billing period containing `reference`, starting from `created` and
/// advancing by whole intervals.
fn current_period(created: i64, reference: i64, interval: PlanInterval, count: u32) -> (i64, i64) {
    let count = count.max(1);
    let mut start = created;
    let mut end = advance_interval(start, interval, count);
    while end <= reference {
        start = end;
        end = advance_interval(start, interval, count);
    }
    (start, end)
}

//! Business metrics derived from an assembled dataset.
//!
//! Every metric is computed for every business type. Availability only
//! decides which cards [`present_metrics`] shows.

use synthkit_core::prng::random;
use synthkit_core::{
    BusinessMetrics, BusinessProfile, Capability, ChargeStatus, DatasetView, MetricAvailability,
    MetricCard, MetricCategory, OutcomeType, Stage, SubscriptionStatus, ThreeDSecureResult,
};

/// Seed offsets of the heuristic jitter draws.
const LIFETIME_VALUE_JITTER: i64 = 7001;
const CONVERSION_JITTER: i64 = 7003;

/// Compute aggregate metrics for one dataset.
///
/// Money is reported in major units rounded to two decimals; rates are
/// fractions in `[0, 1]`. A zero denominator yields `0`.
pub fn compute_business_metrics(
    view: DatasetView<'_>,
    profile: &BusinessProfile,
    stage: Stage,
    seed: i64,
) -> BusinessMetrics {
    let total_charges = view.charges.len() as u64;
    let mut succeeded = 0_u64;
    let mut failed = 0_u64;
    let mut blocked = 0_u64;
    let mut refunded = 0_u64;
    let mut disputed = 0_u64;
    let mut with_three_d_secure = 0_u64;
    let mut authenticated = 0_u64;
    let mut gross_minor = 0_i64;
    let mut refunded_minor = 0_i64;

    for charge in view.charges {
        match charge.status {
            ChargeStatus::Succeeded => {
                succeeded += 1;
                gross_minor += charge.amount;
                refunded_minor += charge.amount_refunded;
                if charge.amount_refunded > 0 {
                    refunded += 1;
                }
                if charge.disputed {
                    disputed += 1;
                }
            }
            ChargeStatus::Failed => failed += 1,
            ChargeStatus::Pending => {}
        }
        if charge.outcome.outcome_type == OutcomeType::Blocked {
            blocked += 1;
        }
        if let Some(secure) = &charge.payment_method_details.card.three_d_secure {
            with_three_d_secure += 1;
            if secure.result == ThreeDSecureResult::Authenticated {
                authenticated += 1;
            }
        }
    }

    let total_subscriptions = view.subscriptions.len() as u64;
    let active: Vec<_> = view
        .subscriptions
        .iter()
        .filter(|subscription| subscription.status == SubscriptionStatus::Active)
        .collect();
    let canceled = view
        .subscriptions
        .iter()
        .filter(|subscription| subscription.status == SubscriptionStatus::Canceled)
        .count() as u64;
    let recurring_minor: i64 = active.iter().map(|subscription| subscription.amount).sum();

    let gross = to_major(gross_minor);
    let total_customers = view.customers.len() as u64;

    let lifetime_value = if total_customers == 0 {
        0.0
    } else {
        let jitter = 0.9 + 0.2 * random(seed.wrapping_add(LIFETIME_VALUE_JITTER));
        round2(
            gross / total_customers as f64
                * stage.customer_lifetime_months()
                * jitter,
        )
    };
    let conversion_jitter = 0.9 + 0.2 * random(seed.wrapping_add(CONVERSION_JITTER));
    let conversion_rate = round4(
        (profile.rates.base_conversion_rate * stage.conversion_factor() * conversion_jitter)
            .clamp(0.0, 1.0),
    );

    BusinessMetrics {
        gross_payment_volume: gross,
        net_revenue: to_major((gross_minor - refunded_minor).max(0)),
        payment_success_rate: ratio(succeeded, total_charges),
        average_order_value: if succeeded == 0 {
            0.0
        } else {
            round2(gross / succeeded as f64)
        },
        monthly_recurring_revenue: to_major(recurring_minor),
        active_subscribers: active.len() as u64,
        churn_rate: ratio(canceled, total_subscriptions),
        customer_lifetime_value: lifetime_value,
        conversion_rate,
        total_customers,
        refund_rate: ratio(refunded, succeeded),
        dispute_rate: ratio(disputed, succeeded),
        fraud_block_rate: ratio(blocked, total_charges),
        authentication_rate: ratio(authenticated, with_three_d_secure),
        successful_payments: succeeded,
        failed_payments: failed,
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Money,
    Percent,
    Count,
}

struct CardSpec {
    id: &'static str,
    label: &'static str,
    category: MetricCategory,
    format: Format,
    requires: Option<Capability>,
    value: fn(&BusinessMetrics) -> f64,
}

const CARDS: &[CardSpec] = &[
    CardSpec {
        id: "grossPaymentVolume",
        label: "Gross Payment Volume",
        category: MetricCategory::Revenue,
        format: Format::Money,
        requires: None,
        value: |m| m.gross_payment_volume,
    },
    CardSpec {
        id: "netRevenue",
        label: "Net Revenue",
        category: MetricCategory::Revenue,
        format: Format::Money,
        requires: None,
        value: |m| m.net_revenue,
    },
    CardSpec {
        id: "monthlyRecurringRevenue",
        label: "Monthly Recurring Revenue",
        category: MetricCategory::Subscriptions,
        format: Format::Money,
        requires: Some(Capability::Subscriptions),
        value: |m| m.monthly_recurring_revenue,
    },
    CardSpec {
        id: "activeSubscribers",
        label: "Active Subscribers",
        category: MetricCategory::Subscriptions,
        format: Format::Count,
        requires: Some(Capability::Subscriptions),
        value: |m| m.active_subscribers as f64,
    },
    CardSpec {
        id: "churnRate",
        label: "Churn Rate",
        category: MetricCategory::Subscriptions,
        format: Format::Percent,
        requires: Some(Capability::Subscriptions),
        value: |m| m.churn_rate,
    },
    CardSpec {
        id: "paymentSuccessRate",
        label: "Payment Success Rate",
        category: MetricCategory::Payments,
        format: Format::Percent,
        requires: None,
        value: |m| m.payment_success_rate,
    },
    CardSpec {
        id: "averageOrderValue",
        label: "Average Order Value",
        category: MetricCategory::Payments,
        format: Format::Money,
        requires: None,
        value: |m| m.average_order_value,
    },
    CardSpec {
        id: "customerLifetimeValue",
        label: "Customer Lifetime Value",
        category: MetricCategory::Customers,
        format: Format::Money,
        requires: None,
        value: |m| m.customer_lifetime_value,
    },
    CardSpec {
        id: "conversionRate",
        label: "Conversion Rate",
        category: MetricCategory::Customers,
        format: Format::Percent,
        requires: None,
        value: |m| m.conversion_rate,
    },
    CardSpec {
        id: "totalCustomers",
        label: "Total Customers",
        category: MetricCategory::Customers,
        format: Format::Count,
        requires: None,
        value: |m| m.total_customers as f64,
    },
    CardSpec {
        id: "refundRate",
        label: "Refund Rate",
        category: MetricCategory::Risk,
        format: Format::Percent,
        requires: Some(Capability::Refunds),
        value: |m| m.refund_rate,
    },
    CardSpec {
        id: "disputeRate",
        label: "Dispute Rate",
        category: MetricCategory::Risk,
        format: Format::Percent,
        requires: Some(Capability::Disputes),
        value: |m| m.dispute_rate,
    },
    CardSpec {
        id: "fraudBlockRate",
        label: "Fraud Block Rate",
        category: MetricCategory::Risk,
        format: Format::Percent,
        requires: Some(Capability::Radar),
        value: |m| m.fraud_block_rate,
    },
    CardSpec {
        id: "authenticationRate",
        label: "Authentication Rate",
        category: MetricCategory::Risk,
        format: Format::Percent,
        requires: Some(Capability::Authentication),
        value: |m| m.authentication_rate,
    },
];

/// Ordered metric cards, without the ones whose capability is disabled.
///
/// Money cards are displayed in `currency` (ISO 4217 code, any case).
pub fn present_metrics(
    metrics: &BusinessMetrics,
    availability: &MetricAvailability,
    currency: &str,
) -> Vec<MetricCard> {
    let symbol = currency_symbol(currency);
    CARDS
        .iter()
        .filter(|card| {
            card.requires
                .is_none_or(|capability| availability.allows(capability))
        })
        .map(|card| {
            let value = (card.value)(metrics);
            MetricCard {
                id: card.id.to_string(),
                label: card.label.to_string(),
                value,
                display: match card.format {
                    Format::Money => format_money(value, &symbol),
                    Format::Percent => format_percent(value),
                    Format::Count => format_count(value as u64),
                },
                category: card.category,
                requires: card.requires,
            }
        })
        .collect()
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round4(numerator as f64 / denominator as f64)
    }
}

fn to_major(minor: i64) -> f64 {
    round2(minor as f64 / 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Display prefix for a currency; unknown codes fall back to `"XYZ "`.
fn currency_symbol(currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let symbol = match code.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "INR" => "₹",
        "CAD" => "CA$",
        "AUD" => "A$",
        "BRL" => "R$",
        _ => return format!("{code} "),
    };
    symbol.to_string()
}

fn format_money(value: f64, symbol: &str) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{symbol}{}.{:02}", group_thousands(cents / 100), cents % 100)
}

fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn format_count(value: u64) -> String {
    group_thousands(value)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Charge, Customer, Invoice, Plan, Subscription};
use crate::stage::Stage;

/// Optional product surface a business type may or may not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Subscriptions,
    Radar,
    Disputes,
    Refunds,
    Authentication,
}

/// Aggregate business metrics derived from an assembled dataset.
///
/// Monetary values are major currency units rounded to two decimals; rates
/// are fractions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetrics {
    pub gross_payment_volume: f64,
    pub net_revenue: f64,
    pub payment_success_rate: f64,
    pub average_order_value: f64,
    pub monthly_recurring_revenue: f64,
    pub active_subscribers: u64,
    pub churn_rate: f64,
    pub customer_lifetime_value: f64,
    pub conversion_rate: f64,
    pub total_customers: u64,
    pub refund_rate: f64,
    pub dispute_rate: f64,
    pub fraud_block_rate: f64,
    pub authentication_rate: f64,
    pub successful_payments: u64,
    pub failed_payments: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Revenue,
    Payments,
    Customers,
    Subscriptions,
    Risk,
}

/// Presentation-ready metric entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricCard {
    /// Matches the camelCase key of the metric in [`BusinessMetrics`].
    pub id: String,
    pub label: String,
    pub value: f64,
    pub display: String,
    pub category: MetricCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<Capability>,
}

/// Assembled root object returned by a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Registry key of the profile that produced the data.
    pub business_type: String,
    pub stage: Stage,
    pub seed: i64,
    pub currency: String,
    pub customers: Vec<Customer>,
    pub plans: Vec<Plan>,
    pub subscriptions: Vec<Subscription>,
    pub invoices: Vec<Invoice>,
    pub charges: Vec<Charge>,
    pub business_metrics: BusinessMetrics,
    pub metrics: Vec<MetricCard>,
}

impl Dataset {
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            customers: &self.customers,
            plans: &self.plans,
            subscriptions: &self.subscriptions,
            invoices: &self.invoices,
            charges: &self.charges,
        }
    }
}

/// Borrowed view over the entity pools of a dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetView<'a> {
    pub customers: &'a [Customer],
    pub plans: &'a [Plan],
    pub subscriptions: &'a [Subscription],
    pub invoices: &'a [Invoice],
    pub charges: &'a [Charge],
}

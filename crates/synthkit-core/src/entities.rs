//! Stripe-shaped domain objects.
//!
//! Monetary fields are minor currency units (cents) and timestamps are unix
//! seconds, matching the shape of the corresponding Stripe API objects.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Postal address attached to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    pub line1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Customer {
    pub id: String,
    pub object: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub created: i64,
    pub description: String,
    pub currency: String,
    pub delinquent: bool,
    /// Business-type specific attributes (industry, loyalty tier, ...).
    pub metadata: BTreeMap<String, String>,
}

/// Billing interval of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanInterval {
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Plan {
    pub id: String,
    pub object: String,
    pub nickname: String,
    pub product: String,
    pub amount: i64,
    pub currency: String,
    pub interval: PlanInterval,
    pub interval_count: u32,
    pub active: bool,
    pub created: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Subscription {
    pub id: String,
    pub object: String,
    pub customer: String,
    pub plan: String,
    pub status: SubscriptionStatus,
    pub quantity: u32,
    pub created: i64,
    pub current_period_start: i64,
    pub current_period_end: i64,
    /// `plan.amount * quantity`.
    pub amount: i64,
    pub currency: String,
    pub cancel_at_period_end: bool,
    pub canceled_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Open,
    Uncollectible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Invoice {
    pub id: String,
    pub object: String,
    pub number: String,
    pub customer: String,
    pub subscription: String,
    pub status: InvoiceStatus,
    pub amount_due: i64,
    pub amount_paid: i64,
    pub amount_remaining: i64,
    pub currency: String,
    pub period_start: i64,
    pub period_end: i64,
    pub created: i64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    Succeeded,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeType {
    Authorized,
    Blocked,
    IssuerDeclined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Normal,
    Elevated,
    Highest,
    NotAssessed,
}

/// Fraud screening result for a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChargeOutcome {
    #[serde(rename = "type")]
    pub outcome_type: OutcomeType,
    pub risk_level: RiskLevel,
    pub risk_score: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThreeDSecureResult {
    Authenticated,
    AttemptAcknowledged,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ThreeDSecure {
    pub result: ThreeDSecureResult,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CardDetails {
    pub brand: String,
    pub last4: String,
    pub exp_month: u32,
    pub exp_year: i32,
    pub funding: String,
    pub three_d_secure: Option<ThreeDSecure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentMethodDetails {
    #[serde(rename = "type")]
    pub method_type: String,
    pub card: CardDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Charge {
    pub id: String,
    pub object: String,
    pub customer: String,
    /// Set for recurring charges; `None` marks a one-time payment.
    pub invoice: Option<String>,
    pub amount: i64,
    pub amount_refunded: i64,
    pub refunded: bool,
    pub disputed: bool,
    pub currency: String,
    pub status: ChargeStatus,
    pub paid: bool,
    pub description: String,
    pub created: i64,
    pub outcome: ChargeOutcome,
    pub payment_method_details: PaymentMethodDetails,
}

impl Charge {
    pub fn is_succeeded(&self) -> bool {
        self.status == ChargeStatus::Succeeded
    }

    pub fn is_one_time(&self) -> bool {
        self.invoice.is_none()
    }
}

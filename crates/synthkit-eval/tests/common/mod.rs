#![allow(dead_code)]

use std::collections::BTreeMap;

use synthkit_core::{
    Address, CardDetails, Charge, ChargeOutcome, ChargeStatus, Customer, Invoice, InvoiceStatus,
    OutcomeType, PaymentMethodDetails, Plan, PlanInterval, RiskLevel, Subscription,
    SubscriptionStatus, ThreeDSecure, ThreeDSecureResult,
};

pub const T0: i64 = 1_700_000_000;

pub fn customer(id: &str) -> Customer {
    Customer {
        id: id.to_string(),
        object: "customer".to_string(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+1 (415) 555-0100".to_string(),
        address: Address {
            line1: "1 Main St".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            postal_code: "94105".to_string(),
            country: "US".to_string(),
        },
        created: T0,
        description: "Test customer".to_string(),
        currency: "usd".to_string(),
        delinquent: false,
        metadata: BTreeMap::new(),
    }
}

pub fn plan(id: &str, amount: i64) -> Plan {
    Plan {
        id: id.to_string(),
        object: "plan".to_string(),
        nickname: "Pro".to_string(),
        product: "prod_test".to_string(),
        amount,
        currency: "usd".to_string(),
        interval: PlanInterval::Month,
        interval_count: 1,
        active: true,
        created: T0 - 86_400,
    }
}

pub fn subscription(
    id: &str,
    customer: &str,
    plan: &str,
    status: SubscriptionStatus,
    amount: i64,
) -> Subscription {
    Subscription {
        id: id.to_string(),
        object: "subscription".to_string(),
        customer: customer.to_string(),
        plan: plan.to_string(),
        status,
        quantity: 1,
        created: T0 + 100,
        current_period_start: T0 + 100,
        current_period_end: T0 + 100 + 30 * 86_400,
        amount,
        currency: "usd".to_string(),
        cancel_at_period_end: false,
        canceled_at: None,
    }
}

pub fn invoice(id: &str, subscription: &Subscription) -> Invoice {
    Invoice {
        id: id.to_string(),
        object: "invoice".to_string(),
        number: "ABCDEFGH-0001".to_string(),
        customer: subscription.customer.clone(),
        subscription: subscription.id.clone(),
        status: InvoiceStatus::Paid,
        amount_due: subscription.amount,
        amount_paid: subscription.amount,
        amount_remaining: 0,
        currency: "usd".to_string(),
        period_start: subscription.current_period_start,
        period_end: subscription.current_period_end,
        created: subscription.current_period_start + 60,
        description: "Test subscription".to_string(),
    }
}

pub fn charge(id: &str, customer: &str, amount: i64, status: ChargeStatus) -> Charge {
    Charge {
        id: id.to_string(),
        object: "charge".to_string(),
        customer: customer.to_string(),
        invoice: None,
        amount,
        amount_refunded: 0,
        refunded: false,
        disputed: false,
        currency: "usd".to_string(),
        status,
        paid: status == ChargeStatus::Succeeded,
        description: "Test charge".to_string(),
        created: T0 + 500,
        outcome: ChargeOutcome {
            outcome_type: if status == ChargeStatus::Failed {
                OutcomeType::IssuerDeclined
            } else {
                OutcomeType::Authorized
            },
            risk_level: RiskLevel::Normal,
            risk_score: Some(12),
        },
        payment_method_details: PaymentMethodDetails {
            method_type: "card".to_string(),
            card: CardDetails {
                brand: "visa".to_string(),
                last4: "4242".to_string(),
                exp_month: 12,
                exp_year: 2027,
                funding: "credit".to_string(),
                three_d_secure: None,
            },
        },
    }
}

pub fn with_three_d_secure(mut charge: Charge, result: ThreeDSecureResult) -> Charge {
    charge.payment_method_details.card.three_d_secure = Some(ThreeDSecure {
        result,
        version: "2.2.0".to_string(),
    });
    charge
}

pub fn linked_charge(id: &str, invoice: &Invoice) -> Charge {
    let mut charge = charge(id, &invoice.customer, invoice.amount_due, ChargeStatus::Succeeded);
    charge.invoice = Some(invoice.id.clone());
    charge.created = invoice.created + 3_600;
    charge
}

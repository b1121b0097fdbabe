use synthkit_core::{
    Charge, ChargeOutcome, ChargeStatus, Customer, Invoice, InvoiceStatus, OutcomeType,
    PaymentMethodDetails, RiskLevel, ThreeDSecureResult,
};

use crate::generators::EntityContext;
use crate::generators::primitives::{amount, stripe_id, timestamp_between, to_minor_units};
use crate::generators::semantic::{card_details, description, three_d_secure};
use crate::prng::{chance, field_seed, random, random_int};

/// Recurring charges settle at most this long after their invoice.
pub const CHARGE_SETTLEMENT_WINDOW_SECS: i64 = 72 * 3_600;
/// Share of charges that carry 3D Secure details when authentication applies.
const THREE_D_SECURE_RATE: f64 = 0.6;
/// Radar blocks one-time charges at or above this risk score.
const RADAR_BLOCK_SCORE: u8 = 85;

/// Where a charge takes its customer and amount from.
#[derive(Debug, Clone, Copy)]
pub enum ChargeSource<'a> {
    /// Recurring payment of an invoice; amount equals the invoice total.
    Invoice(&'a Invoice),
    /// Independent payment with an amount from the one-time range.
    OneTime(&'a Customer),
}

pub fn generate_charge(
    seed: i64,
    index: usize,
    source: ChargeSource<'_>,
    ctx: &EntityContext<'_>,
) -> Charge {
    let profile = ctx.profile;
    let availability = profile.availability;

    let (customer, invoice, charge_amount, created, mut status, charge_description) = match source
    {
        ChargeSource::Invoice(invoice) => {
            let created = timestamp_between(
                field_seed(seed, 1),
                invoice.created,
                (invoice.created + CHARGE_SETTLEMENT_WINDOW_SECS).min(ctx.reference_ts()),
            );
            let status = if invoice.status == InvoiceStatus::Paid {
                ChargeStatus::Succeeded
            } else {
                ChargeStatus::Failed
            };
            (
                invoice.customer.clone(),
                Some(invoice.id.clone()),
                invoice.amount_due,
                created,
                status,
                format!("Payment for invoice {}", invoice.number),
            )
        }
        ChargeSource::OneTime(customer) => {
            let created =
                timestamp_between(field_seed(seed, 1), customer.created, ctx.reference_ts());
            let charge_amount = to_minor_units(amount(
                field_seed(seed, 2),
                &profile.amounts.one_time,
                ctx.stage,
            ));
            let status = if chance(field_seed(seed, 3), profile.rates.success_rate) {
                ChargeStatus::Succeeded
            } else if chance(field_seed(seed, 4), 0.5) {
                ChargeStatus::Failed
            } else {
                ChargeStatus::Pending
            };
            (
                customer.id.clone(),
                None,
                charge_amount,
                created,
                status,
                description(field_seed(seed, 5), profile),
            )
        }
    };
    let one_time = invoice.is_none();

    let mut card = card_details(field_seed(seed, 20), ctx.reference_year());
    if availability.authentication && chance(field_seed(seed, 10), THREE_D_SECURE_RATE) {
        let secure = three_d_secure(field_seed(seed, 11));
        let failed = secure.result == ThreeDSecureResult::Failed;
        if failed && one_time {
            status = ChargeStatus::Failed;
        }
        // A paid invoice cannot carry a failed challenge; such charges skip 3DS.
        if !(failed && status == ChargeStatus::Succeeded) {
            card.three_d_secure = Some(secure);
        }
    }

    let outcome = if availability.radar {
        // Cubing skews scores toward low risk.
        let score = (random(field_seed(seed, 12)).powi(3) * 100.0).floor().min(99.0) as u8;
        let risk_level = match score {
            0..=64 => RiskLevel::Normal,
            65..=74 => RiskLevel::Elevated,
            _ => RiskLevel::Highest,
        };
        let blocked = one_time && score >= RADAR_BLOCK_SCORE;
        if blocked {
            status = ChargeStatus::Failed;
        }
        ChargeOutcome {
            outcome_type: if blocked {
                OutcomeType::Blocked
            } else if status == ChargeStatus::Failed {
                OutcomeType::IssuerDeclined
            } else {
                OutcomeType::Authorized
            },
            risk_level,
            risk_score: Some(score),
        }
    } else {
        ChargeOutcome {
            outcome_type: if status == ChargeStatus::Failed {
                OutcomeType::IssuerDeclined
            } else {
                OutcomeType::Authorized
            },
            risk_level: RiskLevel::NotAssessed,
            risk_score: None,
        }
    };

    let succeeded = status == ChargeStatus::Succeeded;
    let amount_refunded =
        if succeeded && availability.refunds && chance(field_seed(seed, 13), profile.rates.refund_rate) {
            if chance(field_seed(seed, 14), 0.7) {
                charge_amount
            } else {
                let percent = random_int(field_seed(seed, 15), 10, 90);
                charge_amount * percent / 100
            }
        } else {
            0
        };
    let disputed =
        succeeded && availability.disputes && chance(field_seed(seed, 16), profile.rates.dispute_rate);

    Charge {
        id: stripe_id("ch", field_seed(seed, 0), index),
        object: "charge".to_string(),
        customer,
        invoice,
        amount: charge_amount,
        amount_refunded,
        refunded: charge_amount > 0 && amount_refunded == charge_amount,
        disputed,
        currency: ctx.currency().to_string(),
        status,
        paid: succeeded,
        description: charge_description,
        created,
        outcome,
        payment_method_details: PaymentMethodDetails {
            method_type: "card".to_string(),
            card,
        },
    }
}

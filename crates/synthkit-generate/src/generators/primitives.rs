use chrono::{DateTime, Duration, Months, SecondsFormat, Utc};

use synthkit_core::{AmountRange, PlanInterval, Stage};

use crate::prng::{random, random_int, random_u64};

const BASE62: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const SECONDS_PER_DAY: i64 = 86_400;

/// Amount in major units drawn from `range`, scaled by the stage multiplier
/// and rounded to two decimals.
pub fn amount(seed: i64, range: &AmountRange, stage: Stage) -> f64 {
    let base = range.min + random(seed) * (range.max - range.min);
    round2(base * stage.amount_multiplier())
}

/// Amount drawn from the `tier`-th of `tiers` equal bands of `range`, so a
/// pool of plans is priced in ascending order.
pub fn tiered_amount(seed: i64, range: &AmountRange, tier: usize, tiers: usize, stage: Stage) -> f64 {
    let tiers = tiers.max(1) as f64;
    let tier = (tier as f64).min(tiers - 1.0);
    let width = (range.max - range.min) / tiers;
    let band = AmountRange::new(range.min + width * tier, range.min + width * (tier + 1.0));
    amount(seed, &band, stage)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert major units to Stripe minor units (cents).
pub fn to_minor_units(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Instant within `[reference - window_days, reference]`.
pub fn timestamp(seed: i64, reference: DateTime<Utc>, window_days: i64) -> DateTime<Utc> {
    let back = random_int(seed, 0, window_days.max(0) * SECONDS_PER_DAY);
    reference - Duration::seconds(back)
}

/// Unix timestamp within `[start, end]`; `start` when the window is empty.
pub fn timestamp_between(seed: i64, start: i64, end: i64) -> i64 {
    random_int(seed, start, end.max(start))
}

pub fn iso_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Advance a unix timestamp by `count` billing intervals.
pub fn advance_interval(timestamp: i64, interval: PlanInterval, count: u32) -> i64 {
    let fallback_days = match interval {
        PlanInterval::Week => 7,
        PlanInterval::Month => 30,
        PlanInterval::Year => 365,
    };
    let fallback = timestamp + fallback_days * SECONDS_PER_DAY * i64::from(count);

    let Some(start) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
        return fallback;
    };
    let advanced = match interval {
        PlanInterval::Week => start.checked_add_signed(Duration::weeks(i64::from(count))),
        PlanInterval::Month => start.checked_add_months(Months::new(count)),
        PlanInterval::Year => start.checked_add_months(Months::new(count.saturating_mul(12))),
    };
    advanced.map(|value| value.timestamp()).unwrap_or(fallback)
}

/// Stripe-style identifier: `prefix_` + ten seeded base62 characters + the
/// record index in base62, which keeps ids unique within a pool.
pub fn stripe_id(prefix: &str, seed: i64, index: usize) -> String {
    let mut id = String::with_capacity(prefix.len() + 16);
    id.push_str(prefix);
    id.push('_');

    // 62^10 < 2^64, so one draw covers the random part.
    let mut bits = random_u64(seed);
    for _ in 0..10 {
        id.push(BASE62[(bits % 62) as usize] as char);
        bits /= 62;
    }

    let mut suffix = Vec::new();
    let mut value = index;
    loop {
        suffix.push(BASE62[value % 62]);
        value /= 62;
        if value == 0 {
            break;
        }
    }
    while suffix.len() < 4 {
        suffix.push(b'0');
    }
    id.extend(suffix.iter().rev().map(|byte| *byte as char));
    id
}

/// Uppercase alphanumeric code of `len` characters.
pub fn code(seed: i64, len: usize) -> String {
    let mut bits = random_u64(seed);
    (0..len)
        .map(|_| {
            let ch = BASE62[(bits % 36) as usize] as char;
            bits /= 36;
            ch
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripe_ids_embed_the_index() {
        let first = stripe_id("cus", 7, 0);
        let second = stripe_id("cus", 7, 1);
        assert!(first.starts_with("cus_"));
        assert_eq!(first.len(), "cus_".len() + 14);
        assert_ne!(first, second);
    }

    #[test]
    fn monthly_interval_uses_calendar_months() {
        // 2024-01-31T00:00:00Z + 1 month clamps to 2024-02-29.
        let start = 1_706_659_200;
        let end = advance_interval(start, PlanInterval::Month, 1);
        assert_eq!(end - start, 29 * SECONDS_PER_DAY);
    }
}

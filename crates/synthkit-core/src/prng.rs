//! Stateless seeded randomness.
//!
//! Every draw is a pure function of an integer seed. Callers derive a
//! distinct seed for each logically independent draw: records are spaced by
//! a large stride (`base + index * stride`) and fields within a record add a
//! small offset (`record_seed + field`). Seeds are integers, so NaN and
//! infinite inputs cannot occur.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform float in `[0, 1)` for `seed`.
pub fn random(seed: i64) -> f64 {
    rng_for(seed).random::<f64>()
}

/// Uniform `u64` for `seed`.
pub fn random_u64(seed: i64) -> u64 {
    rng_for(seed).next_u64()
}

/// Uniform float in `[min, max)`; returns `min` when the range is empty.
pub fn random_range(seed: i64, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    min + random(seed) * (max - min)
}

/// Uniform integer in `[min, max]` (inclusive).
pub fn random_int(seed: i64, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    let span = (max as i128 - min as i128 + 1) as u128;
    let offset = (random_u64(seed) as u128 % span) as i128;
    (min as i128 + offset) as i64
}

/// Uniform index in `[0, len)`; `None` for an empty pool.
pub fn random_index(seed: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((random_u64(seed) % len as u64) as usize)
}

/// Uniform pick from a slice; `None` for an empty slice.
pub fn pick<T>(seed: i64, items: &[T]) -> Option<&T> {
    random_index(seed, items.len()).map(|idx| &items[idx])
}

/// Bernoulli draw with probability `p`.
pub fn chance(seed: i64, p: f64) -> bool {
    random(seed) < p
}

/// Weighted pick; weights need not sum to one. Returns `None` when every
/// weight is zero or the slice is empty.
pub fn weighted_pick<T: Copy>(seed: i64, entries: &[(T, f64)]) -> Option<T> {
    let total: f64 = entries.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }
    let mut target = random(seed) * total;
    for (value, weight) in entries {
        let weight = weight.max(0.0);
        if target < weight {
            return Some(*value);
        }
        target -= weight;
    }
    entries.last().map(|(value, _)| *value)
}

/// Seed of the `index`-th record of a kind spaced by `stride`.
pub fn record_seed(base: i64, index: usize, stride: i64) -> i64 {
    base.wrapping_add((index as i64).wrapping_mul(stride))
}

/// Seed of a field draw inside a record.
pub fn field_seed(record: i64, offset: i64) -> i64 {
    record.wrapping_add(offset)
}

fn rng_for(seed: i64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(mix_seed(seed))
}

fn mix_seed(seed: i64) -> u64 {
    let mut hash = (seed as u64).wrapping_add(0x9e37_79b9_7f4a_7c15);
    hash = (hash ^ (hash >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    hash = (hash ^ (hash >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    hash ^ (hash >> 31)
}

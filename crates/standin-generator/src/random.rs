//! Random value primitives.
//!
//! Free functions generic over the RNG so callers can plug in a seeded
//! `StdRng` and reproduce a batch, or any other `Rng` source. Functions
//! whose contract a caller can violate (empty range, undrawable weights)
//! return `ConfigError` instead of repairing the input.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use standin_core::{ConfigError, FieldValue};

/// Generate a random integer in `[min, max]` inclusive.
pub fn int_between<R: Rng>(rng: &mut R, min: i64, max: i64) -> Result<i64, ConfigError> {
    if min > max {
        return Err(ConfigError::EmptyIntRange { min, max });
    }
    Ok(rng.random_range(min..=max))
}

/// Generate a random float in `[min, max]` rounded to `decimals` digits.
///
/// Rounding can nudge a value past a bound with more precision than
/// `decimals`, so the result is clamped back into the range.
pub fn float_between<R: Rng>(
    rng: &mut R,
    min: f64,
    max: f64,
    decimals: u8,
) -> Result<f64, ConfigError> {
    if min > max {
        return Err(ConfigError::EmptyFloatRange { min, max });
    }
    let value = rng.random_range(min..=max);
    let factor = 10f64.powi(i32::from(decimals));
    Ok(((value * factor).round() / factor).clamp(min, max))
}

/// Draw one label with probability proportional to its weight.
///
/// Weights need not sum to 1; negative weights count as zero. Fails with
/// `ConfigError::NoPositiveWeight` when nothing can be drawn.
pub fn weighted_choice<'a, T, R: Rng>(
    rng: &mut R,
    choices: &'a [(T, f64)],
) -> Result<&'a T, ConfigError> {
    let total: f64 = choices.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if total <= 0.0 {
        return Err(ConfigError::NoPositiveWeight);
    }

    let mut draw = rng.random_range(0.0..total);
    let mut chosen = None;
    for (label, weight) in choices {
        let weight = weight.max(0.0);
        if weight > 0.0 {
            // Floating-point drift can step past the last bucket, so the
            // last positive label stays selected as the fallback.
            chosen = Some(label);
            if draw < weight {
                break;
            }
            draw -= weight;
        }
    }
    chosen.ok_or(ConfigError::NoPositiveWeight)
}

/// Generate a datetime uniformly sampled from the last `days_ago` days.
pub fn recent_datetime<R: Rng>(rng: &mut R, days_ago: u32) -> DateTime<Utc> {
    let window_seconds = i64::from(days_ago) * 86_400;
    let offset = rng.random_range(0..=window_seconds);
    Utc::now() - Duration::seconds(offset)
}

/// Pick one element uniformly from a slice. Empty slices yield `None`.
pub fn pick<'a, T, R: Rng>(rng: &mut R, pool: &'a [T]) -> Option<&'a T> {
    if pool.is_empty() {
        None
    } else {
        pool.get(rng.random_range(0..pool.len()))
    }
}

/// Generate an array of unique samples from a pool of strings.
///
/// The length is drawn from `[min_len, max_len]`, clamped to the pool
/// size so uniqueness always holds.
pub fn sample_array<R: Rng>(
    rng: &mut R,
    pool: &[String],
    min_len: usize,
    max_len: usize,
) -> FieldValue {
    if pool.is_empty() || max_len == 0 {
        return FieldValue::Array(Vec::new());
    }

    let max_len = max_len.min(pool.len());
    let min_len = min_len.min(max_len);
    let len = rng.random_range(min_len..=max_len);

    // Partial Fisher-Yates: only the prefix we take needs shuffling.
    let mut indices: Vec<usize> = (0..pool.len()).collect();
    for i in 0..len {
        let j = rng.random_range(i..indices.len());
        indices.swap(i, j);
    }

    FieldValue::Array(
        indices[..len]
            .iter()
            .map(|&i| FieldValue::Text(pool[i].clone()))
            .collect(),
    )
}

/// Generate a random number with exactly `count` digits.
///
/// The first digit is 1-9 so the string never carries a leading zero.
pub fn digits<R: Rng>(rng: &mut R, count: usize) -> String {
    if count == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(count);
    result.push((b'0' + rng.random_range(1..10u8)) as char);
    for _ in 1..count {
        result.push((b'0' + rng.random_range(0..10u8)) as char);
    }
    result
}

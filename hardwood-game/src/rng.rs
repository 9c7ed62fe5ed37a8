//! Sampling primitives shared by every stochastic model in the engine.
//!
//! Counting stats use discrete samplers instead of rounded expectations:
//! makes come from binomial draws so a game can never record more makes
//! than attempts, and uncapped counting events (rebounds, assists) come
//! from Poisson draws.

use rand::Rng;

/// Knuth's product method degrades for large rates; rates in this engine
/// stay far below this cap in practice.
const POISSON_LAMBDA_CAP: f64 = 30.0;

/// Count of Bernoulli successes over `n` trials with probability `p`.
///
/// `p` outside [0, 1] is clamped, so `binomial(n, 1.0) == n` and
/// `binomial(n, 0.0) == 0` exactly.
pub fn binomial(rng: &mut impl Rng, n: u32, p: f64) -> u32 {
    if n == 0 || p <= 0.0 || p.is_nan() {
        return 0;
    }
    if p >= 1.0 {
        return n;
    }
    let mut successes = 0;
    for _ in 0..n {
        if rng.random::<f64>() < p {
            successes += 1;
        }
    }
    successes
}

/// Poisson-distributed count via Knuth's product method.
///
/// Non-positive or non-finite rates return 0.
pub fn poisson(rng: &mut impl Rng, lambda: f64) -> u32 {
    if !lambda.is_finite() || lambda <= 0.0 {
        return 0;
    }
    let lambda = lambda.min(POISSON_LAMBDA_CAP);
    let limit = (-lambda).exp();
    let mut k: u32 = 0;
    let mut product = 1.0;
    loop {
        product *= rng.random::<f64>();
        if product <= limit {
            return k;
        }
        k += 1;
    }
}

/// Single Bernoulli trial at probability `chance` (clamped to [0, 1]).
pub fn roll(rng: &mut impl Rng, chance: f64) -> bool {
    if chance.is_nan() || chance <= 0.0 {
        return false;
    }
    if chance >= 1.0 {
        return true;
    }
    rng.random::<f64>() < chance
}

/// Integer jitter in [-spread, spread].
pub fn jitter(rng: &mut impl Rng, spread: i32) -> i32 {
    if spread <= 0 {
        return 0;
    }
    rng.random_range(-spread..=spread)
}

/// Uniform float in [lo, hi]; returns `lo` when the range is degenerate.
pub fn uniform(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    if !(hi > lo) {
        return lo;
    }
    rng.random_range(lo..=hi)
}

/// Uniform integer dollars in [lo, hi].
pub fn uniform_dollars(rng: &mut impl Rng, lo: i64, hi: i64) -> i64 {
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

//! Invariant-checked currency type.
//!
//! Balances and salaries are never negative and never fractional. `Cash`
//! makes those states unrepresentable: construction coerces invalid values
//! to zero and arithmetic saturates at the floor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numbers::round_f64_to_i64;

/// Whole dollars, never negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Cash(i64);

impl Cash {
    pub const ZERO: Self = Self(0);

    /// Build from whole dollars; negatives floor to zero.
    #[must_use]
    pub const fn new(dollars: i64) -> Self {
        Self(if dollars < 0 { 0 } else { dollars })
    }

    /// Build from a float amount; NaN/infinite/negative all floor to zero.
    #[must_use]
    pub fn from_f64(amount: f64) -> Self {
        if !amount.is_finite() {
            return Self::ZERO;
        }
        Self(round_f64_to_i64(amount).max(0))
    }

    #[must_use]
    pub const fn dollars(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn can_afford(self, cost: Self) -> bool {
        self.0 >= cost.0
    }

    /// Add funds, saturating on overflow.
    #[must_use]
    pub fn credit(self, amount: Self) -> Self {
        Self(self.0.saturating_add(amount.0))
    }

    /// Remove funds; the balance never drops below zero.
    #[must_use]
    pub fn debit(self, amount: Self) -> Self {
        Self(self.0.saturating_sub(amount.0).max(0))
    }

    /// Re-assert the floor; used by the integrity guard for balances that
    /// arrived through deserialization of legacy saves.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self(self.0.max(0))
    }

    /// Scale by a float factor (endorsement multipliers); invalid factors
    /// leave the amount unchanged.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        if !factor.is_finite() || factor < 0.0 {
            return self;
        }
        Self::from_f64(crate::numbers::i64_to_f64(self.0) * factor)
    }
}

impl fmt::Display for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

//! Off-day training sessions.
//!
//! Training trades cash and peak condition for attribute growth. Gains
//! taper as a rating approaches the player's potential ceiling and
//! slow further past age 30.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::money::Cash;
use crate::player::Player;
use crate::ratings::{Attribute, RATING_MAX};
use crate::rng::roll;

const VETERAN_AGE: u32 = 30;
const VETERAN_GAIN_CHANCE: f64 = 0.55;
const LOW_MORALE: i32 = 40;
const LOW_MORALE_GAIN_CHANCE: f64 = 0.60;
const NEAR_POTENTIAL_MARGIN: i32 = 3;
const NEAR_POTENTIAL_GAIN_CHANCE: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Intensity {
    Light,
    #[default]
    Moderate,
    Intense,
}

impl Intensity {
    pub const ALL: [Self; 3] = [Self::Light, Self::Moderate, Self::Intense];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Intense => "intense",
        }
    }

    #[must_use]
    pub fn cost(self) -> Cash {
        match self {
            Self::Light => Cash::new(200),
            Self::Moderate => Cash::new(500),
            Self::Intense => Cash::new(1_200),
        }
    }

    /// Peak condition burned by the session.
    #[must_use]
    pub fn peak_cost(self) -> i32 {
        match self {
            Self::Light => 2,
            Self::Moderate => 5,
            Self::Intense => 10,
        }
    }

    fn max_gain(self) -> i32 {
        match self {
            Self::Light => 1,
            Self::Moderate => 2,
            Self::Intense => 3,
        }
    }
}

/// What a training session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingOutcome {
    pub attribute: Attribute,
    pub gain: i32,
    pub message: String,
}

/// Run one session. Refuses (no state change) when the player cannot
/// cover the fee.
pub fn train(
    player: &mut Player,
    attribute: Attribute,
    intensity: Intensity,
    rng: &mut impl Rng,
) -> TrainingOutcome {
    let fee = intensity.cost();
    if !player.cash.can_afford(fee) {
        return TrainingOutcome {
            attribute,
            gain: 0,
            message: format!("Not enough cash for a {} session ({fee}).", intensity.key()),
        };
    }
    player.cash = player.cash.debit(fee);
    player.condition.peak -= intensity.peak_cost();
    player.condition.clamp();

    let current = player.ratings.get(attribute);
    let ceiling = player.potential.min(RATING_MAX);
    let mut gain = rng.random_range(0..=intensity.max_gain());

    if player.has_service(crate::player::ServiceKind::PersonalTrainer) {
        gain += 1;
    }
    if current >= ceiling {
        gain = 0;
    } else if current >= ceiling - NEAR_POTENTIAL_MARGIN && !roll(rng, NEAR_POTENTIAL_GAIN_CHANCE) {
        gain = 0;
    }
    if gain > 0 && player.age > VETERAN_AGE && !roll(rng, VETERAN_GAIN_CHANCE) {
        gain = 0;
    }
    // Dispirited players get less out of the gym.
    if gain > 0 && player.condition.morale < LOW_MORALE && !roll(rng, LOW_MORALE_GAIN_CHANCE) {
        gain = 0;
    }
    gain = gain.min(ceiling - current).max(0);

    if gain > 0 {
        player.ratings.set(attribute, current + gain);
        player.ratings.recompute_overall();
    }
    let message = if gain > 0 {
        format!("{} +{gain} after a {} session.", attribute.key(), intensity.key())
    } else {
        format!("Hard {} session, no measurable {} gain.", intensity.key(), attribute.key())
    };
    info!("training: {message}");
    TrainingOutcome {
        attribute,
        gain,
        message,
    }
}

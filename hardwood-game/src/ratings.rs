//! Player ratings, the derived overall, and the age/progression curves.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::numbers::round_f64_to_i32;
use crate::rng::jitter;

pub const RATING_MIN: i32 = 40;
pub const RATING_MAX: i32 = 99;
/// Freshly generated ratings cap lower so rookies have room to grow.
pub const ROOKIE_RATING_MAX: i32 = 95;

const SECONDARY_DELTA_SCALE: f64 = 0.7;

/// One of the nine tracked skills. The first five are "primary" and feed
/// the derived overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Shooting,
    Finishing,
    Playmaking,
    Defense,
    Rebounding,
    Stamina,
    Dunking,
    Passing,
    Leadership,
}

impl Attribute {
    pub const ALL: [Self; 9] = [
        Self::Shooting,
        Self::Finishing,
        Self::Playmaking,
        Self::Defense,
        Self::Rebounding,
        Self::Stamina,
        Self::Dunking,
        Self::Passing,
        Self::Leadership,
    ];

    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(
            self,
            Self::Shooting | Self::Finishing | Self::Playmaking | Self::Defense | Self::Rebounding
        )
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Shooting => "shooting",
            Self::Finishing => "finishing",
            Self::Playmaking => "playmaking",
            Self::Defense => "defense",
            Self::Rebounding => "rebounding",
            Self::Stamina => "stamina",
            Self::Dunking => "dunking",
            Self::Passing => "passing",
            Self::Leadership => "leadership",
        }
    }
}

/// Full skill sheet for one player. `overall` is derived, never set
/// directly; call [`RatingSet::recompute_overall`] after any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSet {
    pub shooting: i32,
    pub finishing: i32,
    pub playmaking: i32,
    pub defense: i32,
    pub rebounding: i32,
    pub stamina: i32,
    pub dunking: i32,
    pub passing: i32,
    pub leadership: i32,
    #[serde(default)]
    pub overall: i32,
}

impl Default for RatingSet {
    fn default() -> Self {
        let mut ratings = Self {
            shooting: 60,
            finishing: 60,
            playmaking: 60,
            defense: 60,
            rebounding: 60,
            stamina: 60,
            dunking: 60,
            passing: 60,
            leadership: 60,
            overall: 0,
        };
        ratings.recompute_overall();
        ratings
    }
}

impl RatingSet {
    #[must_use]
    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Shooting => self.shooting,
            Attribute::Finishing => self.finishing,
            Attribute::Playmaking => self.playmaking,
            Attribute::Defense => self.defense,
            Attribute::Rebounding => self.rebounding,
            Attribute::Passing => self.passing,
            Attribute::Stamina => self.stamina,
            Attribute::Dunking => self.dunking,
            Attribute::Leadership => self.leadership,
        }
    }

    pub const fn set(&mut self, attribute: Attribute, value: i32) {
        let slot = match attribute {
            Attribute::Shooting => &mut self.shooting,
            Attribute::Finishing => &mut self.finishing,
            Attribute::Playmaking => &mut self.playmaking,
            Attribute::Defense => &mut self.defense,
            Attribute::Rebounding => &mut self.rebounding,
            Attribute::Passing => &mut self.passing,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Dunking => &mut self.dunking,
            Attribute::Leadership => &mut self.leadership,
        };
        *slot = value;
    }

    /// Unweighted mean of the five primary skills, rounded to nearest.
    pub fn recompute_overall(&mut self) {
        let sum = self.shooting + self.finishing + self.playmaking + self.defense + self.rebounding;
        self.overall = round_f64_to_i32(f64::from(sum) / 5.0);
    }

    /// Clamp every attribute into the live rating band and refresh the
    /// overall. The integrity guard calls this after every mutation path.
    pub fn clamp(&mut self) {
        for attribute in Attribute::ALL {
            let clamped = self.get(attribute).clamp(RATING_MIN, RATING_MAX);
            self.set(attribute, clamped);
        }
        self.recompute_overall();
    }

    /// Sum of the five primary skills; used by the usage model.
    #[must_use]
    pub const fn primary_sum(&self) -> i32 {
        self.shooting + self.finishing + self.playmaking + self.defense + self.rebounding
    }
}

/// Production multiplier by age: flat through 23, peaking at 1.2 at 27,
/// then non-increasing with accelerating decline past 35, floored at 0.5.
/// This scales in-game production, not the ratings themselves.
#[must_use]
pub fn age_multiplier(age: u32) -> f64 {
    match age {
        0..=23 => 1.0,
        24..=26 => 1.0 + 0.05 * f64::from(age - 23),
        27 => 1.2,
        28..=31 => 1.2 - 0.04 * f64::from(age - 27),
        32..=35 => 1.04 - 0.06 * f64::from(age - 31),
        36..=38 => (0.80 - 0.09 * f64::from(age - 35)).max(0.5),
        _ => 0.5,
    }
}

/// Yearly delta bracket applied at each season rollover.
fn aging_delta(rng: &mut impl Rng, age: u32, overall: i32, potential: i32) -> i32 {
    match age {
        0..=24 => {
            if overall < potential {
                rng.random_range(1..=3)
            } else {
                rng.random_range(-1..=1)
            }
        }
        25..=28 => rng.random_range(0..=2),
        29..=32 => rng.random_range(-2..=0),
        _ => rng.random_range(-3..=-1),
    }
}

/// Apply one season of growth or decline to every attribute.
///
/// Secondary attributes move at 0.7x the bracket delta; every attribute
/// also picks up independent unit noise. A player sitting at potential can
/// still drift either way through the noise term.
pub fn progress_aging(ratings: &mut RatingSet, age: u32, potential: i32, rng: &mut impl Rng) {
    let delta = aging_delta(rng, age, ratings.overall, potential);
    for attribute in Attribute::ALL {
        let scale = if attribute.is_primary() {
            1.0
        } else {
            SECONDARY_DELTA_SCALE
        };
        let moved = round_f64_to_i32(f64::from(delta) * scale) + jitter(rng, 1);
        let next = (ratings.get(attribute) + moved).clamp(RATING_MIN, RATING_MAX);
        ratings.set(attribute, next);
    }
    ratings.recompute_overall();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn overall_is_mean_of_primaries() {
        let mut ratings = RatingSet {
            shooting: 80,
            finishing: 75,
            playmaking: 70,
            defense: 65,
            rebounding: 60,
            ..RatingSet::default()
        };
        ratings.recompute_overall();
        assert_eq!(ratings.overall, 70);
    }

    #[test]
    fn age_curve_hits_documented_anchors() {
        assert!((age_multiplier(23) - 1.0).abs() < f64::EPSILON);
        assert!((age_multiplier(27) - 1.2).abs() < f64::EPSILON);
        assert!((age_multiplier(39) - 0.5).abs() < f64::EPSILON);
        assert!((age_multiplier(45) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn age_curve_is_non_increasing_after_peak() {
        let mut previous = age_multiplier(27);
        for age in 28..=45 {
            let current = age_multiplier(age);
            assert!(
                current <= previous + f64::EPSILON,
                "multiplier rose at age {age}"
            );
            previous = current;
        }
    }

    #[test]
    fn aging_keeps_ratings_in_band() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut ratings = RatingSet::default();
        for age in 19..45 {
            progress_aging(&mut ratings, age, 90, &mut rng);
            for attribute in Attribute::ALL {
                let value = ratings.get(attribute);
                assert!((RATING_MIN..=RATING_MAX).contains(&value));
            }
        }
    }

    #[test]
    fn young_players_below_potential_trend_upward() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let mut total_delta = 0;
        for _ in 0..50 {
            let mut ratings = RatingSet::default();
            let before = ratings.overall;
            progress_aging(&mut ratings, 20, 95, &mut rng);
            total_delta += ratings.overall - before;
        }
        assert!(total_delta > 0, "expected net growth, got {total_delta}");
    }

    #[test]
    fn veterans_trend_downward() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let mut total_delta = 0;
        for _ in 0..50 {
            let mut ratings = RatingSet::default();
            let before = ratings.overall;
            progress_aging(&mut ratings, 36, 90, &mut rng);
            total_delta += ratings.overall - before;
        }
        assert!(total_delta < 0, "expected net decline, got {total_delta}");
    }
}

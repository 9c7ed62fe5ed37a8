//! Round-by-round playoff elimination with round-dependent difficulty.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rng::roll;

/// A team seeded outside this rank never enters the bracket.
pub const PLAYOFF_CUTOFF_RANK: u32 = 16;
const FINALS_MVP_CHANCE_CAP: f64 = 0.75;

/// Later rounds discount the regular-season win chance.
const ROUND_DIFFICULTY: [f64; 4] = [1.0, 0.9, 0.8, 0.7];

pub const ROUND_NAMES: [&str; 4] = [
    "First Round",
    "Conference Semifinals",
    "Conference Finals",
    "Finals",
];

/// Outcome of one postseason run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayoffResult {
    pub champion: bool,
    pub finals_mvp: bool,
    /// Rounds won before elimination (4 = title).
    pub wins: u32,
}

impl PlayoffResult {
    #[must_use]
    pub const fn missed() -> Self {
        Self {
            champion: false,
            finals_mvp: false,
            wins: 0,
        }
    }
}

/// Inputs the Finals MVP roll reads; all derived from the season in
/// progress, not career totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalsProfile {
    pub ppg: f64,
    pub rpg: f64,
    pub apg: f64,
    pub leadership: i32,
    pub seed_rank: u32,
}

fn finals_mvp_chance(profile: &FinalsProfile) -> f64 {
    let mut chance: f64 = 0.15;
    if profile.ppg >= 27.0 {
        chance += 0.30;
    } else if profile.ppg >= 22.0 {
        chance += 0.15;
    }
    if profile.rpg + profile.apg >= 12.0 {
        chance += 0.15;
    }
    if profile.leadership >= 80 {
        chance += 0.10;
    }
    if profile.seed_rank <= 4 {
        chance += 0.05;
    }
    chance.min(FINALS_MVP_CHANCE_CAP)
}

/// Simulate a full postseason for the player's team.
///
/// `seed_rank` is the 1-based league-wide standings rank entering the
/// bracket; ranks past the cutoff short-circuit to a missed postseason.
/// `base_win_chance` is the same per-game chance the regular season uses;
/// each round multiplies it by that round's difficulty discount, and the
/// first lost round ends the run.
#[must_use]
pub fn simulate_playoffs(
    seed_rank: u32,
    base_win_chance: f64,
    profile: &FinalsProfile,
    rng: &mut impl Rng,
) -> PlayoffResult {
    if seed_rank == 0 || seed_rank > PLAYOFF_CUTOFF_RANK {
        return PlayoffResult::missed();
    }

    let mut result = PlayoffResult::missed();
    for difficulty in ROUND_DIFFICULTY {
        let chance = (base_win_chance * difficulty).clamp(0.05, 0.80);
        if !roll(rng, chance) {
            return result;
        }
        result.wins += 1;
    }

    result.champion = true;
    result.finals_mvp = roll(rng, finals_mvp_chance(profile));
    result
}

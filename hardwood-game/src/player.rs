//! The protagonist: identity, condition, money, contract, and entourage.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::archetypes::Archetype;
use crate::money::Cash;
use crate::numbers::round_f64_to_i64;
use crate::ratings::RatingSet;
use crate::rng::uniform_dollars;
use crate::stats::{Career, SeasonStats};

pub const CONDITION_MIN: i32 = 0;
pub const CONDITION_MAX: i32 = 100;
pub const TEAMMATE_COUNT: usize = 4;

const FIRST_NAMES: [&str; 16] = [
    "Marcus", "Jalen", "Devin", "Theo", "Andre", "Luka", "Kobe", "Darius", "Elias", "Trey",
    "Malik", "Jordan", "Nikola", "Cade", "Isaiah", "Victor",
];

const LAST_NAMES: [&str; 16] = [
    "Wright", "Okafor", "Petrov", "Hayes", "Barnes", "Kimura", "Dawson", "Vining", "Carter",
    "Mensah", "Ruiz", "Antet", "Fields", "Novak", "Brooks", "Sloane",
];

/// Day-to-day scalars, all clamped [0, 100]. `peak` is the fatigue meter
/// (higher is fresher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub health: i32,
    pub peak: i32,
    pub morale: i32,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            health: 100,
            peak: 100,
            morale: 70,
        }
    }
}

impl Condition {
    pub fn clamp(&mut self) {
        self.health = self.health.clamp(CONDITION_MIN, CONDITION_MAX);
        self.peak = self.peak.clamp(CONDITION_MIN, CONDITION_MAX);
        self.morale = self.morale.clamp(CONDITION_MIN, CONDITION_MAX);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    PlayerOption,
    TeamOption,
    NoTrade,
}

/// Current deal. `salary` is the total value across `years`; `year` is the
/// 1-based index of the season in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub team: String,
    pub years: u32,
    pub salary: Cash,
    pub year: u32,
    #[serde(default)]
    pub clause: Option<Clause>,
}

impl Contract {
    /// Yearly slice of the total value, paid out at each offseason.
    #[must_use]
    pub fn annual_salary(&self) -> Cash {
        if self.years == 0 {
            return Cash::ZERO;
        }
        Cash::new(self.salary.dollars() / i64::from(self.years))
    }

    #[must_use]
    pub const fn expired(&self) -> bool {
        self.year > self.years
    }
}

/// Entry-level deal: `salary = round((overall * 80 + rnd(100, 500)) * years)`
/// with the year count stepped on overall.
#[must_use]
pub fn rookie_contract(team: &str, overall: i32, rng: &mut impl Rng) -> Contract {
    let years: u32 = if overall > 78 {
        4
    } else if overall > 70 {
        3
    } else {
        2
    };
    let per_year = f64::from(overall) * 80.0 + crate::numbers::i64_to_f64(uniform_dollars(rng, 100, 500));
    let salary = Cash::new(round_f64_to_i64(per_year * f64::from(years)));
    Contract {
        team: team.to_string(),
        years,
        salary,
        year: 1,
        clause: None,
    }
}

/// Sponsorship deal paying `value` each offseason until it runs out or a
/// scandal voids it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    pub name: String,
    pub value: Cash,
    /// `None` is an evergreen deal (still scandal-terminable).
    #[serde(default)]
    pub years_left: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    PersonalTrainer,
    Physiotherapist,
    MediaTeam,
}

impl ServiceKind {
    pub const ALL: [Self; 3] = [Self::PersonalTrainer, Self::Physiotherapist, Self::MediaTeam];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PersonalTrainer => "Personal Trainer",
            Self::Physiotherapist => "Physiotherapist",
            Self::MediaTeam => "Media Team",
        }
    }

    /// Up-front cost for a 12-week engagement.
    #[must_use]
    pub const fn cost(self) -> Cash {
        match self {
            Self::PersonalTrainer => Cash::new(12_000),
            Self::Physiotherapist => Cash::new(9_000),
            Self::MediaTeam => Cash::new(15_000),
        }
    }

    #[must_use]
    pub const fn duration_weeks(self) -> u32 {
        12
    }
}

/// A running paid engagement, counted down weekly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumService {
    pub kind: ServiceKind,
    pub weeks_left: u32,
}

/// Roster snapshot; regenerated whenever the player changes teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teammate {
    pub name: String,
    pub overall: i32,
}

#[must_use]
pub fn generate_teammates(rng: &mut impl Rng, team_strength: f64) -> Vec<Teammate> {
    (0..TEAMMATE_COUNT)
        .map(|_| {
            let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
            let overall = (crate::numbers::round_f64_to_i32(team_strength)
                + rng.random_range(-8..=8))
            .clamp(55, 95);
            Teammate {
                name: format!("{first} {last}"),
                overall,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub age: u32,
    pub archetype: Archetype,
    pub ratings: RatingSet,
    /// Ceiling for `ratings.overall`; growth noise may still drift past it.
    pub potential: i32,
    pub condition: Condition,
    /// Public profile in [0, 100].
    pub fame: i32,
    pub followers: u64,
    pub cash: Cash,
    /// Index into the league's team table.
    pub team: usize,
    pub contract: Contract,
    #[serde(default)]
    pub teammates: Vec<Teammate>,
    #[serde(default)]
    pub stats: SeasonStats,
    #[serde(default)]
    pub career: Career,
    #[serde(default)]
    pub endorsements: Vec<Endorsement>,
    #[serde(default)]
    pub services: Vec<PremiumService>,
    /// Games the player is sidelined for after an injury.
    #[serde(default)]
    pub injury_games_out: u32,
    #[serde(default)]
    pub retired: bool,
}

impl Player {
    /// Average teammate overall, the chemistry input to win chance.
    #[must_use]
    pub fn chemistry(&self) -> f64 {
        if self.teammates.is_empty() {
            return 60.0;
        }
        let sum: i32 = self.teammates.iter().map(|t| t.overall).sum();
        f64::from(sum) / crate::numbers::u64_to_f64(self.teammates.len() as u64)
    }

    #[must_use]
    pub fn has_service(&self, kind: ServiceKind) -> bool {
        self.services.iter().any(|service| service.kind == kind)
    }

    /// Star tier used by follower growth and endorsement multipliers.
    #[must_use]
    pub const fn star_tier(&self) -> u32 {
        match self.ratings.overall {
            90.. => 3,
            85..=89 => 2,
            80..=84 => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn rookie_contract_matches_threshold_table() {
        let mut rng = ChaCha20Rng::seed_from_u64(61);
        let low = rookie_contract("Utah Peaks", 65, &mut rng);
        let mid = rookie_contract("Utah Peaks", 74, &mut rng);
        let high = rookie_contract("Utah Peaks", 82, &mut rng);
        assert_eq!(low.years, 2);
        assert_eq!(mid.years, 3);
        assert_eq!(high.years, 4);
        for contract in [&low, &mid, &high] {
            assert_eq!(contract.year, 1);
            assert!(!contract.expired());
            let per_year = contract.salary.dollars() / i64::from(contract.years);
            // overall*80 + rnd(100,500)
            assert!(per_year >= 65 * 80 + 100);
            assert!(per_year <= 82 * 80 + 500);
        }
    }

    #[test]
    fn rookie_salary_formula_bounds_per_overall() {
        let mut rng = ChaCha20Rng::seed_from_u64(62);
        for _ in 0..50 {
            let contract = rookie_contract("Miami Tide", 75, &mut rng);
            let total = contract.salary.dollars();
            assert!(total >= (75 * 80 + 100) * 3);
            assert!(total <= (75 * 80 + 500) * 3);
        }
    }

    #[test]
    fn condition_clamps_to_band() {
        let mut condition = Condition {
            health: 130,
            peak: -5,
            morale: 101,
        };
        condition.clamp();
        assert_eq!(condition.health, 100);
        assert_eq!(condition.peak, 0);
        assert_eq!(condition.morale, 100);
    }

    #[test]
    fn teammates_are_strength_anchored() {
        let mut rng = ChaCha20Rng::seed_from_u64(63);
        let teammates = generate_teammates(&mut rng, 85.0);
        assert_eq!(teammates.len(), TEAMMATE_COUNT);
        for teammate in &teammates {
            assert!((55..=95).contains(&teammate.overall));
            assert!(teammate.name.contains(' '));
        }
    }

    #[test]
    fn annual_salary_splits_total() {
        let contract = Contract {
            team: "Denver Summit".to_string(),
            years: 4,
            salary: Cash::new(40_000),
            year: 1,
            clause: None,
        };
        assert_eq!(contract.annual_salary(), Cash::new(10_000));
    }
}

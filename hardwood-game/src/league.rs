//! League backdrop: 30 fixed franchises, weekly standings movement, and a
//! slowly drifting latent team strength.
//!
//! Championship attribution lives here in `champions`, queryable per
//! season; there is deliberately no process-global registry.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::numbers::round_f64_to_i32;
use crate::rng::{binomial, uniform};

pub const LEAGUE_SIZE: usize = 30;
pub const SEASON_GAMES: u32 = 82;
pub const REGULAR_GAMES_PER_WEEK: u32 = 10;
pub const OFF_WEEK_GAMES: u32 = 3;

const STRENGTH_MIN: f64 = 50.0;
const STRENGTH_MAX: f64 = 90.0;
const STRENGTH_REVERSION: f64 = 0.05;
const SEED_WIN_VARIANCE: i32 = 10;
const SEED_WINS_MIN: i32 = 10;
const SEED_WINS_MAX: i32 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conference {
    East,
    West,
}

impl Conference {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::East => "East",
            Self::West => "West",
        }
    }
}

/// (name, conference, base strength) for the 30 fixed franchises.
const FRANCHISES: [(&str, Conference, f64); LEAGUE_SIZE] = [
    ("Boston Spires", Conference::East, 84.0),
    ("Brooklyn Foundry", Conference::East, 66.0),
    ("New York Monarchs", Conference::East, 74.0),
    ("Philadelphia Liberty", Conference::East, 78.0),
    ("Toronto Huskies", Conference::East, 70.0),
    ("Chicago Stockyards", Conference::East, 72.0),
    ("Cleveland Forge", Conference::East, 76.0),
    ("Detroit Motors", Conference::East, 62.0),
    ("Indiana Racers", Conference::East, 71.0),
    ("Milwaukee Herd", Conference::East, 82.0),
    ("Atlanta Aviators", Conference::East, 69.0),
    ("Charlotte Crowns", Conference::East, 60.0),
    ("Miami Tide", Conference::East, 77.0),
    ("Orlando Rockets", Conference::East, 65.0),
    ("Washington Senators", Conference::East, 58.0),
    ("Dallas Mavericks", Conference::West, 75.0),
    ("Houston Comets", Conference::West, 64.0),
    ("Memphis Riverboats", Conference::West, 73.0),
    ("New Orleans Brass", Conference::West, 67.0),
    ("San Antonio Cannons", Conference::West, 63.0),
    ("Denver Summit", Conference::West, 83.0),
    ("Minnesota North", Conference::West, 76.0),
    ("Oklahoma City Twisters", Conference::West, 80.0),
    ("Portland Pioneers", Conference::West, 61.0),
    ("Utah Peaks", Conference::West, 59.0),
    ("Golden State Bridges", Conference::West, 79.0),
    ("Los Angeles Stars", Conference::West, 81.0),
    ("Los Angeles Harbor", Conference::West, 72.0),
    ("Phoenix Firebirds", Conference::West, 74.0),
    ("Sacramento Gold", Conference::West, 68.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub conference: Conference,
    pub wins: u32,
    pub losses: u32,
    /// Static franchise identity; strength drift reverts toward this.
    pub base_strength: f64,
    /// Latent quality driving weekly results, bounded [50, 90].
    pub current_strength: f64,
    #[serde(default)]
    pub titles: u32,
    #[serde(default)]
    pub last_title_season: Option<u32>,
}

impl Team {
    #[must_use]
    pub fn win_pct(&self) -> f64 {
        let played = self.wins + self.losses;
        if played == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(played)
    }

    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    fn per_game_win_chance(&self, rng: &mut impl Rng) -> f64 {
        let strength_frac = (self.current_strength - STRENGTH_MIN) / (STRENGTH_MAX - STRENGTH_MIN);
        let noise = uniform(rng, -0.05, 0.05);
        (0.20 + strength_frac * 0.60 + noise).clamp(0.20, 0.80)
    }

    fn drift_strength(&mut self, rng: &mut impl Rng) {
        let reversion = (self.base_strength - self.current_strength) * STRENGTH_REVERSION;
        let drift = uniform(rng, -1.5, 1.5);
        self.current_strength =
            (self.current_strength + reversion + drift).clamp(STRENGTH_MIN, STRENGTH_MAX);
    }

    /// Strength-derived projected record used as the pre-season backdrop.
    fn seed_record(&mut self, rng: &mut impl Rng) {
        let strength_frac = (self.current_strength - STRENGTH_MIN) / (STRENGTH_MAX - STRENGTH_MIN);
        let expected = f64::from(SEASON_GAMES) * strength_frac;
        let wins = (round_f64_to_i32(expected) + rng.random_range(-SEED_WIN_VARIANCE..=SEED_WIN_VARIANCE))
            .clamp(SEED_WINS_MIN, SEED_WINS_MAX);
        self.wins = u32::try_from(wins).unwrap_or(SEED_WINS_MIN as u32);
        self.losses = SEASON_GAMES - self.wins;
    }
}

/// Record of one season's title, kept inside league state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionRecord {
    pub season: u32,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct League {
    pub teams: Vec<Team>,
    #[serde(default)]
    pub champions: Vec<ChampionRecord>,
}

impl League {
    /// Seed the 30 franchises with strength-derived projected records.
    #[must_use]
    pub fn initialize(rng: &mut impl Rng) -> Self {
        let mut teams: Vec<Team> = FRANCHISES
            .iter()
            .map(|&(name, conference, base)| Team {
                name: name.to_string(),
                conference,
                wins: 0,
                losses: 0,
                base_strength: base,
                current_strength: (base + uniform(rng, -3.0, 3.0))
                    .clamp(STRENGTH_MIN, STRENGTH_MAX),
                titles: 0,
                last_title_season: None,
            })
            .collect();
        for team in &mut teams {
            team.seed_record(rng);
        }
        Self {
            teams,
            champions: Vec::new(),
        }
    }

    /// Zero every record at the Preseason -> Regular transition so the
    /// 82-game cap tracks live results.
    pub fn zero_records(&mut self) {
        for team in &mut self.teams {
            team.wins = 0;
            team.losses = 0;
        }
    }

    /// Re-seed the backdrop for the next season and drift strengths.
    pub fn reset_for_new_season(&mut self, rng: &mut impl Rng) {
        for team in &mut self.teams {
            team.drift_strength(rng);
            team.seed_record(rng);
        }
    }

    /// Advance every team by one simulated week.
    ///
    /// `regular` selects the 10-game regular-season batch over the 3-game
    /// backdrop batch; accumulation never exceeds the 82-game cap.
    pub fn update_standings(&mut self, regular: bool, rng: &mut impl Rng) {
        let batch = if regular {
            REGULAR_GAMES_PER_WEEK
        } else {
            OFF_WEEK_GAMES
        };
        for team in &mut self.teams {
            let playable = batch.min(SEASON_GAMES.saturating_sub(team.games_played()));
            if playable > 0 {
                let chance = team.per_game_win_chance(rng);
                let won = binomial(rng, playable, chance);
                team.wins += won;
                team.losses += playable - won;
            }
            team.drift_strength(rng);
        }
    }

    /// All 30 team indices ranked by win percentage, best first. Ties
    /// break toward the stronger roster so ordering is total.
    #[must_use]
    pub fn standings(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.teams.len()).collect();
        order.sort_by(|&a, &b| {
            let ta = &self.teams[a];
            let tb = &self.teams[b];
            tb.win_pct()
                .partial_cmp(&ta.win_pct())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    tb.current_strength
                        .partial_cmp(&ta.current_strength)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });
        order
    }

    /// Standings filtered to one conference.
    #[must_use]
    pub fn conference_standings(&self, conference: Conference) -> Vec<usize> {
        self.standings()
            .into_iter()
            .filter(|&idx| self.teams[idx].conference == conference)
            .collect()
    }

    /// 1-based league-wide rank of a team.
    #[must_use]
    pub fn rank_of(&self, team_idx: usize) -> u32 {
        let position = self
            .standings()
            .iter()
            .position(|&idx| idx == team_idx)
            .unwrap_or(LEAGUE_SIZE - 1);
        u32::try_from(position + 1).unwrap_or(LEAGUE_SIZE as u32)
    }

    pub fn record_champion(&mut self, season: u32, team_idx: usize) {
        if let Some(team) = self.teams.get_mut(team_idx) {
            team.titles += 1;
            team.last_title_season = Some(season);
            let name = team.name.clone();
            self.champions.push(ChampionRecord { season, team: name });
        }
    }

    #[must_use]
    pub fn champion_of(&self, season: u32) -> Option<&str> {
        self.champions
            .iter()
            .find(|record| record.season == season)
            .map(|record| record.team.as_str())
    }

    #[must_use]
    pub fn team_name(&self, team_idx: usize) -> &str {
        self.teams
            .get(team_idx)
            .map_or("Unknown", |team| team.name.as_str())
    }
}

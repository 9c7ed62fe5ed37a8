//! Box-score records: single games, season running totals, career sums.

use serde::{Deserialize, Serialize};

use crate::awards::Award;
use crate::numbers::u64_to_f64;

/// One simulated game's full stat line with derived efficiency metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GameStatLine {
    pub minutes: u32,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub fg_made: u32,
    pub fg_att: u32,
    pub three_made: u32,
    pub three_att: u32,
    pub ft_made: u32,
    pub ft_att: u32,
    /// Player Efficiency Rating, pace-adjusted, clamped [0, 50].
    pub per: f64,
    /// True shooting percentage in [0, 1]; 0 when no attempts.
    pub ts_pct: f64,
    /// Usage rate in [0.15, 0.38].
    pub usage: f64,
    pub team_won: bool,
}

/// Running totals for the season in progress. Reset at every season start
/// and rolled into [`Career`] at season end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeasonStats {
    pub games: u32,
    pub minutes: u64,
    pub points: u64,
    pub rebounds: u64,
    pub assists: u64,
    pub steals: u64,
    pub blocks: u64,
    pub fg_made: u64,
    pub fg_att: u64,
    pub three_made: u64,
    pub three_att: u64,
    pub ft_made: u64,
    pub ft_att: u64,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub per_sum: f64,
    #[serde(default)]
    pub ts_sum: f64,
    #[serde(default)]
    pub usage_sum: f64,
    /// Individual performances, newest last.
    #[serde(default)]
    pub game_log: Vec<GameStatLine>,
}

impl SeasonStats {
    pub fn record_game(&mut self, line: GameStatLine) {
        self.games += 1;
        self.minutes += u64::from(line.minutes);
        self.points += u64::from(line.points);
        self.rebounds += u64::from(line.rebounds);
        self.assists += u64::from(line.assists);
        self.steals += u64::from(line.steals);
        self.blocks += u64::from(line.blocks);
        self.fg_made += u64::from(line.fg_made);
        self.fg_att += u64::from(line.fg_att);
        self.three_made += u64::from(line.three_made);
        self.three_att += u64::from(line.three_att);
        self.ft_made += u64::from(line.ft_made);
        self.ft_att += u64::from(line.ft_att);
        self.per_sum += line.per;
        self.ts_sum += line.ts_pct;
        self.usage_sum += line.usage;
        if line.team_won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.game_log.push(line);
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        u64_to_f64(total) / f64::from(self.games)
    }

    #[must_use]
    pub fn ppg(&self) -> f64 {
        self.per_game(self.points)
    }

    #[must_use]
    pub fn rpg(&self) -> f64 {
        self.per_game(self.rebounds)
    }

    #[must_use]
    pub fn apg(&self) -> f64 {
        self.per_game(self.assists)
    }

    #[must_use]
    pub fn spg(&self) -> f64 {
        self.per_game(self.steals)
    }

    #[must_use]
    pub fn bpg(&self) -> f64 {
        self.per_game(self.blocks)
    }

    #[must_use]
    pub fn mpg(&self) -> f64 {
        self.per_game(self.minutes)
    }

    #[must_use]
    pub fn win_pct(&self) -> f64 {
        let played = self.wins + self.losses;
        if played == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(played)
    }

    #[must_use]
    pub fn avg_per(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.per_sum / f64::from(self.games)
    }

    #[must_use]
    pub fn avg_ts(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.ts_sum / f64::from(self.games)
    }

    #[must_use]
    pub fn avg_usage(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.usage_sum / f64::from(self.games)
    }
}

/// A finished season as archived in the career record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub season: u32,
    pub team: String,
    pub games: u32,
    pub ppg: f64,
    pub rpg: f64,
    pub apg: f64,
    pub win_pct: f64,
    pub avg_per: f64,
    pub avg_ts: f64,
    pub avg_usage: f64,
    #[serde(default)]
    pub awards: Vec<Award>,
}

/// Cumulative career sums plus accolade counts and the advanced-metric
/// histories legacy scoring reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CareerTotals {
    pub games: u64,
    pub minutes: u64,
    pub points: u64,
    pub rebounds: u64,
    pub assists: u64,
    pub steals: u64,
    pub blocks: u64,
    pub wins: u32,
    pub losses: u32,
    pub titles: u32,
    pub mvps: u32,
    pub dpoys: u32,
    pub roys: u32,
    pub finals_mvps: u32,
    pub scoring_titles: u32,
    pub all_stars: u32,
    pub mips: u32,
    pub sixth_man_awards: u32,
    #[serde(default)]
    pub per_history: Vec<f64>,
    #[serde(default)]
    pub ts_history: Vec<f64>,
    #[serde(default)]
    pub usage_history: Vec<f64>,
}

impl CareerTotals {
    pub fn absorb_season(&mut self, season: &SeasonStats) {
        self.games += u64::from(season.games);
        self.minutes += season.minutes;
        self.points += season.points;
        self.rebounds += season.rebounds;
        self.assists += season.assists;
        self.steals += season.steals;
        self.blocks += season.blocks;
        self.wins += season.wins;
        self.losses += season.losses;
        self.per_history.push(season.avg_per());
        self.ts_history.push(season.avg_ts());
        self.usage_history.push(season.avg_usage());
    }

    pub fn count_award(&mut self, award: Award) {
        match award {
            Award::Champion => self.titles += 1,
            Award::Mvp => self.mvps += 1,
            Award::Dpoy => self.dpoys += 1,
            Award::Roy => self.roys += 1,
            Award::FinalsMvp => self.finals_mvps += 1,
            Award::ScoringTitle => self.scoring_titles += 1,
            Award::AllStar => self.all_stars += 1,
            Award::Mip => self.mips += 1,
            Award::SixthMan => self.sixth_man_awards += 1,
        }
    }

    #[must_use]
    pub fn ppg(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        u64_to_f64(self.points) / u64_to_f64(self.games)
    }

    #[must_use]
    pub fn peak_per(&self) -> f64 {
        self.per_history.iter().copied().fold(0.0, f64::max)
    }
}

/// The whole career record: cumulative totals, the per-season archive, and
/// the flat award list with seasons attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Career {
    pub totals: CareerTotals,
    #[serde(default)]
    pub seasons: Vec<SeasonRecord>,
    #[serde(default)]
    pub awards: Vec<(u32, Award)>,
}

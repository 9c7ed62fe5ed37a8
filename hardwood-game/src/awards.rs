//! End-of-season award checks.
//!
//! Each award is an independent eligibility gate followed by its own
//! random roll; no mutual exclusivity is enforced, so a rookie with an MVP
//! season can take both trophies.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::playoffs::PlayoffResult;
use crate::ratings::RatingSet;
use crate::rng::roll;
use crate::stats::SeasonStats;

const MVP_PPG_FLOOR: f64 = 26.0;
const MVP_TS_FLOOR: f64 = 0.55;
const MVP_WIN_PCT_FLOOR: f64 = 0.55;
const MVP_OVERALL_FLOOR: i32 = 83;
const MVP_CHANCE: f64 = 0.5;
const DPOY_STOCKS_FLOOR: f64 = 3.5;
const DPOY_DEFENSE_FLOOR: i32 = 88;
const DPOY_CHANCE: f64 = 0.5;
const ROY_PPG_FLOOR: f64 = 15.0;
const ROY_CHANCE: f64 = 0.6;
const SCORING_TITLE_PPG: f64 = 30.0;
const SCORING_TITLE_CHANCE: f64 = 0.7;
const MIP_IMPROVEMENT_FLOOR: f64 = 4.0;
const MIP_CHANCE: f64 = 0.25;
const SIXTH_MAN_MPG_CEILING: f64 = 24.0;
const SIXTH_MAN_PPG_FLOOR: f64 = 12.0;
const SIXTH_MAN_CHANCE: f64 = 0.2;

/// Season accolades, counted into career totals and legacy scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Award {
    Champion,
    Mvp,
    Dpoy,
    Roy,
    FinalsMvp,
    ScoringTitle,
    AllStar,
    Mip,
    SixthMan,
}

impl Award {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Champion => "champion",
            Self::Mvp => "mvp",
            Self::Dpoy => "dpoy",
            Self::Roy => "roy",
            Self::FinalsMvp => "finals_mvp",
            Self::ScoringTitle => "scoring_title",
            Self::AllStar => "all_star",
            Self::Mip => "mip",
            Self::SixthMan => "sixth_man",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Champion => "NBA Champion",
            Self::Mvp => "Most Valuable Player",
            Self::Dpoy => "Defensive Player of the Year",
            Self::Roy => "Rookie of the Year",
            Self::FinalsMvp => "Finals MVP",
            Self::ScoringTitle => "Scoring Title",
            Self::AllStar => "All-Star",
            Self::Mip => "Most Improved Player",
            Self::SixthMan => "Sixth Man of the Year",
        }
    }
}

/// Graduated All-Star probability by scoring volume and team success.
fn all_star_chance(ppg: f64, win_pct: f64) -> f64 {
    let base = if ppg >= 28.0 {
        0.95
    } else if ppg >= 24.0 {
        0.80
    } else if ppg >= 20.0 {
        0.55
    } else if ppg >= 17.0 {
        0.25
    } else {
        0.0
    };
    if base == 0.0 {
        return 0.0;
    }
    (base + (win_pct - 0.5) * 0.2).clamp(0.05, 0.98)
}

/// Run every award check for the season just completed.
///
/// `previous_ppg` carries last season's scoring average for the MIP
/// heuristic; `None` in season one.
#[must_use]
pub fn evaluate_season_awards(
    stats: &SeasonStats,
    ratings: &RatingSet,
    season: u32,
    previous_ppg: Option<f64>,
    playoff: &PlayoffResult,
    rng: &mut impl Rng,
) -> Vec<Award> {
    let mut earned = Vec::new();
    if stats.games == 0 {
        // A fully injured season still records champion credit if the
        // team won with the player rostered.
        if playoff.champion {
            earned.push(Award::Champion);
        }
        return earned;
    }

    let ppg = stats.ppg();
    let win_pct = stats.win_pct();

    if playoff.champion {
        earned.push(Award::Champion);
    }
    if playoff.finals_mvp {
        earned.push(Award::FinalsMvp);
    }

    if ppg >= MVP_PPG_FLOOR
        && stats.avg_ts() >= MVP_TS_FLOOR
        && win_pct >= MVP_WIN_PCT_FLOOR
        && ratings.overall >= MVP_OVERALL_FLOOR
        && roll(rng, MVP_CHANCE)
    {
        earned.push(Award::Mvp);
    }

    if stats.spg() + stats.bpg() >= DPOY_STOCKS_FLOOR
        && ratings.defense >= DPOY_DEFENSE_FLOOR
        && roll(rng, DPOY_CHANCE)
    {
        earned.push(Award::Dpoy);
    }

    if season == 1 && ppg >= ROY_PPG_FLOOR && roll(rng, ROY_CHANCE) {
        earned.push(Award::Roy);
    }

    if ppg >= SCORING_TITLE_PPG && roll(rng, SCORING_TITLE_CHANCE) {
        earned.push(Award::ScoringTitle);
    }

    if roll(rng, all_star_chance(ppg, win_pct)) {
        earned.push(Award::AllStar);
    }

    if let Some(last_ppg) = previous_ppg
        && season > 1
        && ppg - last_ppg >= MIP_IMPROVEMENT_FLOOR
        && roll(rng, MIP_CHANCE)
    {
        earned.push(Award::Mip);
    }

    if stats.mpg() < SIXTH_MAN_MPG_CEILING
        && ppg >= SIXTH_MAN_PPG_FLOOR
        && roll(rng, SIXTH_MAN_CHANCE)
    {
        earned.push(Award::SixthMan);
    }

    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::GameStatLine;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn season_with(ppg: u32, minutes: u32, won_all: bool, games: u32) -> SeasonStats {
        let mut stats = SeasonStats::default();
        for _ in 0..games {
            stats.record_game(GameStatLine {
                minutes,
                points: ppg,
                rebounds: 5,
                assists: 4,
                steals: 2,
                blocks: 2,
                fg_made: ppg / 3,
                fg_att: ppg / 2 + 4,
                ft_made: 4,
                ft_att: 5,
                per: 22.0,
                ts_pct: 0.60,
                usage: 0.30,
                team_won: won_all,
                ..GameStatLine::default()
            });
        }
        stats
    }

    fn elite_ratings() -> RatingSet {
        let mut ratings = RatingSet {
            shooting: 90,
            finishing: 88,
            playmaking: 85,
            defense: 90,
            rebounding: 82,
            ..RatingSet::default()
        };
        ratings.recompute_overall();
        ratings
    }

    #[test]
    fn empty_season_yields_no_individual_awards() {
        let mut rng = ChaCha20Rng::seed_from_u64(41);
        let stats = SeasonStats::default();
        let awards = evaluate_season_awards(
            &stats,
            &elite_ratings(),
            3,
            None,
            &PlayoffResult::missed(),
            &mut rng,
        );
        assert!(awards.is_empty());
    }

    #[test]
    fn mvp_season_eventually_wins_mvp() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let stats = season_with(30, 36, true, 70);
        let hits = (0..100)
            .filter(|_| {
                evaluate_season_awards(
                    &stats,
                    &elite_ratings(),
                    4,
                    None,
                    &PlayoffResult::missed(),
                    &mut rng,
                )
                .contains(&Award::Mvp)
            })
            .count();
        assert!(hits > 20, "MVP almost never rolls: {hits}");
    }

    #[test]
    fn rookie_can_double_up_on_roy_and_mvp() {
        let mut rng = ChaCha20Rng::seed_from_u64(43);
        let stats = season_with(31, 37, true, 70);
        let mut saw_double = false;
        for _ in 0..300 {
            let awards = evaluate_season_awards(
                &stats,
                &elite_ratings(),
                1,
                None,
                &PlayoffResult::missed(),
                &mut rng,
            );
            if awards.contains(&Award::Roy) && awards.contains(&Award::Mvp) {
                saw_double = true;
                break;
            }
        }
        assert!(saw_double, "independent rolls should allow MVP+ROY");
    }

    #[test]
    fn championship_carries_without_games_played() {
        let mut rng = ChaCha20Rng::seed_from_u64(44);
        let playoff = PlayoffResult {
            champion: true,
            finals_mvp: false,
            wins: 4,
        };
        let awards = evaluate_season_awards(
            &SeasonStats::default(),
            &elite_ratings(),
            2,
            None,
            &playoff,
            &mut rng,
        );
        assert_eq!(awards, vec![Award::Champion]);
    }

    #[test]
    fn bench_scorer_is_sixth_man_eligible_only() {
        let mut rng = ChaCha20Rng::seed_from_u64(45);
        let stats = season_with(14, 20, false, 70);
        let mut saw_sixth_man = false;
        for _ in 0..200 {
            let awards = evaluate_season_awards(
                &stats,
                &RatingSet::default(),
                3,
                Some(13.0),
                &PlayoffResult::missed(),
                &mut rng,
            );
            assert!(!awards.contains(&Award::Mvp));
            assert!(!awards.contains(&Award::ScoringTitle));
            if awards.contains(&Award::SixthMan) {
                saw_sixth_man = true;
            }
        }
        assert!(saw_sixth_man);
    }
}

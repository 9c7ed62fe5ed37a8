//! Legacy scoring and Hall-of-Fame odds.
//!
//! The legacy score is deliberately punitive: production builds the
//! base, then missing hardware and short careers cut it multiplicatively
//! so stat-stuffing on bad teams cannot buy an all-time ranking. The
//! displayed scale tops out around 1000 for an inner-circle career.

use crate::stats::Career;

const SHORT_CAREER_SEASONS: usize = 5;
const FULL_CAREER_SEASONS: usize = 10;
const NO_TITLE_PENALTY: f64 = 0.70;
const NO_MVP_PENALTY: f64 = 0.85;
const NO_ALL_STAR_PENALTY: f64 = 0.65;
const SHORT_CAREER_PENALTY: f64 = 0.55;
const PARTIAL_CAREER_PENALTY: f64 = 0.85;
const HOF_MAX: f64 = 100.0;

fn per_game(total: u64, games: u64) -> f64 {
    if games == 0 {
        return 0.0;
    }
    crate::numbers::u64_to_f64(total) / crate::numbers::u64_to_f64(games)
}

/// Rough win-shares stand-in from per-game production and team success.
fn win_share_approximation(career: &Career) -> f64 {
    let totals = &career.totals;
    if totals.games == 0 {
        return 0.0;
    }
    let prod = per_game(totals.points, totals.games)
        + per_game(totals.rebounds, totals.games) * 0.9
        + per_game(totals.assists, totals.games) * 0.9;
    let played = totals.wins + totals.losses;
    let win_pct = if played == 0 {
        0.0
    } else {
        f64::from(totals.wins) / f64::from(played)
    };
    prod * win_pct * crate::numbers::u64_to_f64(career.seasons.len() as u64) * 0.25
}

/// Single-number career ranking. Floored at 0 and rounded to a whole
/// score; zero games means zero score.
#[must_use]
pub fn calculate_player_score(career: &Career) -> i64 {
    let totals = &career.totals;
    if totals.games == 0 {
        return 0;
    }
    let ppg = per_game(totals.points, totals.games);
    let rpg = per_game(totals.rebounds, totals.games);
    let apg = per_game(totals.assists, totals.games);
    let spg = per_game(totals.steals, totals.games);
    let bpg = per_game(totals.blocks, totals.games);

    let mut score = ppg * 8.0 + rpg * 4.0 + apg * 4.0 + (spg + bpg) * 6.0;
    score += totals.peak_per() * 4.0;
    score += win_share_approximation(career);
    score += f64::from(totals.mvps) * 90.0
        + f64::from(totals.titles) * 70.0
        + f64::from(totals.finals_mvps) * 45.0
        + f64::from(totals.dpoys) * 30.0
        + f64::from(totals.scoring_titles) * 20.0
        + f64::from(totals.all_stars) * 12.0
        + f64::from(totals.roys) * 10.0
        + f64::from(totals.mips) * 5.0
        + f64::from(totals.sixth_man_awards) * 5.0;

    if totals.titles == 0 {
        score *= NO_TITLE_PENALTY;
    }
    if totals.mvps == 0 {
        score *= NO_MVP_PENALTY;
    }
    if totals.all_stars == 0 {
        score *= NO_ALL_STAR_PENALTY;
    }
    if career.seasons.len() < SHORT_CAREER_SEASONS {
        score *= SHORT_CAREER_PENALTY;
    } else if career.seasons.len() < FULL_CAREER_SEASONS {
        score *= PARTIAL_CAREER_PENALTY;
    }
    crate::numbers::round_f64_to_i64(score).max(0)
}

/// [0, 100] induction odds. Exactly 0 with no completed seasons; hard
/// accolade floors kick in above the score-derived baseline.
#[must_use]
pub fn hall_of_fame_chance(career: &Career) -> f64 {
    if career.seasons.is_empty() {
        return 0.0;
    }
    let totals = &career.totals;
    let score = calculate_player_score(career);
    let mut chance = crate::numbers::i64_to_f64(score) / 8.0;

    if totals.mvps >= 1 {
        chance = chance.max(60.0);
    }
    if totals.titles >= 1 && totals.finals_mvps >= 1 {
        chance = chance.max(75.0);
    }
    if totals.all_stars >= 8 {
        chance = chance.max(70.0);
    }
    if totals.mvps >= 2 || (totals.mvps >= 1 && totals.titles >= 2) {
        chance = chance.max(95.0);
    }
    chance += f64::from(totals.titles.min(4)) * 2.0;
    chance.clamp(0.0, HOF_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awards::Award;
    use crate::stats::SeasonRecord;

    fn season_record(season: u32, ppg: f64, win_pct: f64) -> SeasonRecord {
        SeasonRecord {
            season,
            team: "Boston Spires".to_string(),
            games: 82,
            ppg,
            rpg: 6.0,
            apg: 5.0,
            win_pct,
            avg_per: 20.0,
            avg_ts: 0.58,
            avg_usage: 0.28,
            awards: Vec::new(),
        }
    }

    fn career_of(seasons: u32, ppg: f64) -> Career {
        let mut career = Career::default();
        for s in 1..=seasons {
            career.seasons.push(season_record(s, ppg, 0.6));
            let games = 82_u64;
            career.totals.games += games;
            career.totals.points += (ppg * 82.0) as u64;
            career.totals.rebounds += 6 * games;
            career.totals.assists += 5 * games;
            career.totals.steals += games;
            career.totals.blocks += games / 2;
            career.totals.wins += 49;
            career.totals.losses += 33;
            career.totals.per_history.push(20.0);
        }
        career
    }

    #[test]
    fn empty_career_scores_zero() {
        let career = Career::default();
        assert_eq!(calculate_player_score(&career), 0);
        assert!(hall_of_fame_chance(&career).abs() < f64::EPSILON);
    }

    #[test]
    fn hof_chance_stays_in_range() {
        let mut career = career_of(15, 28.0);
        career.totals.mvps = 4;
        career.totals.titles = 5;
        career.totals.finals_mvps = 3;
        career.totals.all_stars = 14;
        let chance = hall_of_fame_chance(&career);
        assert!((0.0..=100.0).contains(&chance));
        assert!(chance >= 95.0);
    }

    #[test]
    fn hardware_outweighs_raw_production() {
        let empty_handed = career_of(12, 27.0);
        let mut decorated = career_of(12, 22.0);
        decorated.totals.titles = 3;
        decorated.totals.mvps = 2;
        decorated.totals.all_stars = 10;
        assert!(
            calculate_player_score(&decorated) > calculate_player_score(&empty_handed),
            "penalties not applied"
        );
    }

    #[test]
    fn short_career_is_cut_hard() {
        let brief = career_of(3, 25.0);
        let long = career_of(12, 25.0);
        let brief_score = calculate_player_score(&brief);
        let long_score = calculate_player_score(&long);
        assert!(brief_score < long_score);
        assert!(brief_score >= 0);
    }

    #[test]
    fn mvp_floor_applies() {
        let mut career = career_of(8, 18.0);
        career.totals.mvps = 1;
        career.seasons[0].awards.push(Award::Mvp);
        assert!(hall_of_fame_chance(&career) >= 60.0);
    }
}

//! Per-game box-score generation.
//!
//! The pipeline: minutes -> usage -> shot volume -> shot mix -> make
//! percentages -> sampled makes -> counting stats -> derived metrics.
//! Age and consistency multipliers scale volumes and rates before any
//! sampling so a line can never record more makes than attempts.

use log::debug;
use rand::Rng;

use crate::player::Player;
use crate::ratings::age_multiplier;
use crate::rng::{binomial, poisson, uniform};
use crate::stats::GameStatLine;

const MINUTES_BASE: f64 = 22.0;
const MINUTES_MIN: f64 = 12.0;
const MINUTES_MAX: f64 = 42.0;
const USAGE_MIN: f64 = 0.15;
const USAGE_MAX: f64 = 0.38;
const THREE_RATE_MIN: f64 = 0.18;
const THREE_RATE_MAX: f64 = 0.50;
const FG2_PCT_MIN: f64 = 0.40;
const FG2_PCT_MAX: f64 = 0.62;
const FG3_PCT_MIN: f64 = 0.26;
const FG3_PCT_MAX: f64 = 0.45;
const FT_PCT_MIN: f64 = 0.60;
const FT_PCT_MAX: f64 = 0.95;
const PER_MAX: f64 = 50.0;
const LEAGUE_PACE: f64 = 100.0;
/// Calibrated so a maxed-out prime scorer averages near 30 a night and a
/// league-average starter lands in the low teens.
const SHOT_VOLUME_SCALE: f64 = 1.4;

/// Flat make-percentage step for elite skill ratings.
fn elite_bonus(rating: i32) -> f64 {
    if rating >= 92 {
        0.04
    } else if rating >= 85 {
        0.02
    } else {
        0.0
    }
}

/// Stars play with less game-to-game variance.
fn consistency_factor(overall: i32) -> f64 {
    if overall >= 85 {
        0.6
    } else if overall >= 75 {
        0.85
    } else {
        1.0
    }
}

fn condition_term(player: &Player) -> f64 {
    let health = f64::from(player.condition.health);
    let peak = f64::from(player.condition.peak);
    (health - 80.0) * 0.000_5 + (peak - 60.0) * 0.000_4
}

fn simulate_minutes(player: &Player, consistency: f64, rng: &mut impl Rng) -> f64 {
    let overall = f64::from(player.ratings.overall);
    let stamina = f64::from(player.ratings.stamina);
    let mut minutes = MINUTES_BASE;
    minutes += (overall - 65.0).max(0.0) * 0.45;
    minutes += (stamina - 60.0) * 0.05;
    if player.ratings.overall >= 85 {
        minutes += 3.0;
    }
    minutes += (f64::from(player.condition.peak) - 70.0) * 0.04;
    minutes += uniform(rng, -4.0, 4.0) * consistency;
    minutes.clamp(MINUTES_MIN, MINUTES_MAX)
}

fn usage_rate(player: &Player, consistency: f64, rng: &mut impl Rng) -> f64 {
    let overall = f64::from(player.ratings.overall);
    let skill_sum = f64::from(player.ratings.primary_sum());
    let mut usage = 0.15;
    usage += (overall - 60.0).max(0.0) * 0.004;
    usage += (skill_sum - 300.0).max(0.0) * 0.000_15;
    usage += uniform(rng, -0.02, 0.02) * consistency;
    usage.clamp(USAGE_MIN, USAGE_MAX)
}

/// PER: linear-weighted box-score value per minute, pace-adjusted and
/// clamped to [0, 50]. Missed shots and an estimated-turnover term count
/// against the player.
fn efficiency_rating(line: &GameStatLine) -> f64 {
    if line.minutes == 0 {
        return 0.0;
    }
    let fgm = f64::from(line.fg_made);
    let fga = f64::from(line.fg_att);
    let ftm = f64::from(line.ft_made);
    let fta = f64::from(line.ft_att);
    let estimated_turnovers = fga * 0.08 + f64::from(line.assists) * 0.15;
    let raw = fgm * 2.0
        + f64::from(line.three_made) * 0.5
        + ftm
        + f64::from(line.rebounds) * 1.2
        + f64::from(line.assists) * 1.5
        + f64::from(line.steals) * 2.0
        + f64::from(line.blocks) * 2.0
        - (fga - fgm) * 0.7
        - (fta - ftm) * 0.4
        - estimated_turnovers;
    let per = (raw / f64::from(line.minutes)) * 48.0 * (100.0 / LEAGUE_PACE);
    per.clamp(0.0, PER_MAX)
}

/// TS% = points / (2 * (FGA + 0.44 * FTA)); 0 with no attempts.
fn true_shooting(line: &GameStatLine) -> f64 {
    let denom = 2.0 * (f64::from(line.fg_att) + 0.44 * f64::from(line.ft_att));
    if denom <= 0.0 {
        return 0.0;
    }
    (f64::from(line.points) / denom).clamp(0.0, 1.0)
}

/// Generate one full game line from the player's current ratings, age,
/// and condition. Reproducible for a fixed RNG state.
#[must_use]
pub fn simulate_game(player: &Player, rng: &mut impl Rng) -> GameStatLine {
    let ratings = &player.ratings;
    let age_mult = age_multiplier(player.age);
    let consistency = consistency_factor(ratings.overall);

    let minutes = simulate_minutes(player, consistency, rng);
    if minutes <= 0.0 {
        return GameStatLine::default();
    }
    let usage = usage_rate(player, consistency, rng);

    // Shot volume scales with floor time, usage, and the age curve.
    let fga_expected = minutes * usage * SHOT_VOLUME_SCALE * age_mult;
    let fg_att = binomial(rng, 45, (fga_expected / 45.0).clamp(0.0, 1.0));

    let three_rate =
        (0.18 + (f64::from(ratings.shooting) - 60.0) * 0.006).clamp(THREE_RATE_MIN, THREE_RATE_MAX);
    let three_att = binomial(rng, fg_att, three_rate);
    let two_att = fg_att - three_att;

    let condition = condition_term(player);
    let fg2_pct = (0.48
        + (f64::from(ratings.finishing) - 70.0) * 0.002_5
        + elite_bonus(ratings.finishing)
        + condition
        + uniform(rng, -0.04, 0.04) * consistency)
        .clamp(FG2_PCT_MIN, FG2_PCT_MAX);
    let fg3_pct = (0.33
        + (f64::from(ratings.shooting) - 70.0) * 0.002_2
        + elite_bonus(ratings.shooting)
        + condition
        + uniform(rng, -0.04, 0.04) * consistency)
        .clamp(FG3_PCT_MIN, FG3_PCT_MAX);
    let ft_pct = (0.75
        + (f64::from(ratings.shooting) - 70.0) * 0.002
        + uniform(rng, -0.05, 0.05) * consistency)
        .clamp(FT_PCT_MIN, FT_PCT_MAX);

    let two_made = binomial(rng, two_att, fg2_pct);
    let three_made = binomial(rng, three_att, fg3_pct);
    let ft_att = poisson(
        rng,
        fga_expected * (0.20 + (f64::from(ratings.finishing) - 60.0).max(0.0) * 0.003),
    );
    let ft_made = binomial(rng, ft_att, ft_pct);

    // Unbounded counting events; rate = minutes x rating fraction x
    // stat-specific scale, age-adjusted before the draw.
    let rebounds = poisson(
        rng,
        minutes * (f64::from(ratings.rebounding) / 100.0) * 0.28 * age_mult,
    );
    let assists = poisson(
        rng,
        minutes * (f64::from(ratings.playmaking) / 100.0) * 0.26 * age_mult,
    );
    let steals = poisson(
        rng,
        minutes * (f64::from(ratings.defense) / 100.0) * 0.055 * age_mult,
    );
    let blocks = poisson(
        rng,
        minutes
            * ((f64::from(ratings.defense) + f64::from(ratings.rebounding)) / 200.0)
            * 0.045
            * age_mult,
    );

    let points = two_made * 2 + three_made * 3 + ft_made;

    let mut line = GameStatLine {
        minutes: crate::numbers::round_f64_to_u32(minutes),
        points,
        rebounds,
        assists,
        steals,
        blocks,
        fg_made: two_made + three_made,
        fg_att,
        three_made,
        three_att,
        ft_made,
        ft_att,
        per: 0.0,
        ts_pct: 0.0,
        usage,
        team_won: false,
    };
    line.per = efficiency_rating(&line);
    line.ts_pct = true_shooting(&line);

    debug!(
        "game line: {}m {}pts ({}-{} FG, {}-{} 3PT, {}-{} FT) per={:.1} ts={:.3}",
        line.minutes,
        line.points,
        line.fg_made,
        line.fg_att,
        line.three_made,
        line.three_att,
        line.ft_made,
        line.ft_att,
        line.per,
        line.ts_pct
    );
    line
}

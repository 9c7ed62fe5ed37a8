//! The season clock: Preseason -> Regular -> Playoffs -> Offseason.
//!
//! Everything advances through one weekly transition. Month and season
//! advancement are bounded loops over the same function; the season
//! loop carries a hard iteration cap so a phase bug can never spin
//! forever.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::events::roll_weekly_event;
use crate::market::{generate_endorsement_offer, resolve_offseason_contract};
use crate::performance::simulate_game;
use crate::player::generate_teammates;
use crate::playoffs::{FinalsProfile, PLAYOFF_CUTOFF_RANK, PlayoffResult, simulate_playoffs};
use crate::ratings::progress_aging;
use crate::rng::roll;
use crate::state::GameState;

pub const PRESEASON_WEEKS: u32 = 2;
pub const REGULAR_WEEKS: u32 = 9;
pub const GAMES_PER_WEEK: u32 = 10;
pub const MONTH_WEEKS: u32 = 4;
/// Hard cap on the advance-season loop.
pub const SEASON_LOOP_CAP: u32 = 100;

const PEAK_DECAY_PER_WEEK: i32 = 1;
const LOW_PEAK_THRESHOLD: i32 = 25;
const LOW_PEAK_INJURY_CHANCE: f64 = 0.15;
const IN_GAME_INJURY_CHANCE: f64 = 0.015;
const LOAD_MANAGEMENT_AGE: u32 = 32;
const LOAD_MANAGEMENT_SKIP_CHANCE: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Preseason,
    Regular,
    Playoffs,
    Offseason,
}

impl Phase {
    pub const ALL: [Self; 4] = [
        Self::Preseason,
        Self::Regular,
        Self::Playoffs,
        Self::Offseason,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Preseason => "preseason",
            Self::Regular => "regular",
            Self::Playoffs => "playoffs",
            Self::Offseason => "offseason",
        }
    }
}

/// Single-game win probability for the player's team: a standings-rank
/// bucket sets the base, then small additive terms for the player's own
/// impact, clamped to [0.05, 0.80].
#[must_use]
pub fn team_win_chance(state: &GameState) -> f64 {
    let rank = state.league.rank_of(state.player.team);
    let base = match rank {
        1..=4 => 0.70,
        5..=8 => 0.55,
        9..=16 => 0.35,
        17..=24 => 0.20,
        _ => 0.15,
    };
    let player = &state.player;
    let team = &state.league.teams[player.team];
    let mut chance = base;
    chance += f64::from(player.ratings.overall - 70) * 0.004;
    chance += f64::from(player.fame.clamp(0, 100)) * 0.000_5;
    chance += (player.chemistry() - 60.0) * 0.002;
    chance += (team.current_strength - 70.0) * 0.003;
    chance += f64::from(player.condition.peak - 50) * 0.001;
    chance += f64::from(player.condition.health - 50) * 0.001;
    chance += f64::from(player.condition.morale - 50) * 0.001;
    chance.clamp(0.05, 0.80)
}

/// Per-week effects that apply in every phase: service countdowns, peak
/// decay, the low-peak injury check, passive follower growth, and the
/// life-event roll.
fn apply_weekly_effects(state: &mut GameState, rng: &mut impl Rng, messages: &mut Vec<String>) {
    let mut expired = Vec::new();
    state.player.services.retain_mut(|service| {
        service.weeks_left = service.weeks_left.saturating_sub(1);
        if service.weeks_left == 0 {
            expired.push(service.kind.name());
            false
        } else {
            true
        }
    });
    for name in expired {
        messages.push(format!("{name} engagement ended."));
    }

    let mut decay = PEAK_DECAY_PER_WEEK;
    if state
        .player
        .has_service(crate::player::ServiceKind::Physiotherapist)
    {
        decay = 0;
        state.player.condition.health += 1;
    }
    state.player.condition.peak -= decay;

    if state.player.condition.peak < LOW_PEAK_THRESHOLD
        && state.player.injury_games_out == 0
        && roll(rng, LOW_PEAK_INJURY_CHANCE)
    {
        let games = rng.random_range(2..=5);
        state.player.injury_games_out = games;
        state.player.condition.health -= rng.random_range(5..=12);
        messages.push(format!(
            "Fatigue injury: sidelined for the next {games} games."
        ));
    }

    let fame = u64::from(u32::try_from(state.player.fame.max(0)).unwrap_or(0));
    let passive = rng.random_range(0..=fame * 8 + 40);
    state.player.followers += passive;
    if state
        .player
        .has_service(crate::player::ServiceKind::MediaTeam)
    {
        state.player.followers += passive / 2;
    }

    if let Some(text) = roll_weekly_event(&mut state.player, rng) {
        messages.push(text.clone());
        state.push_event(text);
    }

    if state.pending_offer.is_none()
        && let Some(offer) = generate_endorsement_offer(&state.player, rng)
    {
        messages.push(format!(
            "{} is offering {} a year over {} years.",
            offer.name, offer.value, offer.years
        ));
        state.pending_offer = Some(offer);
    }

    state.player.condition.clamp();
}

/// Play out one regular-season week for the player, modeling absences
/// before each game: active injuries, load management for aging stars,
/// and health-driven rest.
fn simulate_week_games(state: &mut GameState, rng: &mut impl Rng, messages: &mut Vec<String>) {
    let win_chance = team_win_chance(state);
    let mut played = 0_u32;
    let mut injury_skips = 0_u32;
    for _ in 0..GAMES_PER_WEEK {
        if state.player.injury_games_out > 0 {
            state.player.injury_games_out -= 1;
            injury_skips += 1;
            continue;
        }
        if state.player.age >= LOAD_MANAGEMENT_AGE
            && state.player.ratings.overall >= 85
            && roll(rng, LOAD_MANAGEMENT_SKIP_CHANCE)
        {
            continue;
        }
        if state.player.condition.health < 60
            && roll(rng, f64::from(60 - state.player.condition.health) * 0.01)
        {
            continue;
        }

        let mut line = simulate_game(&state.player, rng);
        line.team_won = roll(rng, win_chance);
        let tier = u64::from(state.player.star_tier());
        if line.points >= 40 {
            state.player.followers += 3_000 * (1 + tier);
            state.player.fame += 2;
            messages.push(format!("{}-point eruption.", line.points));
        } else if line.points >= 30 {
            state.player.followers += 1_000 * (1 + tier);
            state.player.fame += 1;
        }
        state.player.stats.record_game(line);
        played += 1;

        if roll(rng, IN_GAME_INJURY_CHANCE) {
            let games = rng.random_range(1..=8);
            state.player.injury_games_out = games;
            state.player.condition.health -= rng.random_range(5..=15);
            messages.push(format!("Went down mid-game; out roughly {games} games."));
        }
    }
    // Rest and load management thin a week out but never erase it; only
    // an injury listing covering every game keeps the player off the floor.
    if played == 0 && injury_skips < GAMES_PER_WEEK {
        let mut line = simulate_game(&state.player, rng);
        line.team_won = roll(rng, win_chance);
        state.player.stats.record_game(line);
        played = 1;
    }
    if played > 0 {
        state.player.condition.peak -= i32::try_from(played).unwrap_or(0) / 3;
    }
    state.player.condition.clamp();
}

fn run_playoffs(state: &mut GameState, rng: &mut impl Rng, messages: &mut Vec<String>) {
    let mut lines = Vec::new();
    let rank = state.league.rank_of(state.player.team);
    let profile = FinalsProfile {
        ppg: state.player.stats.ppg(),
        rpg: state.player.stats.rpg(),
        apg: state.player.stats.apg(),
        leadership: state.player.ratings.leadership,
        seed_rank: rank,
    };
    let result = simulate_playoffs(rank, team_win_chance(state), &profile, rng);

    if result.champion {
        state.league.record_champion(state.season, state.player.team);
        state.player.fame += 8;
        lines.push(format!(
            "The {} win it all. {} rounds swept through.",
            state.player.contract.team, result.wins
        ));
        if result.finals_mvp {
            lines.push("Named Finals MVP.".to_string());
        }
    } else if result.wins > 0 {
        lines.push(format!(
            "Playoff run ends after winning {} round(s).",
            result.wins
        ));
    } else {
        lines.push("Bounced in the first round.".to_string());
    }
    for text in &lines {
        state.push_event(text.clone());
    }
    messages.extend(lines);
    state.last_playoff = Some(result);
}

/// Season finalization: awards, payouts, archiving, contract resolution,
/// aging, and the league reset for next year.
fn finalize_offseason(state: &mut GameState, rng: &mut impl Rng, messages: &mut Vec<String>) {
    let playoff = state.last_playoff.unwrap_or_else(PlayoffResult::missed);
    let previous_ppg = state.player.career.seasons.last().map(|s| s.ppg);
    let awards = crate::awards::evaluate_season_awards(
        &state.player.stats,
        &state.player.ratings,
        state.season,
        previous_ppg,
        &playoff,
        rng,
    );
    for &award in &awards {
        state.player.career.totals.count_award(award);
        state.player.career.awards.push((state.season, award));
        state.player.fame += match award {
            crate::awards::Award::Mvp => 10,
            crate::awards::Award::Champion => 8,
            crate::awards::Award::FinalsMvp => 6,
            crate::awards::Award::AllStar => 3,
            _ => 2,
        };
        let text = format!("Season {}: {}.", state.season, award.name());
        messages.push(text.clone());
        state.push_event(text);
    }

    let salary = state.player.contract.annual_salary();
    state.player.cash = state.player.cash.credit(salary);
    messages.push(format!("Collected {salary} in salary."));
    let mut endorsement_total = crate::money::Cash::ZERO;
    state.player.endorsements.retain_mut(|deal| {
        endorsement_total = endorsement_total.credit(deal.value);
        match deal.years_left.as_mut() {
            None => true,
            Some(0) => false,
            Some(years) => {
                *years -= 1;
                *years > 0
            }
        }
    });
    if endorsement_total > crate::money::Cash::ZERO {
        state.player.cash = state.player.cash.credit(endorsement_total);
        messages.push(format!("Endorsements paid out {endorsement_total}."));
    }

    let stats = std::mem::take(&mut state.player.stats);
    let record = crate::stats::SeasonRecord {
        season: state.season,
        team: state.player.contract.team.clone(),
        games: stats.games,
        ppg: stats.ppg(),
        rpg: stats.rpg(),
        apg: stats.apg(),
        win_pct: stats.win_pct(),
        avg_per: stats.avg_per(),
        avg_ts: stats.avg_ts(),
        avg_usage: stats.avg_usage(),
        awards,
    };
    state.player.career.totals.absorb_season(&stats);
    state.player.career.seasons.push(record);

    if state.league.champion_of(state.season).is_none() {
        let top = state.league.standings()[0];
        state.league.record_champion(state.season, top);
    }

    if let Some(text) = resolve_offseason_contract(&mut state.player, &state.league, rng) {
        messages.push(text.clone());
        state.push_event(text);
    }
    // Roster churn: a new-look locker room every year even without a move.
    state.player.teammates = generate_teammates(
        rng,
        state.league.teams[state.player.team].current_strength,
    );

    progress_aging(
        &mut state.player.ratings,
        state.player.age,
        state.player.potential,
        rng,
    );
    state.player.age += 1;
    state.player.condition.peak = 100;
    state.player.condition.health = (state.player.condition.health + 30).min(100);
    state.player.injury_games_out = 0;

    state.league.reset_for_new_season(rng);
    state.season += 1;
    state.week = 1;
    state.phase = Phase::Preseason;
    state.last_playoff = None;
    info!("season {} begins, age {}", state.season, state.player.age);
}

/// Advance the simulation by one week. Returns the human-readable lines
/// produced along the way; a retired player is a no-op.
pub fn advance_week(state: &mut GameState) -> Vec<String> {
    if state.player.retired {
        return vec!["Career over; nothing left to simulate.".to_string()];
    }
    let mut rng = state.take_rng();
    let mut messages = Vec::new();

    apply_weekly_effects(state, &mut rng, &mut messages);

    match state.phase {
        Phase::Preseason => {
            state.league.update_standings(false, &mut rng);
            state.week += 1;
            if state.week > PRESEASON_WEEKS {
                state.phase = Phase::Regular;
                state.week = 1;
                state.league.zero_records();
                messages.push("Opening night: the regular season begins.".to_string());
            }
        }
        Phase::Regular => {
            simulate_week_games(state, &mut rng, &mut messages);
            state.league.update_standings(true, &mut rng);
            state.week += 1;
            if state.week > REGULAR_WEEKS {
                state.week = 1;
                let rank = state.league.rank_of(state.player.team);
                if rank <= PLAYOFF_CUTOFF_RANK {
                    state.phase = Phase::Playoffs;
                    messages.push(format!("Clinched a playoff berth as the #{rank} seed."));
                } else {
                    state.phase = Phase::Offseason;
                    messages.push(format!("Season over at #{rank}; no postseason."));
                }
            }
        }
        Phase::Playoffs => {
            state.league.update_standings(false, &mut rng);
            run_playoffs(state, &mut rng, &mut messages);
            state.phase = Phase::Offseason;
            state.week = 1;
        }
        Phase::Offseason => {
            finalize_offseason(state, &mut rng, &mut messages);
        }
    }

    state.rng = Some(rng);
    state.sanitize();
    messages
}

/// Four weekly transitions back to back.
pub fn advance_month(state: &mut GameState) -> Vec<String> {
    let mut messages = Vec::new();
    for _ in 0..MONTH_WEEKS {
        messages.extend(advance_week(state));
        if state.player.retired {
            break;
        }
    }
    messages
}

/// Run weeks until the next Offseason is reached, bounded by the loop
/// cap. Hitting the cap stops early rather than erroring.
pub fn advance_season(state: &mut GameState) -> Vec<String> {
    let mut messages = Vec::new();
    for iteration in 0..SEASON_LOOP_CAP {
        messages.extend(advance_week(state));
        if state.phase == Phase::Offseason || state.player.retired {
            return messages;
        }
        if iteration + 1 == SEASON_LOOP_CAP {
            warn!("season loop cap reached in phase {}", state.phase.key());
        }
    }
    messages
}

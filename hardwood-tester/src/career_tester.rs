//! Headless career runner with per-week invariant checks.

use anyhow::{Context, Result, ensure};
use log::debug;

use hardwood_game::{
    Archetype, Attribute, GameState, Intensity, Phase, SEASON_GAMES, advance_week,
    calculate_player_score, hall_of_fame_chance, request_extension, request_trade, train,
};

/// How the simulated player spends their agency each week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CareerStrategy {
    /// Only advance the clock.
    #[default]
    Passive,
    /// Train an attribute every third week.
    Grinder,
    /// Hammer the front office with trade and contract requests.
    Agitator,
}

impl CareerStrategy {
    pub const ALL: [Self; 3] = [Self::Passive, Self::Grinder, Self::Agitator];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Passive => "passive",
            Self::Grinder => "grinder",
            Self::Agitator => "agitator",
        }
    }
}

/// What to run and how long.
#[derive(Debug, Clone, Copy)]
pub struct CareerPlan {
    pub archetype: Archetype,
    pub seasons: u32,
    pub strategy: CareerStrategy,
}

impl CareerPlan {
    #[must_use]
    pub fn new(archetype: Archetype, seasons: u32, strategy: CareerStrategy) -> Self {
        Self {
            archetype,
            seasons,
            strategy,
        }
    }
}

/// Final snapshot plus counters the expectations read.
#[derive(Debug)]
pub struct CareerSummary {
    pub final_state: GameState,
    pub weeks_simulated: u32,
    pub messages_emitted: usize,
    pub legacy_score: i64,
    pub hof_chance: f64,
}

/// Every-week bound checks; any violation fails the whole run.
pub fn check_invariants(state: &GameState) -> Result<()> {
    let player = &state.player;
    ensure!(
        player.cash.dollars() >= 0,
        "cash went negative: {}",
        player.cash
    );
    for (name, value) in [
        ("shooting", player.ratings.shooting),
        ("finishing", player.ratings.finishing),
        ("playmaking", player.ratings.playmaking),
        ("defense", player.ratings.defense),
        ("rebounding", player.ratings.rebounding),
        ("stamina", player.ratings.stamina),
        ("dunking", player.ratings.dunking),
        ("passing", player.ratings.passing),
        ("leadership", player.ratings.leadership),
        ("overall", player.ratings.overall),
    ] {
        ensure!(
            (40..=99).contains(&value),
            "rating {name} out of range: {value}"
        );
    }
    for (name, value) in [
        ("health", player.condition.health),
        ("peak", player.condition.peak),
        ("morale", player.condition.morale),
        ("fame", player.fame),
    ] {
        ensure!(
            (0..=100).contains(&value),
            "{name} out of range: {value}"
        );
    }
    ensure!(
        player.contract.year >= 1 && player.contract.year <= player.contract.years,
        "contract index broken: year {} of {}",
        player.contract.year,
        player.contract.years
    );
    for team in &state.league.teams {
        ensure!(
            team.wins + team.losses <= SEASON_GAMES,
            "{} played {} games",
            team.name,
            team.wins + team.losses
        );
    }
    for line in &player.stats.game_log {
        ensure!(line.fg_made <= line.fg_att, "made more than attempted");
        ensure!(line.three_att <= line.fg_att, "threes exceed field goals");
        ensure!(line.ft_made <= line.ft_att, "free throws overdrawn");
        ensure!(
            (0.0..=1.0).contains(&line.ts_pct),
            "TS% out of range: {}",
            line.ts_pct
        );
    }
    Ok(())
}

fn act_on_strategy(state: &mut GameState, strategy: CareerStrategy, week_index: u32) {
    let mut rng = state.take_rng();
    match strategy {
        CareerStrategy::Passive => {}
        CareerStrategy::Grinder => {
            if week_index % 3 == 0 {
                let attribute = Attribute::ALL[(week_index as usize / 3) % Attribute::ALL.len()];
                train(&mut state.player, attribute, Intensity::Moderate, &mut rng);
            }
        }
        CareerStrategy::Agitator => {
            if week_index % 5 == 0 {
                request_trade(&mut state.player, &state.league, &mut rng);
            } else if week_index % 5 == 2 {
                request_extension(&mut state.player, &state.league, &mut rng);
            }
        }
    }
    state.rng = Some(rng);
    state.sanitize();
}

/// Run one seeded career to completion under a plan.
pub fn run_career(seed: u64, plan: &CareerPlan) -> Result<CareerSummary> {
    let mut state = GameState::new_career("QA Subject", plan.archetype, seed);
    let mut weeks = 0_u32;
    let mut messages = 0_usize;
    let target_season = plan.seasons + 1;

    // Generous upper bound so a stuck phase machine fails loudly instead
    // of hanging the sweep.
    let week_budget = plan.seasons * 20 + 40;
    while state.season < target_season {
        ensure!(
            weeks < week_budget,
            "career did not finish within {week_budget} weeks (season {}, phase {})",
            state.season,
            state.phase.key()
        );
        act_on_strategy(&mut state, plan.strategy, weeks);
        messages += advance_week(&mut state).len();
        weeks += 1;
        check_invariants(&state)
            .with_context(|| format!("week {weeks}, phase {}", state.phase.key()))?;
    }
    ensure!(state.phase == Phase::Preseason, "season rollover incomplete");
    ensure!(
        state.player.career.seasons.len() == plan.seasons as usize,
        "expected {} archived seasons, got {}",
        plan.seasons,
        state.player.career.seasons.len()
    );

    let legacy_score = calculate_player_score(&state.player.career);
    let hof_chance = hall_of_fame_chance(&state.player.career);
    ensure!(legacy_score >= 0, "legacy score negative: {legacy_score}");
    ensure!(
        (0.0..=100.0).contains(&hof_chance),
        "HOF chance out of range: {hof_chance}"
    );
    debug!(
        "seed {seed}: {} seasons, legacy {legacy_score}, HOF {hof_chance:.1}%",
        plan.seasons
    );

    Ok(CareerSummary {
        final_state: state,
        weeks_simulated: weeks,
        messages_emitted: messages,
        legacy_score,
        hof_chance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passive_run_completes() {
        let plan = CareerPlan::new(Archetype::Scorer, 2, CareerStrategy::Passive);
        let summary = run_career(11, &plan).expect("run");
        assert_eq!(summary.final_state.player.career.seasons.len(), 2);
        assert!(summary.weeks_simulated >= 24);
    }

    #[test]
    fn agitator_run_stays_legal() {
        let plan = CareerPlan::new(Archetype::Playmaker, 3, CareerStrategy::Agitator);
        let summary = run_career(23, &plan).expect("run");
        check_invariants(&summary.final_state).expect("final state");
    }
}

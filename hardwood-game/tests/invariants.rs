//! Cross-module invariant sweeps over many seeds.

use hardwood_game::{
    Archetype, Attribute, GameState, Intensity, Phase, SEASON_GAMES, advance_week, train,
};

#[test]
fn same_seed_same_career() {
    let mut a = GameState::new_career("Mirror", Archetype::Slasher, 12345);
    let mut b = GameState::new_career("Mirror", Archetype::Slasher, 12345);
    for _ in 0..60 {
        advance_week(&mut a);
        advance_week(&mut b);
    }
    assert_eq!(a.season, b.season);
    assert_eq!(a.week, b.week);
    assert_eq!(a.phase, b.phase);
    assert_eq!(a.player, b.player);
    assert_eq!(a.league, b.league);
    assert_eq!(a.timeline, b.timeline);
}

#[test]
fn weekly_sweep_holds_every_bound() {
    for seed in 0..6_u64 {
        let mut state = GameState::new_career("Sweeper", Archetype::Scorer, seed);
        for _ in 0..80 {
            advance_week(&mut state);
            let player = &state.player;
            assert!(player.cash.dollars() >= 0);
            assert!((40..=99).contains(&player.ratings.overall));
            assert!(player.potential >= 40 && player.potential <= 99);
            assert!((0..=100).contains(&player.condition.health));
            assert!((0..=100).contains(&player.condition.peak));
            assert!((0..=100).contains(&player.condition.morale));
            assert!((0..=100).contains(&player.fame));
            for team in &state.league.teams {
                assert!(team.wins + team.losses <= SEASON_GAMES);
                assert!((50.0..=90.0).contains(&team.current_strength));
            }
            // Derived overall stays in sync with the primary skills.
            let mut recomputed = player.ratings.clone();
            recomputed.recompute_overall();
            assert_eq!(recomputed.overall, player.ratings.overall);
        }
    }
}

#[test]
fn season_stat_lines_stay_structurally_sound() {
    let mut state = GameState::new_career("Box Score", Archetype::Sharpshooter, 888);
    while state.phase != Phase::Regular {
        advance_week(&mut state);
    }
    for _ in 0..9 {
        advance_week(&mut state);
    }
    let stats = &state.player.stats;
    assert!(stats.games > 0, "no games recorded in a regular season");
    for line in &stats.game_log {
        assert!(line.fg_made <= line.fg_att);
        assert!(line.three_made <= line.three_att);
        assert!(line.three_att <= line.fg_att);
        assert!(line.ft_made <= line.ft_att);
        assert!((0.0..=1.0).contains(&line.ts_pct));
        assert!((0.0..=50.0).contains(&line.per));
    }
    assert!(stats.ppg() >= 0.0);
    assert!((0.0..=1.0).contains(&stats.win_pct()));
}

#[test]
fn training_between_weeks_keeps_state_legal() {
    let mut state = GameState::new_career("Grinder", Archetype::TwoWay, 777);
    for week in 0..40 {
        advance_week(&mut state);
        if week % 3 == 0 {
            let mut rng = state.take_rng();
            train(
                &mut state.player,
                Attribute::Shooting,
                Intensity::Moderate,
                &mut rng,
            );
            state.rng = Some(rng);
            state.sanitize();
        }
        assert!(state.player.ratings.shooting <= 99);
        assert!(state.player.ratings.overall <= state.player.potential.max(state.player.ratings.overall));
        assert!(state.player.cash.dollars() >= 0);
    }
}

#[test]
fn phases_cycle_in_order() {
    let mut state = GameState::new_career("Clockwork", Archetype::Playmaker, 2500);
    let mut previous = state.phase;
    for _ in 0..120 {
        advance_week(&mut state);
        let legal = matches!(
            (previous, state.phase),
            (Phase::Preseason, Phase::Preseason)
                | (Phase::Preseason, Phase::Regular)
                | (Phase::Regular, Phase::Regular)
                | (Phase::Regular, Phase::Playoffs)
                | (Phase::Regular, Phase::Offseason)
                | (Phase::Playoffs, Phase::Offseason)
                | (Phase::Offseason, Phase::Preseason)
        );
        assert!(
            legal,
            "illegal transition {:?} -> {:?}",
            previous, state.phase
        );
        previous = state.phase;
    }
}

//! Root game state: the player, the league, and the career clock.
//!
//! The state owns every sub-record exclusively and carries its own
//! ChaCha RNG, skipped during serialization and rebuilt from the stored
//! seed on load. All simulation mutates a working copy of this struct;
//! nothing here is shared or aliased.

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::archetypes::{Archetype, generate_initial_ratings};
use crate::events::TimelineEvent;
use crate::league::{LEAGUE_SIZE, League};
use crate::market::EndorsementOffer;
use crate::player::{Condition, Player, generate_teammates, rookie_contract};
use crate::playoffs::PlayoffResult;
use crate::ratings::{RATING_MAX, RATING_MIN};
use crate::season::Phase;

const ROOKIE_AGE_MIN: u32 = 18;
const ROOKIE_AGE_MAX: u32 = 22;
const POTENTIAL_HEADROOM_MIN: i32 = 2;
const POTENTIAL_HEADROOM_MAX: i32 = 14;
const FAME_MAX: i32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    pub season: u32,
    pub week: u32,
    pub phase: Phase,
    pub player: Player,
    pub league: League,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub pending_offer: Option<EndorsementOffer>,
    #[serde(default)]
    pub last_playoff: Option<PlayoffResult>,
    #[serde(skip)]
    pub rng: Option<ChaCha20Rng>,
}

impl GameState {
    /// Roll a fresh career: jittered archetype ratings, a rookie deal
    /// with a random franchise, and a seeded league backdrop.
    #[must_use]
    pub fn new_career(name: &str, archetype: Archetype, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::from_seed(Self::seed_bytes(seed));
        let league = League::initialize(&mut rng);

        let age = rng.random_range(ROOKIE_AGE_MIN..=ROOKIE_AGE_MAX);
        let ratings = generate_initial_ratings(archetype, &mut rng);
        let potential = (ratings.overall
            + rng.random_range(POTENTIAL_HEADROOM_MIN..=POTENTIAL_HEADROOM_MAX))
        .min(RATING_MAX);
        let team = rng.random_range(0..LEAGUE_SIZE);
        let contract = rookie_contract(league.team_name(team), ratings.overall, &mut rng);
        let teammates = generate_teammates(&mut rng, league.teams[team].current_strength);

        let player = Player {
            name: name.to_string(),
            age,
            archetype,
            ratings,
            potential,
            condition: Condition::default(),
            fame: 10,
            followers: 1_000,
            cash: crate::money::Cash::new(2_000),
            team,
            contract,
            teammates,
            stats: crate::stats::SeasonStats::default(),
            career: crate::stats::Career::default(),
            endorsements: Vec::new(),
            services: Vec::new(),
            injury_games_out: 0,
            retired: false,
        };

        let mut state = Self {
            seed,
            season: 1,
            week: 1,
            phase: Phase::Preseason,
            player,
            league,
            timeline: Vec::new(),
            pending_offer: None,
            last_playoff: None,
            rng: Some(rng),
        };
        state.push_event(format!(
            "Drafted by the {} on a {}-year, {} deal.",
            state.player.contract.team, state.player.contract.years, state.player.contract.salary
        ));
        info!(
            "new career: {name} ({}) age {age}, overall {}, seed {seed}",
            archetype.key(),
            state.player.ratings.overall
        );
        state
    }

    fn seed_bytes(s: u64) -> [u8; 32] {
        #[inline]
        fn b(x: u64, shift: u8, xorv: u8) -> u8 {
            (((x >> shift) & 0xFF) as u8) ^ xorv
        }
        [
            b(s, 56, 0x00),
            b(s, 48, 0x00),
            b(s, 40, 0x00),
            b(s, 32, 0x00),
            b(s, 24, 0x00),
            b(s, 16, 0x00),
            b(s, 8, 0x00),
            b(s, 0, 0x00),
            b(s, 56, 0xAA),
            b(s, 48, 0x55),
            b(s, 40, 0xAA),
            b(s, 32, 0x55),
            b(s, 24, 0xAA),
            b(s, 16, 0x55),
            b(s, 8, 0xAA),
            b(s, 0, 0x55),
            b(s, 56, 0x5A),
            b(s, 48, 0xA5),
            b(s, 40, 0x5A),
            b(s, 32, 0xA5),
            b(s, 24, 0x5A),
            b(s, 16, 0xA5),
            b(s, 8, 0x5A),
            b(s, 0, 0xA5),
            b(s, 56, 0xFF),
            b(s, 48, 0xFF),
            b(s, 40, 0xFF),
            b(s, 32, 0xFF),
            b(s, 24, 0xFF),
            b(s, 16, 0xFF),
            b(s, 8, 0xFF),
            b(s, 0, 0xFF),
        ]
    }

    /// Replace the RNG with a fresh stream for `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = Some(ChaCha20Rng::from_seed(Self::seed_bytes(seed)));
        self
    }

    /// Rebuild the skipped RNG after deserialization.
    #[must_use]
    pub fn rehydrate(mut self) -> Self {
        self.rng = Some(ChaCha20Rng::from_seed(Self::seed_bytes(self.seed)));
        self
    }

    /// Take the RNG out for a transition; callers put it back when done.
    /// A state that was never rehydrated gets a seed-derived stream.
    pub fn take_rng(&mut self) -> ChaCha20Rng {
        let seed = self.seed;
        self.rng
            .take()
            .unwrap_or_else(|| ChaCha20Rng::from_seed(Self::seed_bytes(seed)))
    }

    pub fn push_event(&mut self, text: impl Into<String>) {
        self.timeline
            .push(TimelineEvent::new(self.season, self.week, text));
    }

    /// Coerce every numeric field back into its legal range. Runs after
    /// each transition and on load, so corrupt or legacy values degrade
    /// to safe floors instead of propagating.
    pub fn sanitize(&mut self) {
        let player = &mut self.player;
        player.ratings.clamp();
        player.ratings.recompute_overall();
        player.potential = player.potential.clamp(RATING_MIN, RATING_MAX);
        player.condition.clamp();
        player.fame = player.fame.clamp(0, FAME_MAX);
        player.cash = player.cash.sanitized();
        player.contract.salary = player.contract.salary.sanitized();
        if player.contract.years == 0 {
            player.contract.years = 1;
        }
        if player.contract.year == 0 {
            player.contract.year = 1;
        }
        for deal in &mut player.endorsements {
            deal.value = deal.value.sanitized();
        }
        if self.week == 0 {
            self.week = 1;
        }
        if self.season == 0 {
            self.season = 1;
        }
    }

    /// Hang them up. Terminal: no further weekly simulation applies.
    pub fn retire(&mut self) {
        if self.player.retired {
            return;
        }
        self.player.retired = true;
        let seasons = self.player.career.seasons.len();
        self.push_event(format!("Announced retirement after {seasons} seasons."));
        info!("{} retired in season {}", self.player.name, self.season);
    }

    /// Fire off a social post. Gains scale with fame and star tier.
    pub fn post_to_social(&mut self) -> String {
        let mut rng = self.take_rng();
        let base = 150
            + i64::from(self.player.fame.clamp(0, FAME_MAX)) * 12
            + i64::from(self.player.star_tier()) * 1_500;
        let gained = crate::rng::uniform(&mut rng, 0.6, 1.6) * crate::numbers::i64_to_f64(base);
        let gained = crate::numbers::round_f64_to_u32(gained);
        self.player.followers += u64::from(gained);
        if rng.random::<f64>() < 0.10 {
            self.player.fame += 1;
        }
        self.rng = Some(rng);
        self.sanitize();
        let message = format!("Posted to social media; +{gained} followers.");
        self.push_event(message.clone());
        message
    }
}

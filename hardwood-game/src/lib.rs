//! Hardwood Career Engine
//!
//! Platform-agnostic core for the Hardwood basketball career simulator.
//! This crate provides the full season simulation — per-game box scores,
//! standings, playoffs, awards, contracts, and aging — without UI or
//! platform-specific dependencies.

pub mod archetypes;
pub mod awards;
pub mod events;
pub mod league;
pub mod legacy;
pub mod market;
pub mod money;
pub mod numbers;
pub mod performance;
pub mod player;
pub mod playoffs;
pub mod ratings;
pub mod rng;
pub mod saves;
pub mod season;
pub mod state;
pub mod stats;
pub mod training;

// Re-export commonly used types
pub use archetypes::{Archetype, generate_initial_ratings};
pub use awards::{Award, evaluate_season_awards};
pub use events::{LifeEvent, TimelineEvent, roll_weekly_event};
pub use league::{Conference, League, SEASON_GAMES, Team};
pub use legacy::{calculate_player_score, hall_of_fame_chance};
pub use market::{
    EndorsementOffer, NegotiationOutcome, accept_endorsement, generate_endorsement_offer,
    market_value, purchase_service, request_extension, request_trade,
};
pub use money::Cash;
pub use performance::simulate_game;
pub use player::{
    Clause, Condition, Contract, Endorsement, Player, PremiumService, ServiceKind, Teammate,
};
pub use playoffs::{FinalsProfile, PlayoffResult, simulate_playoffs};
pub use ratings::{Attribute, RatingSet, age_multiplier, progress_aging};
pub use saves::{STORAGE_KEY, SaveError, export_json, import_json};
pub use season::{Phase, advance_month, advance_season, advance_week, team_win_chance};
pub use state::GameState;
pub use stats::{Career, CareerTotals, GameStatLine, SeasonRecord, SeasonStats};
pub use training::{Intensity, TrainingOutcome, train};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this.
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the full state blob under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save_game(&self, key: &str, state: &GameState) -> Result<(), Self::Error>;

    /// Read a state blob back, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load_game(&self, key: &str) -> Result<Option<GameState>, Self::Error>;

    /// Remove a stored blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, key: &str) -> Result<(), Self::Error>;
}

/// Everything the UI layer can ask the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AdvanceWeek,
    AdvanceMonth,
    AdvanceSeason,
    Train(Attribute, Intensity),
    RequestTrade,
    RequestContract,
    AcceptOffer,
    DeclineOffer,
    PurchaseService(ServiceKind),
    PostToSocial,
    Retire,
}

/// The human-readable lines produced by one applied action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    pub messages: Vec<String>,
}

/// Owns the current career and its storage backend.
///
/// Every action runs against a working copy of the state: the copy is
/// mutated to completion, sanitized, and only then atomically replaces
/// the live state and hits storage. A panic or storage failure mid-way
/// never leaves a half-applied career behind.
pub struct CareerEngine<S>
where
    S: GameStorage,
{
    storage: S,
    state: GameState,
}

impl<S> CareerEngine<S>
where
    S: GameStorage,
{
    /// Start a fresh career and write the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial save cannot be written.
    pub fn new_career(
        storage: S,
        name: &str,
        archetype: Archetype,
        seed: u64,
    ) -> Result<Self, S::Error> {
        let state = GameState::new_career(name, archetype, seed);
        storage.save_game(STORAGE_KEY, &state)?;
        Ok(Self { storage, state })
    }

    /// Resume a saved career, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn resume(storage: S) -> Result<Option<Self>, S::Error> {
        let Some(state) = storage.load_game(STORAGE_KEY)? else {
            return Ok(None);
        };
        let mut state = state.rehydrate();
        state.sanitize();
        Ok(Some(Self { storage, state }))
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply one action atomically: clone, mutate, sanitize, replace,
    /// autosave.
    ///
    /// # Errors
    ///
    /// Returns an error if the autosave fails; the in-memory state still
    /// reflects the applied action.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, S::Error> {
        let mut working = self.state.clone();
        let messages = Self::dispatch(&mut working, action);
        working.sanitize();
        self.state = working;
        self.storage.save_game(STORAGE_KEY, &self.state)?;
        Ok(ActionOutcome { messages })
    }

    fn dispatch(working: &mut GameState, action: Action) -> Vec<String> {
        match action {
            Action::AdvanceWeek => advance_week(working),
            Action::AdvanceMonth => advance_month(working),
            Action::AdvanceSeason => advance_season(working),
            Action::Train(attribute, intensity) => {
                let mut rng = working.take_rng();
                let outcome = train(&mut working.player, attribute, intensity, &mut rng);
                working.rng = Some(rng);
                if outcome.gain > 0 {
                    working.push_event(outcome.message.clone());
                }
                vec![outcome.message]
            }
            Action::RequestTrade => {
                let mut rng = working.take_rng();
                let outcome = request_trade(&mut working.player, &working.league, &mut rng);
                working.rng = Some(rng);
                working.push_event(outcome.message.clone());
                vec![outcome.message]
            }
            Action::RequestContract => {
                let mut rng = working.take_rng();
                let outcome = request_extension(&mut working.player, &working.league, &mut rng);
                working.rng = Some(rng);
                working.push_event(outcome.message.clone());
                vec![outcome.message]
            }
            Action::AcceptOffer => match working.pending_offer.take() {
                Some(offer) => {
                    let message = accept_endorsement(&mut working.player, offer);
                    working.push_event(message.clone());
                    vec![message]
                }
                None => vec!["No offer on the table.".to_string()],
            },
            Action::DeclineOffer => match working.pending_offer.take() {
                Some(offer) => vec![format!("Passed on the {} offer.", offer.name)],
                None => vec!["No offer on the table.".to_string()],
            },
            Action::PurchaseService(kind) => {
                let outcome = purchase_service(&mut working.player, kind);
                if outcome.accepted {
                    working.push_event(outcome.message.clone());
                }
                vec![outcome.message]
            }
            Action::PostToSocial => vec![working.post_to_social()],
            Action::Retire => {
                working.retire();
                vec!["Retirement announced.".to_string()]
            }
        }
    }
}

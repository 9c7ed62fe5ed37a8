//! Random life events and the career timeline.
//!
//! A small pool of off-court happenings rolls once per simulated week.
//! Each event nudges morale, fame, followers, or cash; the scandal
//! variant can additionally void an active endorsement deal.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::money::Cash;
use crate::player::Player;
use crate::rng::roll;

/// Chance that any life event fires in a given week.
pub const WEEKLY_EVENT_CHANCE: f64 = 0.25;

/// One entry in the career timeline, shown in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub season: u32,
    pub week: u32,
    pub text: String,
}

impl TimelineEvent {
    #[must_use]
    pub fn new(season: u32, week: u32, text: impl Into<String>) -> Self {
        Self {
            season,
            week,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeEvent {
    CharityGala,
    ViralHighlight,
    FanMeetup,
    LocalAdShoot,
    TrainingBreakthrough,
    FamilyVisit,
    MinorScandal,
    StolenCar,
    MediaCriticism,
}

impl LifeEvent {
    pub const ALL: [Self; 9] = [
        Self::CharityGala,
        Self::ViralHighlight,
        Self::FanMeetup,
        Self::LocalAdShoot,
        Self::TrainingBreakthrough,
        Self::FamilyVisit,
        Self::MinorScandal,
        Self::StolenCar,
        Self::MediaCriticism,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::CharityGala => "charity_gala",
            Self::ViralHighlight => "viral_highlight",
            Self::FanMeetup => "fan_meetup",
            Self::LocalAdShoot => "local_ad_shoot",
            Self::TrainingBreakthrough => "training_breakthrough",
            Self::FamilyVisit => "family_visit",
            Self::MinorScandal => "minor_scandal",
            Self::StolenCar => "stolen_car",
            Self::MediaCriticism => "media_criticism",
        }
    }

    /// Apply the event's effects and return the timeline text.
    pub fn apply(self, player: &mut Player, rng: &mut impl Rng) -> String {
        match self {
            Self::CharityGala => {
                player.fame += 2;
                player.condition.morale += 3;
                player.followers += 500;
                "Hosted a charity gala; the local press loved it.".to_string()
            }
            Self::ViralHighlight => {
                let gained = rng.random_range(2_000_u64..=10_000);
                player.followers += gained;
                player.fame += 3;
                format!("A dunk clip went viral; +{gained} followers overnight.")
            }
            Self::FanMeetup => {
                player.condition.morale += 4;
                player.followers += 300;
                "Surprise fan meetup after practice lifted everyone's mood.".to_string()
            }
            Self::LocalAdShoot => {
                let fee = Cash::new(i64::from(rng.random_range(500..=2_500)));
                player.cash = player.cash.credit(fee);
                format!("Shot a local TV ad for {fee}.")
            }
            Self::TrainingBreakthrough => {
                player.condition.peak += 5;
                player.condition.morale += 2;
                "A breakthrough week of workouts; body feels sharp.".to_string()
            }
            Self::FamilyVisit => {
                player.condition.morale += 5;
                "Family flew in for the week.".to_string()
            }
            Self::MinorScandal => {
                player.fame -= 4;
                player.condition.morale -= 5;
                if !player.endorsements.is_empty() {
                    let idx = rng.random_range(0..player.endorsements.len());
                    let dropped = player.endorsements.remove(idx);
                    return format!(
                        "A PR misstep made headlines; {} terminated their deal.",
                        dropped.name
                    );
                }
                "A PR misstep made headlines; sponsors are watching.".to_string()
            }
            Self::StolenCar => {
                let loss = Cash::new(i64::from(rng.random_range(1_000..=5_000)));
                player.cash = player.cash.debit(loss);
                player.condition.morale -= 3;
                format!("Car stolen from the arena lot; out {loss}.")
            }
            Self::MediaCriticism => {
                player.condition.morale -= 4;
                player.fame -= 1;
                "A columnist questioned the effort on defense.".to_string()
            }
        }
    }
}

/// Roll the weekly event check. Returns the timeline text when one fires.
pub fn roll_weekly_event(player: &mut Player, rng: &mut impl Rng) -> Option<String> {
    if !roll(rng, WEEKLY_EVENT_CHANCE) {
        return None;
    }
    let event = LifeEvent::ALL[rng.random_range(0..LifeEvent::ALL.len())];
    let text = event.apply(player, rng);
    player.condition.clamp();
    info!("life event {}: {text}", event.key());
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::{Archetype, generate_initial_ratings};
    use crate::player::{Condition, Contract, Endorsement};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_player() -> Player {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let ratings = generate_initial_ratings(Archetype::Playmaker, &mut rng);
        Player {
            name: "Event Target".to_string(),
            age: 24,
            archetype: Archetype::Playmaker,
            ratings,
            potential: 90,
            condition: Condition::default(),
            fame: 20,
            followers: 5_000,
            cash: Cash::new(10_000),
            team: 3,
            contract: Contract {
                team: "Chicago Forge".to_string(),
                years: 2,
                salary: Cash::new(12_000),
                year: 1,
                clause: None,
            },
            teammates: Vec::new(),
            stats: crate::stats::SeasonStats::default(),
            career: crate::stats::Career::default(),
            endorsements: Vec::new(),
            services: Vec::new(),
            injury_games_out: 0,
            retired: false,
        }
    }

    #[test]
    fn scandal_voids_an_endorsement() {
        let mut player = test_player();
        player.endorsements.push(Endorsement {
            name: "Apex Footwear".to_string(),
            value: Cash::new(4_000),
            years_left: Some(2),
        });
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let text = LifeEvent::MinorScandal.apply(&mut player, &mut rng);
        assert!(player.endorsements.is_empty());
        assert!(text.contains("Apex Footwear"));
    }

    #[test]
    fn cash_events_never_go_negative() {
        let mut player = test_player();
        player.cash = Cash::new(100);
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..20 {
            LifeEvent::StolenCar.apply(&mut player, &mut rng);
        }
        assert!(player.cash.dollars() >= 0);
    }

    #[test]
    fn weekly_roll_fires_at_expected_rate() {
        let mut player = test_player();
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let fired = (0..2_000)
            .filter(|_| roll_weekly_event(&mut player, &mut rng).is_some())
            .count();
        let rate = fired as f64 / 2_000.0;
        assert!((rate - WEEKLY_EVENT_CHANCE).abs() < 0.05, "rate {rate}");
    }

    #[test]
    fn condition_stays_clamped_after_events() {
        let mut player = test_player();
        player.condition.morale = 99;
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..200 {
            roll_weekly_event(&mut player, &mut rng);
        }
        assert!((0..=100).contains(&player.condition.morale));
        assert!((0..=100).contains(&player.condition.peak));
    }
}

//! Contracts, trades, and the endorsement market.
//!
//! Every negotiation resolves the same way: a base success chance,
//! additive adjustments from measurable factors, a clamp, then one
//! Bernoulli draw. Success mutates team/contract/cash and produces a
//! timeline line; failure costs a little morale and produces a
//! differently worded one. Endorsement offers skip the coin entirely;
//! only their value is randomized.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::league::League;
use crate::money::Cash;
use crate::player::{Clause, Contract, Endorsement, Player, PremiumService, ServiceKind, generate_teammates};
use crate::rng::{roll, uniform};

const TRADE_BASE_CHANCE: f64 = 0.30;
const TRADE_CHANCE_MIN: f64 = 0.10;
const TRADE_CHANCE_MAX: f64 = 0.85;
const EXTENSION_BASE_CHANCE: f64 = 0.25;
const EXTENSION_CHANCE_MIN: f64 = 0.05;
const EXTENSION_CHANCE_MAX: f64 = 0.90;
const OFFSEASON_LOYALTY_BASE: f64 = 0.55;
const FAILED_TALKS_MORALE_HIT: i32 = 3;
const VALUE_SPREAD_LO: f64 = 0.70;
const VALUE_SPREAD_HI: f64 = 1.30;

/// Result of one negotiation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationOutcome {
    pub accepted: bool,
    pub message: String,
}

/// Annual salary the open market would bear for this player right now.
#[must_use]
pub fn market_value(player: &Player) -> Cash {
    let overall = f64::from(player.ratings.overall);
    let fame = f64::from(player.fame.clamp(0, 100));
    let ppg = player.stats.ppg().max(player.career.totals.ppg());
    let value = overall * 80.0 + fame * 45.0 + ppg * 220.0;
    Cash::from_f64(value.max(0.0))
}

fn performance_adjustment(player: &Player) -> f64 {
    let ppg = player.stats.ppg();
    if ppg >= 24.0 {
        0.20
    } else if ppg >= 18.0 {
        0.12
    } else if ppg >= 12.0 {
        0.05
    } else {
        0.0
    }
}

/// Ask out of the current team. An accepted request moves the player to
/// a random other franchise mid-season and refreshes the locker room.
pub fn request_trade(player: &mut Player, league: &League, rng: &mut impl Rng) -> NegotiationOutcome {
    let mut chance = TRADE_BASE_CHANCE + performance_adjustment(player);
    if player.fame >= 60 {
        chance += 0.10;
    }
    if league.teams[player.team].win_pct() < 0.40 {
        chance += 0.10;
    }
    if player.condition.morale < 40 {
        chance += 0.05;
    }
    if player.contract.clause == Some(Clause::NoTrade) {
        chance += 0.10;
    }
    let chance = chance.clamp(TRADE_CHANCE_MIN, TRADE_CHANCE_MAX);

    if roll(rng, chance) {
        let mut destination = rng.random_range(0..league.teams.len());
        if destination == player.team {
            destination = (destination + 1) % league.teams.len();
        }
        player.team = destination;
        player.contract.team = league.team_name(destination).to_string();
        player.teammates = generate_teammates(rng, league.teams[destination].current_strength);
        player.condition.morale += 5;
        player.condition.clamp();
        let message = format!("Trade request granted; shipped to the {}.", player.contract.team);
        info!("{message}");
        NegotiationOutcome {
            accepted: true,
            message,
        }
    } else {
        player.condition.morale -= FAILED_TALKS_MORALE_HIT;
        player.condition.clamp();
        NegotiationOutcome {
            accepted: false,
            message: "The front office declined the trade request.".to_string(),
        }
    }
}

fn sign_terms(player: &Player, rng: &mut impl Rng) -> (u32, Cash) {
    let years = rng.random_range(2..=4);
    let annual = market_value(player).scaled(uniform(rng, 0.90, 1.15));
    (years, annual.scaled(f64::from(years)))
}

/// Leverage decides the rider on a fresh deal: established stars extract
/// no-trade protection, long deals carry a player option, fringe signings
/// concede a team option.
fn negotiate_clause(player: &Player, years: u32, rng: &mut impl Rng) -> Option<Clause> {
    if (player.fame >= 70 || player.star_tier() >= 2) && roll(rng, 0.35) {
        Some(Clause::NoTrade)
    } else if years >= 3 && roll(rng, 0.25) {
        Some(Clause::PlayerOption)
    } else if player.ratings.overall < 75 && roll(rng, 0.30) {
        Some(Clause::TeamOption)
    } else {
        None
    }
}

/// Mid-season push for a richer deal with the current team.
pub fn request_extension(player: &mut Player, league: &League, rng: &mut impl Rng) -> NegotiationOutcome {
    let mut chance = EXTENSION_BASE_CHANCE + performance_adjustment(player);
    if league.teams[player.team].win_pct() >= 0.55 {
        chance += 0.10;
    }
    if player.contract.annual_salary() < market_value(player) {
        chance += 0.20;
    }
    if player.condition.morale >= 70 {
        chance += 0.05;
    }
    let chance = chance.clamp(EXTENSION_CHANCE_MIN, EXTENSION_CHANCE_MAX);

    if roll(rng, chance) {
        let (years, total) = sign_terms(player, rng);
        player.contract = Contract {
            team: player.contract.team.clone(),
            years,
            salary: total,
            year: 1,
            clause: negotiate_clause(player, years, rng),
        };
        let message = format!(
            "Extension signed: {years} years, {total} with the {}.",
            player.contract.team
        );
        info!("{message}");
        NegotiationOutcome {
            accepted: true,
            message,
        }
    } else {
        player.condition.morale -= FAILED_TALKS_MORALE_HIT;
        player.condition.clamp();
        NegotiationOutcome {
            accepted: false,
            message: "Extension talks stalled; the table stays as-is.".to_string(),
        }
    }
}

/// Offseason contract resolution. An expiring deal always resolves to
/// either a re-signing or a free-agency move; the player never enters
/// a season unsigned. Non-expiring deals just tick the year index.
pub fn resolve_offseason_contract(
    player: &mut Player,
    league: &League,
    rng: &mut impl Rng,
) -> Option<String> {
    if player.contract.year < player.contract.years {
        player.contract.year += 1;
        return None;
    }

    let mut loyalty = OFFSEASON_LOYALTY_BASE;
    if league.teams[player.team].win_pct() >= 0.55 {
        loyalty += 0.15;
    }
    if player.condition.morale >= 70 {
        loyalty += 0.10;
    }
    let (years, total) = sign_terms(player, rng);
    let clause = negotiate_clause(player, years, rng);

    let message = if roll(rng, loyalty.clamp(0.10, 0.95)) {
        player.contract = Contract {
            team: player.contract.team.clone(),
            years,
            salary: total,
            year: 1,
            clause,
        };
        format!("Re-signed with the {}: {years} years, {total}.", player.contract.team)
    } else {
        let mut destination = rng.random_range(0..league.teams.len());
        if destination == player.team {
            destination = (destination + 1) % league.teams.len();
        }
        player.team = destination;
        player.teammates = generate_teammates(rng, league.teams[destination].current_strength);
        player.contract = Contract {
            team: league.team_name(destination).to_string(),
            years,
            salary: total,
            year: 1,
            clause,
        };
        format!(
            "Signed in free agency with the {}: {years} years, {total}.",
            player.contract.team
        )
    };
    info!("{message}");
    Some(message)
}

/// A sponsorship on the table, waiting for accept/decline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsementOffer {
    pub name: String,
    /// Annual payout.
    pub value: Cash,
    pub years: u32,
}

const SPONSOR_POOL: [(&str, i64); 6] = [
    ("Apex Footwear", 6_000),
    ("Volt Energy", 3_500),
    ("Northline Apparel", 2_800),
    ("Crown Watches", 4_500),
    ("Stackhouse Burgers", 2_000),
    ("Meridian Autos", 5_000),
];

/// Star-tier steps, fame/followers scaling, and accolade bonuses all
/// multiply the sponsor's base figure; the result is then randomized
/// +/-30%.
#[must_use]
pub fn endorsement_multiplier(player: &Player) -> f64 {
    let totals = &player.career.totals;
    let mut multiplier = 1.0 + f64::from(player.star_tier()) * 0.5;
    multiplier += f64::from(player.fame.clamp(0, 100)) / 200.0;
    multiplier += (crate::numbers::u64_to_f64(player.followers) / 500_000.0).min(0.5);
    multiplier += f64::from(totals.mvps) * 0.30
        + f64::from(totals.titles) * 0.25
        + f64::from(totals.all_stars) * 0.05;
    multiplier
}

/// Maybe float a new sponsorship. Offers only come to players with some
/// profile, and never while one is already on the table.
pub fn generate_endorsement_offer(player: &Player, rng: &mut impl Rng) -> Option<EndorsementOffer> {
    if player.fame < 25 && player.star_tier() == 0 {
        return None;
    }
    if !roll(rng, 0.15) {
        return None;
    }
    let (name, base) = SPONSOR_POOL[rng.random_range(0..SPONSOR_POOL.len())];
    let value = Cash::new(base)
        .scaled(endorsement_multiplier(player))
        .scaled(uniform(rng, VALUE_SPREAD_LO, VALUE_SPREAD_HI));
    Some(EndorsementOffer {
        name: name.to_string(),
        value,
        years: rng.random_range(1..=3),
    })
}

/// Accept a pending offer: the deal goes on the books and pays out at
/// each season's end.
pub fn accept_endorsement(player: &mut Player, offer: EndorsementOffer) -> String {
    let message = format!("Signed with {} for {} a year.", offer.name, offer.value);
    player.endorsements.push(Endorsement {
        name: offer.name,
        value: offer.value,
        years_left: Some(offer.years),
    });
    player.fame += 2;
    info!("{message}");
    message
}

/// Buy a premium service subscription. Refused without state change when
/// the fee is not covered.
pub fn purchase_service(player: &mut Player, kind: ServiceKind) -> NegotiationOutcome {
    if player.services.iter().any(|s| s.kind == kind) {
        return NegotiationOutcome {
            accepted: false,
            message: format!("{} already retained.", kind.name()),
        };
    }
    let fee = kind.cost();
    if !player.cash.can_afford(fee) {
        return NegotiationOutcome {
            accepted: false,
            message: format!("Cannot afford a {} ({fee}).", kind.name()),
        };
    }
    player.cash = player.cash.debit(fee);
    player.services.push(PremiumService {
        kind,
        weeks_left: kind.duration_weeks(),
    });
    NegotiationOutcome {
        accepted: true,
        message: format!("Retained a {} for {fee}.", kind.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::{Archetype, generate_initial_ratings};
    use crate::player::Condition;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_player(years: u32, year: u32) -> Player {
        let mut rng = ChaCha20Rng::seed_from_u64(41);
        let ratings = generate_initial_ratings(Archetype::Sharpshooter, &mut rng);
        Player {
            name: "Deal Seeker".to_string(),
            age: 26,
            archetype: Archetype::Sharpshooter,
            ratings,
            potential: 92,
            condition: Condition::default(),
            fame: 50,
            followers: 80_000,
            cash: Cash::new(40_000),
            team: 4,
            contract: Contract {
                team: "Miami Current".to_string(),
                years,
                salary: Cash::new(30_000),
                year,
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

    fn test_league() -> League {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        League::initialize(&mut rng)
    }

    #[test]
    fn expiring_contract_always_resolves() {
        let league = test_league();
        for seed in 0..40 {
            let mut player = test_player(2, 2);
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let message = resolve_offseason_contract(&mut player, &league, &mut rng);
            assert!(message.is_some());
            assert_eq!(player.contract.year, 1);
            assert!(player.contract.years >= 2);
            assert!(!player.contract.expired());
            assert!(player.contract.salary.dollars() > 0);
        }
    }

    #[test]
    fn resolved_deals_sometimes_carry_clauses() {
        let league = test_league();
        let mut no_trade = 0;
        let mut any_clause = 0;
        for seed in 0..120 {
            let mut player = test_player(2, 2);
            player.fame = 85;
            let mut rng = ChaCha20Rng::seed_from_u64(200 + seed);
            resolve_offseason_contract(&mut player, &league, &mut rng);
            match player.contract.clause {
                Some(Clause::NoTrade) => {
                    no_trade += 1;
                    any_clause += 1;
                }
                Some(_) => any_clause += 1,
                None => {}
            }
        }
        assert!(no_trade > 0, "famous veterans never won no-trade protection");
        assert!(any_clause > 20, "clauses barely ever attach: {any_clause}");
    }

    #[test]
    fn fringe_signings_never_get_no_trade_protection() {
        let league = test_league();
        for seed in 0..60 {
            let mut player = test_player(2, 2);
            player.fame = 10;
            player.ratings.shooting = 55;
            player.ratings.recompute_overall();
            let mut rng = ChaCha20Rng::seed_from_u64(400 + seed);
            resolve_offseason_contract(&mut player, &league, &mut rng);
            assert_ne!(player.contract.clause, Some(Clause::NoTrade));
        }
    }

    #[test]
    fn running_contract_just_ticks() {
        let league = test_league();
        let mut player = test_player(4, 2);
        let mut rng = ChaCha20Rng::seed_from_u64(43);
        let message = resolve_offseason_contract(&mut player, &league, &mut rng);
        assert!(message.is_none());
        assert_eq!(player.contract.year, 3);
        assert_eq!(player.contract.years, 4);
    }

    #[test]
    fn accepted_trade_moves_teams() {
        let league = test_league();
        let mut accepted_any = false;
        for seed in 0..60 {
            let mut player = test_player(3, 1);
            let before = player.team;
            let mut rng = ChaCha20Rng::seed_from_u64(100 + seed);
            let outcome = request_trade(&mut player, &league, &mut rng);
            if outcome.accepted {
                accepted_any = true;
                assert_ne!(player.team, before);
                assert_eq!(player.contract.team, league.team_name(player.team));
                assert_eq!(player.teammates.len(), crate::player::TEAMMATE_COUNT);
            } else {
                assert_eq!(player.team, before);
            }
        }
        assert!(accepted_any);
    }

    #[test]
    fn offer_value_scales_with_stardom() {
        let bench = test_player(2, 1);
        let mut star = test_player(2, 1);
        star.ratings.shooting = 95;
        star.ratings.finishing = 95;
        star.ratings.playmaking = 92;
        star.ratings.defense = 90;
        star.ratings.rebounding = 88;
        star.ratings.recompute_overall();
        star.fame = 95;
        star.career.totals.mvps = 2;
        star.career.totals.titles = 1;
        assert!(endorsement_multiplier(&star) > endorsement_multiplier(&bench));
    }

    #[test]
    fn unaffordable_service_is_refused() {
        let mut player = test_player(2, 1);
        player.cash = Cash::new(50);
        let outcome = purchase_service(&mut player, ServiceKind::MediaTeam);
        assert!(!outcome.accepted);
        assert_eq!(player.cash, Cash::new(50));
        assert!(player.services.is_empty());
    }

    #[test]
    fn duplicate_service_is_refused() {
        let mut player = test_player(2, 1);
        assert!(purchase_service(&mut player, ServiceKind::Physiotherapist).accepted);
        let cash_after = player.cash;
        assert!(!purchase_service(&mut player, ServiceKind::Physiotherapist).accepted);
        assert_eq!(player.cash, cash_after);
        assert_eq!(player.services.len(), 1);
    }
}

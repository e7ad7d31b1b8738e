//! Dealing concrete cards to players.
//!
//! The dealer is the last step before a game starts. It never fails: a
//! configuration that can't seat everyone leaves the surplus players
//! roleless, and it's the room's validation that keeps such configurations
//! from reaching this point.
//!
//! Callers dealing to a live room must hold the room's write lock for the
//! whole call. The dealer only sees a slice of player handles and cannot
//! take that lock itself.

use std::collections::HashSet;
use std::sync::Arc;

use kingsguard_types::{Card, CardPool, PlayerHandle, RoleType};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::{Preset, RoleConfigService, RoleConfiguration, RoleCounts};

/// Presets a hidden-distribution room may secretly draw from.
pub const HIDDEN_PRESET_CANDIDATES: [&str; 3] = ["standard", "balanced", "chaos"];

/// Draw weights for fully random rooms.
const RANDOM_ROLE_WEIGHTS: [(RoleType, u32); 4] = [
    (RoleType::Guardian, 3),
    (RoleType::Assassin, 2),
    (RoleType::Leader, 1),
    (RoleType::Traitor, 1),
];

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Decides what to deal; [`deal`] decides who gets it.
///
/// Both implementations share the host filtering, shuffling and card
/// bookkeeping in [`deal`] and differ only in where the counts and card
/// eligibility come from.
pub trait AssignmentStrategy {
    /// Target counts for `active_players` non-host players.
    fn resolve<R: Rng + ?Sized>(&self, active_players: usize, rng: &mut R) -> RoleCounts;

    /// Cards of `role_type` that may be dealt.
    fn eligible_cards(&self, pool: &CardPool, role_type: RoleType) -> Vec<Arc<Card>>;
}

/// Deals from a fixed built-in table with every card eligible.
#[derive(Debug, Clone)]
pub struct BuiltinTableStrategy {
    table: Preset,
}

impl BuiltinTableStrategy {
    pub fn new(table: Preset) -> Self {
        Self { table }
    }
}

impl Default for BuiltinTableStrategy {
    fn default() -> Self {
        Self::new(Preset::standard())
    }
}

impl AssignmentStrategy for BuiltinTableStrategy {
    fn resolve<R: Rng + ?Sized>(&self, active_players: usize, _rng: &mut R) -> RoleCounts {
        self.table
            .scale_to(active_players, false)
            .map(|scaled| scaled.counts)
            .unwrap_or_else(|_| minimal_split(active_players, false))
    }

    fn eligible_cards(&self, pool: &CardPool, role_type: RoleType) -> Vec<Arc<Card>> {
        pool.cards(role_type).to_vec()
    }
}

/// Deals according to a room's [`RoleConfiguration`].
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredStrategy<'a> {
    config: &'a RoleConfiguration,
    service: &'a RoleConfigService,
}

impl<'a> ConfiguredStrategy<'a> {
    pub fn new(config: &'a RoleConfiguration, service: &'a RoleConfigService) -> Self {
        Self { config, service }
    }

    fn resolve_hidden<R: Rng + ?Sized>(&self, active_players: usize, rng: &mut R) -> RoleCounts {
        let allow_leaderless = self.config.allow_leaderless_game;
        let candidates: Vec<&Preset> = HIDDEN_PRESET_CANDIDATES
            .iter()
            .filter_map(|name| self.service.preset(name))
            .collect();

        match candidates.choose(rng) {
            Some(preset) => match preset.scale_to(active_players, allow_leaderless) {
                Ok(scaled) => {
                    tracing::debug!(preset = %preset.name, active_players, "hidden preset drawn");
                    scaled.counts
                }
                Err(_) => minimal_split(active_players, allow_leaderless),
            },
            None => minimal_split(active_players, allow_leaderless),
        }
    }

    fn resolve_fully_random<R: Rng + ?Sized>(
        &self,
        active_players: usize,
        rng: &mut R,
    ) -> RoleCounts {
        let mut supply = RoleCounts::default();
        for role_type in RoleType::ALL {
            supply.set(
                role_type,
                self.service.enabled_card_count(self.config, role_type),
            );
        }
        weighted_random_distribution(
            active_players,
            self.config.allow_leaderless_game,
            supply,
            rng,
        )
    }
}

impl AssignmentStrategy for ConfiguredStrategy<'_> {
    fn resolve<R: Rng + ?Sized>(&self, active_players: usize, rng: &mut R) -> RoleCounts {
        if self.config.hide_role_distribution {
            return self.resolve_hidden(active_players, rng);
        }
        if self.config.fully_random_roles {
            return self.resolve_fully_random(active_players, rng);
        }

        match self
            .service
            .get_distribution_for_player_count(self.config, active_players)
        {
            Ok(counts) => counts,
            Err(error) => {
                tracing::warn!(
                    %error,
                    active_players,
                    "dealing configured counts without a valid distribution"
                );
                self.config.role_types.counts()
            }
        }
    }

    fn eligible_cards(&self, pool: &CardPool, role_type: RoleType) -> Vec<Arc<Card>> {
        self.config
            .role_types
            .get(role_type)
            .eligible_cards(pool, role_type)
    }
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

/// One Leader and Guardians for everyone else (all Guardians if leaderless).
pub fn minimal_split(players: usize, allow_leaderless: bool) -> RoleCounts {
    if players == 0 {
        return RoleCounts::default();
    }
    if allow_leaderless {
        RoleCounts::new(0, players, 0, 0)
    } else {
        RoleCounts::new(1, players - 1, 0, 0)
    }
}

/// A weighted random distribution for `players`.
///
/// One Leader is placed up front unless leaderless play is allowed; the rest
/// of the slots are drawn with weights Guardian 3, Assassin 2, Leader 1,
/// Traitor 1. A role type stops being drawn once it reaches its card supply,
/// and the Leader never exceeds one. If every supply runs dry the result may
/// total less than `players`.
pub fn weighted_random_distribution<R: Rng + ?Sized>(
    players: usize,
    allow_leaderless: bool,
    supply: RoleCounts,
    rng: &mut R,
) -> RoleCounts {
    let mut counts = RoleCounts::default();
    if players == 0 {
        return counts;
    }

    let cap = |role_type: RoleType| match role_type {
        RoleType::Leader => supply.leader.min(1),
        other => supply.get(other),
    };

    if !allow_leaderless && cap(RoleType::Leader) > 0 {
        counts.leader = 1;
    }

    for _ in counts.total()..players {
        let open: Vec<(RoleType, u32)> = RANDOM_ROLE_WEIGHTS
            .into_iter()
            .filter(|(role_type, _)| counts.get(*role_type) < cap(*role_type))
            .collect();
        let total_weight: u32 = open.iter().map(|(_, weight)| weight).sum();
        if total_weight == 0 {
            break;
        }

        let mut roll = rng.random_range(0..total_weight);
        for (role_type, weight) in open {
            if roll < weight {
                counts.set(role_type, counts.get(role_type) + 1);
                break;
            }
            roll -= weight;
        }
    }

    counts
}

// ---------------------------------------------------------------------------
// Dealing
// ---------------------------------------------------------------------------

/// What a deal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealReport {
    /// The counts the strategy asked for.
    pub distribution: RoleCounts,
    /// Non-host players who received a card.
    pub assigned: usize,
    /// Non-host players left without one.
    pub roleless: usize,
    /// Hosts skipped.
    pub hosts: usize,
}

/// Deals cards to `players` as `strategy` directs.
///
/// 1. Hosts are set aside and keep no role.
/// 2. The remaining players are shuffled.
/// 3. Role types are dealt in [`RoleType::ALL`] order, so the Leader is
///    seated before anyone else. Each type's eligible cards are shuffled and
///    handed to the next unfilled players; a card name is never dealt twice.
///
/// Every player's previous role is cleared first.
pub fn deal<S, R>(
    players: &[PlayerHandle],
    pool: &CardPool,
    strategy: &S,
    rng: &mut R,
) -> DealReport
where
    S: AssignmentStrategy,
    R: Rng + ?Sized,
{
    let mut active = Vec::with_capacity(players.len());
    let mut hosts = 0;
    for handle in players {
        let mut player = handle.write();
        player.role = None;
        if player.is_host {
            hosts += 1;
        } else {
            active.push(handle);
        }
    }

    active.shuffle(rng);
    let distribution = strategy.resolve(active.len(), rng);

    let mut used: HashSet<String> = HashSet::new();
    let mut seats = active.iter();
    let mut assigned = 0;

    'roles: for role_type in RoleType::ALL {
        let needed = distribution.get(role_type);
        if needed == 0 {
            continue;
        }

        let mut eligible = strategy.eligible_cards(pool, role_type);
        eligible.shuffle(rng);

        let mut dealt = 0;
        for card in eligible {
            if dealt == needed {
                break;
            }
            if used.contains(&card.name) {
                continue;
            }
            let Some(seat) = seats.next() else {
                break 'roles;
            };
            used.insert(card.name.clone());
            seat.write().assign_card(card);
            dealt += 1;
            assigned += 1;
        }

        if dealt < needed {
            tracing::warn!(%role_type, needed, dealt, "ran out of eligible cards");
        }
    }

    let report = DealReport {
        distribution,
        assigned,
        roleless: active.len() - assigned,
        hosts,
    };
    tracing::debug!(
        assigned = report.assigned,
        roleless = report.roleless,
        hosts = report.hosts,
        "roles dealt"
    );
    report
}

/// Deals according to a room's role configuration.
pub fn assign_roles_with_config<R: Rng + ?Sized>(
    players: &[PlayerHandle],
    pool: &CardPool,
    config: &RoleConfiguration,
    service: &RoleConfigService,
    rng: &mut R,
) -> DealReport {
    deal(players, pool, &ConfiguredStrategy::new(config, service), rng)
}

/// Deals from the built-in `standard` table with every card eligible.
pub fn assign_roles_builtin<R: Rng + ?Sized>(
    players: &[PlayerHandle],
    pool: &CardPool,
    rng: &mut R,
) -> DealReport {
    deal(players, pool, &BuiltinTableStrategy::default(), rng)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_minimal_split() {
        assert_eq!(minimal_split(0, false), RoleCounts::default());
        assert_eq!(minimal_split(4, false), RoleCounts::new(1, 3, 0, 0));
        assert_eq!(minimal_split(4, true), RoleCounts::new(0, 4, 0, 0));
    }

    #[test]
    fn test_weighted_random_has_one_leader_and_fills_table() {
        let supply = RoleCounts::new(3, 10, 10, 10);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let counts = weighted_random_distribution(7, false, supply, &mut rng);
            assert_eq!(counts.total(), 7);
            assert_eq!(counts.leader, 1, "seed {seed}");
        }
    }

    #[test]
    fn test_weighted_random_leaderless_never_exceeds_one_leader() {
        let supply = RoleCounts::new(3, 10, 10, 10);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let counts = weighted_random_distribution(8, true, supply, &mut rng);
            assert_eq!(counts.total(), 8);
            assert!(counts.leader <= 1);
        }
    }

    #[test]
    fn test_weighted_random_respects_card_supply() {
        let supply = RoleCounts::new(1, 1, 1, 1);
        let mut rng = StdRng::seed_from_u64(7);
        let counts = weighted_random_distribution(6, false, supply, &mut rng);
        assert_eq!(counts, RoleCounts::new(1, 1, 1, 1));
    }

    #[test]
    fn test_hidden_mode_without_candidate_presets_uses_minimal_split() {
        let only_custom = Preset::new("house", [(4, RoleCounts::new(1, 1, 1, 1))]);
        let service = RoleConfigService::new(
            crate::ServerLimits::default(),
            [only_custom],
            Arc::new(CardPool::default()),
        );
        let config = RoleConfiguration {
            preset_name: "house".into(),
            hide_role_distribution: true,
            ..RoleConfiguration::default()
        };
        let mut rng = StdRng::seed_from_u64(4);

        let strategy = ConfiguredStrategy::new(&config, &service);
        assert_eq!(strategy.resolve(5, &mut rng), RoleCounts::new(1, 4, 0, 0));

        let leaderless = config.clone().leaderless(true);
        let strategy = ConfiguredStrategy::new(&leaderless, &service);
        assert_eq!(strategy.resolve(5, &mut rng), RoleCounts::new(0, 5, 0, 0));
    }

    #[test]
    fn test_builtin_strategy_falls_back_to_minimal_split() {
        let strategy = BuiltinTableStrategy::new(Preset::new("empty", []));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(strategy.resolve(3, &mut rng), RoleCounts::new(1, 2, 0, 0));
    }
}

//! Integration tests for card dealing against a themed card pool.
//!
//! Every test uses a seeded `StdRng`, so failures reproduce, but the
//! assertions only look at structure (who has a role, which counts, no
//! repeats), never at which player got which card.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use kingsguard_roles::{
    BuiltinTableStrategy, RoleConfigService, RoleConfiguration, RoleCounts, ServerLimits,
    assign_roles_builtin, assign_roles_with_config, builtin_presets, deal,
};
use kingsguard_types::{Card, CardPool, Player, PlayerHandle, RoleType};
use rand::SeedableRng;
use rand::rngs::StdRng;

// =========================================================================
// Helpers
// =========================================================================

fn themed_pool() -> Arc<CardPool> {
    let mut cards = vec![
        Card::new("The Queen", RoleType::Leader),
        Card::new("The Regent", RoleType::Leader),
    ];
    for name in ["Shieldmaiden", "Bodyguard", "Oracle", "Squire", "Herald"] {
        cards.push(Card::new(name, RoleType::Guardian));
    }
    for name in ["Poisoner", "Archer", "Shadow"] {
        cards.push(Card::new(name, RoleType::Assassin));
    }
    for name in ["Usurper", "Turncoat"] {
        cards.push(Card::new(name, RoleType::Traitor));
    }
    Arc::new(CardPool::new(cards).unwrap())
}

fn service() -> RoleConfigService {
    RoleConfigService::new(ServerLimits::default(), builtin_presets(), themed_pool())
}

fn table(active: usize, hosts: usize) -> Vec<PlayerHandle> {
    let mut players: Vec<PlayerHandle> = (0..active)
        .map(|i| PlayerHandle::new(Player::new(format!("p{i}"), format!("Player {i}"), format!("s{i}"))))
        .collect();
    for i in 0..hosts {
        players.push(PlayerHandle::new(Player::host(
            format!("h{i}"),
            format!("Host {i}"),
            format!("hs{i}"),
        )));
    }
    players
}

fn dealt_counts(players: &[PlayerHandle]) -> RoleCounts {
    let mut counts = RoleCounts::default();
    for handle in players {
        if let Some(card) = handle.role() {
            counts.set(card.role_type, counts.get(card.role_type) + 1);
        }
    }
    counts
}

fn assert_no_duplicate_cards(players: &[PlayerHandle]) {
    let mut seen = HashSet::new();
    for handle in players {
        if let Some(card) = handle.role() {
            assert!(seen.insert(card.name.clone()), "card {} dealt twice", card.name);
        }
    }
}

fn assert_hosts_roleless(players: &[PlayerHandle]) {
    for handle in players {
        let player = handle.read();
        if player.is_host {
            assert!(player.role.is_none(), "host {} was dealt a role", player.id);
        }
    }
}

fn assert_reveal_matches_leader(players: &[PlayerHandle]) {
    for handle in players {
        let player = handle.read();
        let is_leader = player
            .role
            .as_ref()
            .is_some_and(|card| card.role_type == RoleType::Leader);
        assert_eq!(player.role_revealed, is_leader, "player {}", player.id);
    }
}

// =========================================================================
// Configured dealing
// =========================================================================

#[test]
fn test_full_custom_table() {
    let service = service();
    let config = RoleConfiguration::custom(RoleCounts::new(1, 2, 0, 1));
    let players = table(4, 0);
    let mut rng = StdRng::seed_from_u64(42);

    let report =
        assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);

    assert_eq!(report.assigned, 4);
    assert_eq!(report.roleless, 0);
    assert_eq!(dealt_counts(&players), RoleCounts::new(1, 2, 0, 1));
    assert_no_duplicate_cards(&players);
    assert_reveal_matches_leader(&players);
}

#[test]
fn test_hosts_never_receive_roles() {
    let service = service();
    let config = RoleConfiguration::default();
    let players = table(5, 2);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let report =
            assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);
        assert_eq!(report.hosts, 2);
        assert_eq!(report.assigned, 5);
        assert_hosts_roleless(&players);
        assert_eq!(dealt_counts(&players), RoleCounts::new(1, 2, 1, 1));
    }
}

#[test]
fn test_no_duplicates_across_many_seeds() {
    let service = service();
    let config = RoleConfiguration::default();
    for players_at_table in 1..=8 {
        for seed in 0..10 {
            let players = table(players_at_table, 1);
            let mut rng = StdRng::seed_from_u64(seed);
            assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);

            assert_no_duplicate_cards(&players);
            assert_hosts_roleless(&players);
            assert_reveal_matches_leader(&players);
            let dealt = dealt_counts(&players);
            assert_eq!(dealt.total(), players_at_table);
            assert_eq!(dealt.leader, 1);
        }
    }
}

#[test]
fn test_enabled_cards_restrict_the_deal() {
    let service = service();
    let mut config = RoleConfiguration::custom(RoleCounts::new(1, 2, 0, 0));
    config.role_types.leader.enabled_cards.insert("The Regent".into());
    config
        .role_types
        .guardian
        .enabled_cards
        .extend(["Oracle".to_string(), "Herald".to_string()]);
    let players = table(3, 0);
    let mut rng = StdRng::seed_from_u64(3);

    assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);

    let names: HashSet<String> = players
        .iter()
        .filter_map(|p| p.role().map(|card| card.name.clone()))
        .collect();
    let expected: HashSet<String> = ["The Regent", "Oracle", "Herald"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn test_short_table_still_seats_the_leader() {
    // Five roles configured for three players: dealing degrades rather than
    // failing, and the Leader is always among the cards handed out.
    let service = service();
    let config = RoleConfiguration::custom(RoleCounts::new(1, 2, 1, 1));
    let players = table(3, 0);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let report =
            assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);
        assert_eq!(report.assigned, 3);
        let dealt = dealt_counts(&players);
        assert_eq!(dealt.leader, 1);
        assert_eq!(dealt.guardian, 2);
    }
}

#[test]
fn test_surplus_players_stay_roleless() {
    let service = service();
    let config = RoleConfiguration::custom(RoleCounts::new(1, 1, 0, 0));
    let players = table(4, 0);
    let mut rng = StdRng::seed_from_u64(9);

    let report =
        assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);

    assert_eq!(report.assigned, 2);
    assert_eq!(report.roleless, 2);
    let roleless = players.iter().filter(|p| p.role().is_none()).count();
    assert_eq!(roleless, 2);
}

#[test]
fn test_leaderless_custom_deal() {
    let service = service();
    let config = RoleConfiguration::custom(RoleCounts::new(0, 2, 0, 1)).leaderless(true);
    let players = table(3, 0);
    let mut rng = StdRng::seed_from_u64(11);

    assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);

    assert_eq!(dealt_counts(&players), RoleCounts::new(0, 2, 0, 1));
    assert!(players.iter().all(|p| !p.read().role_revealed));
}

#[test]
fn test_redeal_clears_previous_roles() {
    let service = service();
    let players = table(4, 0);
    let mut rng = StdRng::seed_from_u64(5);

    let full = RoleConfiguration::custom(RoleCounts::new(1, 1, 1, 1));
    assign_roles_with_config(&players, service.card_pool(), &full, &service, &mut rng);
    assert_eq!(dealt_counts(&players).total(), 4);

    let smaller = RoleConfiguration::custom(RoleCounts::new(1, 1, 0, 0));
    assign_roles_with_config(&players, service.card_pool(), &smaller, &service, &mut rng);
    assert_eq!(dealt_counts(&players), RoleCounts::new(1, 1, 0, 0));
}

// =========================================================================
// Randomized modes
// =========================================================================

#[test]
fn test_hidden_distribution_draws_a_preset() {
    let service = service();
    let config = RoleConfiguration {
        hide_role_distribution: true,
        ..RoleConfiguration::default()
    };

    let mut seen = BTreeMap::new();
    for seed in 0..40 {
        let players = table(6, 1);
        let mut rng = StdRng::seed_from_u64(seed);
        let report =
            assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);

        assert_eq!(report.assigned, 6);
        assert_eq!(report.distribution.total(), 6);
        assert_eq!(report.distribution.leader, 1);
        assert_no_duplicate_cards(&players);
        assert_hosts_roleless(&players);
        *seen.entry(format!("{:?}", report.distribution)).or_insert(0) += 1;
    }
    // standard, balanced and chaos all differ at six players.
    assert!(seen.len() > 1, "hidden mode always drew the same preset");
}

#[test]
fn test_fully_random_roles_ignore_configured_counts() {
    let service = service();
    let config = RoleConfiguration {
        fully_random_roles: true,
        ..RoleConfiguration::custom(RoleCounts::new(0, 0, 0, 7))
    };

    for seed in 0..30 {
        let players = table(7, 1);
        let mut rng = StdRng::seed_from_u64(seed);
        let report =
            assign_roles_with_config(&players, service.card_pool(), &config, &service, &mut rng);

        assert_eq!(report.assigned, 7);
        let dealt = dealt_counts(&players);
        assert_eq!(dealt.leader, 1);
        assert!(dealt.traitor <= 2, "only two traitor cards exist");
        assert_no_duplicate_cards(&players);
        assert_reveal_matches_leader(&players);
    }
}

// =========================================================================
// Built-in table
// =========================================================================

#[test]
fn test_builtin_table_deals_every_player() {
    let pool = themed_pool();
    for n in 1..=8 {
        let players = table(n, 1);
        let mut rng = StdRng::seed_from_u64(n as u64);
        let report = assign_roles_builtin(&players, &pool, &mut rng);
        assert_eq!(report.assigned, n);
        assert_eq!(dealt_counts(&players).leader, 1);
        assert_hosts_roleless(&players);
    }
}

#[test]
fn test_builtin_strategy_through_generic_deal() {
    let pool = themed_pool();
    let players = table(5, 0);
    let mut rng = StdRng::seed_from_u64(77);

    let report = deal(&players, &pool, &BuiltinTableStrategy::default(), &mut rng);

    assert_eq!(report.distribution, RoleCounts::new(1, 2, 1, 1));
    assert_eq!(dealt_counts(&players), RoleCounts::new(1, 2, 1, 1));
}

#[test]
fn test_empty_table_deals_nothing() {
    let service = service();
    let players = table(0, 2);
    let mut rng = StdRng::seed_from_u64(0);
    let report = assign_roles_with_config(
        &players,
        service.card_pool(),
        &RoleConfiguration::default(),
        &service,
        &mut rng,
    );
    assert_eq!(report.assigned, 0);
    assert_eq!(report.hosts, 2);
}

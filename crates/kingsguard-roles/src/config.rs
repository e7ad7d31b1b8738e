//! Per-room role configuration.

use std::collections::BTreeSet;
use std::sync::Arc;

use kingsguard_types::{Card, CardPool, RoleType};
use serde::{Deserialize, Serialize};

use crate::RoleConfigError;

/// The preset name that marks a hand-built configuration.
pub const CUSTOM_PRESET: &str = "custom";

// ---------------------------------------------------------------------------
// RoleCounts
// ---------------------------------------------------------------------------

/// How many players get each role type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleCounts {
    pub leader: usize,
    pub guardian: usize,
    pub assassin: usize,
    pub traitor: usize,
}

impl RoleCounts {
    pub const fn new(leader: usize, guardian: usize, assassin: usize, traitor: usize) -> Self {
        Self {
            leader,
            guardian,
            assassin,
            traitor,
        }
    }

    pub fn get(&self, role_type: RoleType) -> usize {
        match role_type {
            RoleType::Leader => self.leader,
            RoleType::Guardian => self.guardian,
            RoleType::Assassin => self.assassin,
            RoleType::Traitor => self.traitor,
        }
    }

    pub fn set(&mut self, role_type: RoleType, count: usize) {
        match role_type {
            RoleType::Leader => self.leader = count,
            RoleType::Guardian => self.guardian = count,
            RoleType::Assassin => self.assassin = count,
            RoleType::Traitor => self.traitor = count,
        }
    }

    /// Sum over all role types.
    pub fn total(&self) -> usize {
        self.leader + self.guardian + self.assassin + self.traitor
    }
}

// ---------------------------------------------------------------------------
// RoleTypeConfig / RoleTypes
// ---------------------------------------------------------------------------

/// Settings for one role type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTypeConfig {
    /// Desired number of players with this role.
    #[serde(default)]
    pub count: usize,

    /// Card names eligible for dealing. Empty means every card of the type.
    #[serde(default)]
    pub enabled_cards: BTreeSet<String>,
}

impl RoleTypeConfig {
    /// A config with `count` copies and every card enabled.
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            enabled_cards: BTreeSet::new(),
        }
    }

    /// Returns `true` if the named card may be dealt.
    pub fn is_card_enabled(&self, name: &str) -> bool {
        self.enabled_cards.is_empty() || self.enabled_cards.contains(name)
    }

    /// The pool's cards of `role_type` that this config allows, in pool order.
    pub fn eligible_cards(&self, pool: &CardPool, role_type: RoleType) -> Vec<Arc<Card>> {
        pool.cards(role_type)
            .iter()
            .filter(|card| self.is_card_enabled(&card.name))
            .cloned()
            .collect()
    }
}

/// One [`RoleTypeConfig`] per role type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleTypes {
    pub leader: RoleTypeConfig,
    pub guardian: RoleTypeConfig,
    pub assassin: RoleTypeConfig,
    pub traitor: RoleTypeConfig,
}

impl RoleTypes {
    /// Every card enabled, counts taken from `counts`.
    pub fn from_counts(counts: RoleCounts) -> Self {
        Self {
            leader: RoleTypeConfig::with_count(counts.leader),
            guardian: RoleTypeConfig::with_count(counts.guardian),
            assassin: RoleTypeConfig::with_count(counts.assassin),
            traitor: RoleTypeConfig::with_count(counts.traitor),
        }
    }

    pub fn get(&self, role_type: RoleType) -> &RoleTypeConfig {
        match role_type {
            RoleType::Leader => &self.leader,
            RoleType::Guardian => &self.guardian,
            RoleType::Assassin => &self.assassin,
            RoleType::Traitor => &self.traitor,
        }
    }

    pub fn get_mut(&mut self, role_type: RoleType) -> &mut RoleTypeConfig {
        match role_type {
            RoleType::Leader => &mut self.leader,
            RoleType::Guardian => &mut self.guardian,
            RoleType::Assassin => &mut self.assassin,
            RoleType::Traitor => &mut self.traitor,
        }
    }

    /// Lookup by the role type's configuration name (e.g. `"guardian"`).
    ///
    /// # Errors
    /// [`RoleConfigError::UnknownRoleType`] for names that aren't a role.
    pub fn get_by_name(&self, name: &str) -> Result<&RoleTypeConfig, RoleConfigError> {
        Ok(self.get(parse_role_type(name)?))
    }

    /// Mutable lookup by configuration name.
    ///
    /// # Errors
    /// [`RoleConfigError::UnknownRoleType`] for names that aren't a role.
    pub fn get_by_name_mut(&mut self, name: &str) -> Result<&mut RoleTypeConfig, RoleConfigError> {
        Ok(self.get_mut(parse_role_type(name)?))
    }

    /// The configured counts, without card enablement.
    pub fn counts(&self) -> RoleCounts {
        RoleCounts::new(
            self.leader.count,
            self.guardian.count,
            self.assassin.count,
            self.traitor.count,
        )
    }

    /// Each role type with its config, in dealing order.
    pub fn iter(&self) -> impl Iterator<Item = (RoleType, &RoleTypeConfig)> {
        RoleType::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

fn parse_role_type(name: &str) -> Result<RoleType, RoleConfigError> {
    name.parse()
        .map_err(|_| RoleConfigError::UnknownRoleType(name.to_string()))
}

// ---------------------------------------------------------------------------
// RoleConfiguration
// ---------------------------------------------------------------------------

/// The role setup of a single room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfiguration {
    /// [`CUSTOM_PRESET`] or the name of a server preset.
    pub preset_name: String,

    pub min_players: usize,

    pub max_players: usize,

    /// Lets a game start with no Leader at all.
    #[serde(default)]
    pub allow_leaderless_game: bool,

    /// Pick a random preset at deal time and keep it secret.
    #[serde(default)]
    pub hide_role_distribution: bool,

    /// Ignore counts entirely and draw a weighted-random distribution.
    #[serde(default)]
    pub fully_random_roles: bool,

    #[serde(default)]
    pub role_types: RoleTypes,
}

impl RoleConfiguration {
    /// A custom configuration with every card enabled.
    ///
    /// `min_players` is 1 and `max_players` is the role total, so a room
    /// built from it fills up exactly when every role has a player.
    pub fn custom(counts: RoleCounts) -> Self {
        Self {
            preset_name: CUSTOM_PRESET.to_string(),
            min_players: 1,
            max_players: counts.total().max(1),
            allow_leaderless_game: false,
            hide_role_distribution: false,
            fully_random_roles: false,
            role_types: RoleTypes::from_counts(counts),
        }
    }

    /// Builder-style toggle for leaderless play.
    pub fn leaderless(mut self, allowed: bool) -> Self {
        self.allow_leaderless_game = allowed;
        self
    }

    pub fn is_custom(&self) -> bool {
        self.preset_name == CUSTOM_PRESET
    }

    /// Roles resolved at deal time rather than from the configured counts.
    pub fn is_randomized(&self) -> bool {
        self.hide_role_distribution || self.fully_random_roles
    }

    /// Sum of the configured counts.
    pub fn total_roles(&self) -> usize {
        self.role_types.counts().total()
    }
}

impl Default for RoleConfiguration {
    /// The four-player `standard` setup: one of each role.
    fn default() -> Self {
        Self {
            preset_name: "standard".to_string(),
            min_players: 1,
            max_players: 8,
            allow_leaderless_game: false,
            hide_role_distribution: false,
            fully_random_roles: false,
            role_types: RoleTypes::from_counts(RoleCounts::new(1, 1, 1, 1)),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerLimits
// ---------------------------------------------------------------------------

/// Server-wide bounds every room configuration must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLimits {
    pub min_players_per_room: usize,
    pub max_players_per_room: usize,
}

impl Default for ServerLimits {
    fn default() -> Self {
        Self {
            min_players_per_room: 1,
            max_players_per_room: 12,
        }
    }
}

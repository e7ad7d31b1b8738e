//! Error types for role configuration.

use kingsguard_types::RoleType;

/// Errors raised while validating or resolving a role configuration.
///
/// These are configuration-time failures: they reach whoever is editing a
/// room's setup, never a running game. Each message names the offending
/// field so a UI can point at it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleConfigError {
    /// The configuration names a preset the server doesn't have.
    #[error("preset_name: preset '{0}' not found")]
    PresetNotFound(String),

    /// A custom configuration asks for more roles than there are players.
    #[error("role_types: too many roles configured ({configured}) for {players} players")]
    TooManyRoles { configured: usize, players: usize },

    /// A preset cannot be resized to this player count without dropping
    /// a non-Guardian role.
    #[error("preset_name: preset '{preset}' cannot be scaled to {players} players")]
    CannotScale { preset: String, players: usize },

    /// More copies of a role requested than there are enabled cards.
    #[error(
        "role_types.{role_type}.count: {requested} requested but only {enabled} card(s) enabled"
    )]
    InsufficientCards {
        role_type: RoleType,
        requested: usize,
        enabled: usize,
    },

    /// An enabled card name doesn't exist for that role type.
    #[error("role_types.{role_type}.enabled_cards: no {role_type} card named '{card}'")]
    UnknownCard { role_type: RoleType, card: String },

    /// The leader slot holds more than one copy.
    #[error("role_types.leader.count: at most 1 leader allowed, got {0}")]
    MultipleLeaders(usize),

    /// No leader, and leaderless games are off.
    #[error("role_types.leader.count: a leader is required unless allow_leaderless_game is set")]
    LeaderRequired,

    /// `min_players` or `max_players` falls outside the server-wide bounds.
    #[error("{field}: {value} is outside the server bounds {min}..={max}")]
    PlayerBounds {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// `min_players` is larger than `max_players`.
    #[error("min_players: {min} exceeds max_players {max}")]
    MinAboveMax { min: usize, max: usize },

    /// A role type name in configuration data didn't match any role.
    #[error("role_types: unknown role type '{0}'")]
    UnknownRoleType(String),
}

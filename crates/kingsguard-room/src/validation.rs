//! The start-readiness snapshot.

use chrono::{DateTime, Utc};
use kingsguard_roles::{RoleConfigService, RoleConfiguration};
use serde::{Deserialize, Serialize};

use crate::RoomState;

pub(crate) const MSG_NOT_IN_LOBBY: &str = "Game is not in lobby state";
pub(crate) const MSG_NEED_PLAYERS: &str = "Need at least 1 player to start";
pub(crate) const MSG_LEADER_REQUIRED: &str = "Leader role is required (or enable leaderless games)";
pub(crate) const MSG_READY: &str = "Ready to start";

/// Whether a room can start right now, and why not.
///
/// Computed fresh on every call to
/// [`Room::get_validation_state`](crate::Room::get_validation_state) and
/// never cached. UIs match on `validation_message`, so its wording is part
/// of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
    pub can_start: bool,
    /// The configured roles don't match the table, but a preset can be
    /// resized to fit it.
    pub can_auto_scale: bool,
    pub validation_message: String,
    /// Sum of the configured role counts.
    pub configured_roles: usize,
    /// Strictly increasing per room, starting at 1.
    pub version: u64,
    /// Never earlier than the previous snapshot's timestamp.
    pub timestamp: DateTime<Utc>,
}

/// The verdict part of a snapshot, before version and timestamp are stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Verdict {
    pub can_start: bool,
    pub can_auto_scale: bool,
    pub message: String,
}

impl Verdict {
    fn ready() -> Self {
        Self {
            can_start: true,
            can_auto_scale: false,
            message: MSG_READY.to_string(),
        }
    }

    fn no(message: impl Into<String>) -> Self {
        Self {
            can_start: false,
            can_auto_scale: false,
            message: message.into(),
        }
    }
}

/// Applies the start checks in order; the first failure wins.
pub(crate) fn evaluate(
    state: RoomState,
    active_players: usize,
    config: &RoleConfiguration,
    service: &RoleConfigService,
) -> Verdict {
    if !state.is_lobby() {
        return Verdict::no(MSG_NOT_IN_LOBBY);
    }
    if active_players < 1 {
        return Verdict::no(MSG_NEED_PLAYERS);
    }
    if config.is_randomized() {
        return Verdict::ready();
    }
    if config.role_types.leader.count == 0 && !config.allow_leaderless_game {
        return Verdict::no(MSG_LEADER_REQUIRED);
    }

    let configured = config.total_roles();
    if configured == active_players {
        return Verdict::ready();
    }
    if configured > active_players {
        return Verdict::no(format!(
            "Too many roles configured ({configured}) for {active_players} players"
        ));
    }
    if config.is_custom() {
        return Verdict::no(format!(
            "Not enough roles configured ({configured}) for {active_players} players"
        ));
    }

    let (scalable, message) = service.can_auto_scale(config, active_players);
    Verdict {
        can_start: scalable,
        can_auto_scale: scalable,
        message,
    }
}

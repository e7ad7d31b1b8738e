//! Where a room is in its life: gathering, reading cards, playing, done.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a [`Room`](crate::Room).
///
/// A room only ever moves one phase forward, in this order:
/// `Lobby`, `Countdown`, `Playing`, `Ended`. Joins and role setup changes
/// belong to the lobby; cards are dealt on the way into the countdown.
/// Whoever orchestrates the game requests each step and the room refuses
/// any step that isn't [`next`](Self::next).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomState {
    Lobby,
    /// Cards are dealt and players are reading them.
    Countdown,
    Playing,
    /// Terminal.
    Ended,
}

impl RoomState {
    /// Players can join and the role setup is still editable.
    pub fn is_lobby(&self) -> bool {
        *self == Self::Lobby
    }

    /// Roles are in play: counting down or playing.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Countdown | Self::Playing)
    }

    /// The single phase reachable from this one. `None` once ended.
    pub fn next(self) -> Option<Self> {
        let following = match self {
            Self::Lobby => Self::Countdown,
            Self::Countdown => Self::Playing,
            Self::Playing => Self::Ended,
            Self::Ended => return None,
        };
        Some(following)
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next().is_some_and(|next| next == target)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lobby => "Lobby",
            Self::Countdown => "Countdown",
            Self::Playing => "Playing",
            Self::Ended => "Ended",
        }
    }
}

impl fmt::Display for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

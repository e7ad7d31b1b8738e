//! Error types for the room layer.

use kingsguard_roles::RoleConfigError;
use kingsguard_types::RoomCode;

use crate::RoomState;

/// Errors that can occur during room operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// Every non-host seat is taken.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The requested lifecycle step skips a state or goes backwards.
    #[error("cannot move room from {from} to {to}")]
    InvalidTransition { from: RoomState, to: RoomState },

    /// The operation is only allowed while the room is in the lobby.
    #[error("room is in {0}, not Lobby")]
    NotInLobby(RoomState),

    /// The start checks failed when roles were about to be dealt. Carries
    /// the same message [`ValidationState`](crate::ValidationState) reports.
    #[error("room is not ready to start: {0}")]
    NotReady(String),

    /// The room's role configuration was rejected.
    #[error(transparent)]
    Config(#[from] RoleConfigError),
}

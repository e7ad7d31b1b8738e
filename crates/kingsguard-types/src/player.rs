//! Players and the identity types around them.

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};

use crate::Card;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player. Issued by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The short join code of a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for RoomCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A person in a room.
///
/// Hosts run the table: they see everything, never receive a role and never
/// take up a player slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Stable identity.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Lets a dropped client reclaim this seat.
    pub session_id: String,

    /// Observer flag.
    pub is_host: bool,

    /// The dealt card, shared with the card pool.
    pub role: Option<Arc<Card>>,

    /// Set once a Leader card is dealt. Never cleared.
    pub role_revealed: bool,
}

impl Player {
    /// Creates a regular (non-host) player with no role.
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            session_id: session_id.into(),
            is_host: false,
            role: None,
            role_revealed: false,
        }
    }

    /// Creates a host.
    pub fn host(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            is_host: true,
            ..Self::new(id, name, session_id)
        }
    }

    /// Gives this player a card. Leader cards are revealed immediately.
    pub fn assign_card(&mut self, card: Arc<Card>) {
        if card.role_type.is_revealed() {
            self.role_revealed = true;
        }
        self.role = Some(card);
    }

    /// Returns `true` if this player has been dealt a card.
    pub fn has_role(&self) -> bool {
        self.role.is_some()
    }
}

// ---------------------------------------------------------------------------
// PlayerHandle
// ---------------------------------------------------------------------------

/// A shared, live reference to a [`Player`].
///
/// Rooms hand these out instead of copies so a UI layer holding a handle sees
/// role assignments as they happen. Writing through a handle writes the
/// room's own record. Cloning a handle is cheap and yields the same player.
#[derive(Debug, Clone)]
pub struct PlayerHandle(Arc<RwLock<Player>>);

impl PlayerHandle {
    /// Wraps a player in a new handle.
    pub fn new(player: Player) -> Self {
        Self(Arc::new(RwLock::new(player)))
    }

    /// Shared access to the player.
    pub fn read(&self) -> RwLockReadGuard<'_, Player> {
        self.0.read()
    }

    /// Exclusive access to the player.
    pub fn write(&self) -> RwLockWriteGuard<'_, Player> {
        self.0.write()
    }

    /// The player's id (cloned out under a short read lock).
    pub fn id(&self) -> PlayerId {
        self.0.read().id.clone()
    }

    /// Shorthand for `self.read().is_host`.
    pub fn is_host(&self) -> bool {
        self.0.read().is_host
    }

    /// The dealt card, if any.
    pub fn role(&self) -> Option<Arc<Card>> {
        self.0.read().role.clone()
    }

    /// Returns `true` if both handles point at the same player record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Player> for PlayerHandle {
    fn from(player: Player) -> Self {
        Self::new(player)
    }
}

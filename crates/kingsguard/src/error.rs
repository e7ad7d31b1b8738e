//! Unified error type for Kingsguard.

use kingsguard_roles::RoleConfigError;
use kingsguard_room::RoomError;
use kingsguard_types::CardPoolError;

/// Top-level error that wraps every crate-specific error.
///
/// The `#[from]` attribute on each variant generates the `From` impls, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum KingsguardError {
    /// The card pool couldn't be built (duplicate names, bad role type).
    #[error(transparent)]
    CardPool(#[from] CardPoolError),

    /// A role configuration was rejected or couldn't be resolved.
    #[error(transparent)]
    RoleConfig(#[from] RoleConfigError),

    /// A room operation failed (full, wrong state).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Server settings couldn't be parsed.
    #[error("invalid server settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Start validation refused. Carries the validation message.
    #[error("room is not ready to start: {0}")]
    NotReady(String),
}

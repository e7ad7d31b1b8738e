//! # Kingsguard
//!
//! Rooms and hidden-role dealing for social-deduction party games.
//!
//! Players gather in a [`Room`], a host picks a role setup, and when the
//! table is ready the server deals each player a secret card: one Leader,
//! whose identity is public, and a mix of Guardians, Assassins and Traitors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use kingsguard::prelude::*;
//!
//! # async fn run(pool: CardPool) -> Result<(), KingsguardError> {
//! let settings = ServerSettings::default();
//! let service = Arc::new(settings.role_service(Arc::new(pool)));
//! let starter = GameStarter::from_settings(&settings, Arc::clone(&service));
//!
//! let room = Room::new("KING", 4, RoleConfiguration::default());
//! room.add_player(Player::new("p1", "Ann", "session-1"))?;
//! // ...more players...
//! starter.start(&room).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod settings;
mod starter;

pub use error::KingsguardError;
pub use settings::ServerSettings;
pub use starter::GameStarter;

pub use kingsguard_roles as roles;
pub use kingsguard_room as room;
pub use kingsguard_types as types;

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info` when `RUST_LOG` is unset or invalid. Calling this
/// more than once is harmless; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Everything needed to run rooms, in one import.
pub mod prelude {
    pub use crate::{GameStarter, KingsguardError, ServerSettings, init_tracing};

    pub use kingsguard_roles::{
        DealReport, Preset, RoleConfigError, RoleConfigService, RoleConfiguration, RoleCounts,
        ServerLimits, assign_roles_with_config, builtin_presets,
    };
    pub use kingsguard_room::{Room, RoomError, RoomInfo, RoomState, ValidationState};
    pub use kingsguard_types::{
        Card, CardPool, CardPoolError, Player, PlayerHandle, PlayerId, RoleType, RoomCode,
    };
}

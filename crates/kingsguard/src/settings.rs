//! Server-wide settings.

use std::sync::Arc;
use std::time::Duration;

use kingsguard_roles::{Preset, RoleConfigService, ServerLimits, builtin_presets};
use kingsguard_types::CardPool;
use serde::{Deserialize, Serialize};

use crate::KingsguardError;

/// Settings shared by every room on a server.
///
/// Every field has a default, so a settings document only needs the keys it
/// changes:
///
/// ```json
/// { "max_players_per_room": 10, "countdown_secs": 3 }
/// ```
///
/// Supplying `presets` replaces the built-in set entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub min_players_per_room: usize,
    pub max_players_per_room: usize,
    /// How long players read their cards before play begins.
    pub countdown_secs: u32,
    pub presets: Vec<Preset>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        let limits = ServerLimits::default();
        Self {
            min_players_per_room: limits.min_players_per_room,
            max_players_per_room: limits.max_players_per_room,
            countdown_secs: 5,
            presets: builtin_presets(),
        }
    }
}

impl ServerSettings {
    /// Parses settings from JSON.
    ///
    /// # Errors
    /// [`KingsguardError::Settings`] on malformed JSON or wrong field types.
    pub fn from_json_str(json: &str) -> Result<Self, KingsguardError> {
        let settings: Self = serde_json::from_str(json)?;
        tracing::debug!(
            min = settings.min_players_per_room,
            max = settings.max_players_per_room,
            presets = settings.presets.len(),
            "loaded server settings"
        );
        Ok(settings)
    }

    pub fn limits(&self) -> ServerLimits {
        ServerLimits {
            min_players_per_room: self.min_players_per_room,
            max_players_per_room: self.max_players_per_room,
        }
    }

    pub fn countdown(&self) -> Duration {
        Duration::from_secs(u64::from(self.countdown_secs))
    }

    /// Builds the role engine for this server's presets and `pool`.
    pub fn role_service(&self, pool: Arc<CardPool>) -> RoleConfigService {
        RoleConfigService::new(self.limits(), self.presets.iter().cloned(), pool)
    }
}

//! The role distribution engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use kingsguard_types::{CardPool, RoleType};

use crate::{
    Preset, RoleConfigError, RoleConfiguration, RoleCounts, RoleTypes, ScaleAdjustment,
    ServerLimits,
};

/// Resolves role configurations into concrete per-role counts.
///
/// One service is built at startup from the server limits, the preset set
/// and the card pool, then shared (behind `Arc`) by every room. It holds no
/// mutable state, so it needs no locking.
#[derive(Debug, Clone)]
pub struct RoleConfigService {
    limits: ServerLimits,
    presets: BTreeMap<String, Preset>,
    pool: Arc<CardPool>,
}

impl RoleConfigService {
    /// Creates a service. Later presets replace earlier ones with the same name.
    pub fn new(
        limits: ServerLimits,
        presets: impl IntoIterator<Item = Preset>,
        pool: Arc<CardPool>,
    ) -> Self {
        let presets = presets
            .into_iter()
            .map(|preset| (preset.name.clone(), preset))
            .collect();
        Self {
            limits,
            presets,
            pool,
        }
    }

    pub fn limits(&self) -> ServerLimits {
        self.limits
    }

    pub fn card_pool(&self) -> &Arc<CardPool> {
        &self.pool
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    /// Preset names in alphabetical order.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Per-role counts for a table of `players`.
    ///
    /// Custom configurations return their counts unchanged (fewer roles than
    /// players is allowed here; the room decides whether that may start).
    /// Preset configurations are scaled with [`Preset::scale_to`].
    ///
    /// # Errors
    /// - [`RoleConfigError::TooManyRoles`]: custom counts exceed `players`
    /// - [`RoleConfigError::PresetNotFound`]: unknown preset name
    /// - [`RoleConfigError::CannotScale`]: preset can't shrink that far
    pub fn get_distribution_for_player_count(
        &self,
        config: &RoleConfiguration,
        players: usize,
    ) -> Result<RoleCounts, RoleConfigError> {
        if config.is_custom() {
            let counts = config.role_types.counts();
            if counts.total() > players {
                return Err(RoleConfigError::TooManyRoles {
                    configured: counts.total(),
                    players,
                });
            }
            return Ok(counts);
        }

        let preset = self.lookup(&config.preset_name)?;
        let scaled = preset.scale_to(players, config.allow_leaderless_game)?;
        tracing::debug!(
            preset = %preset.name,
            players,
            source_players = scaled.source_players,
            adjustment = ?scaled.adjustment,
            "resolved preset distribution"
        );
        Ok(scaled.counts)
    }

    /// Whether a preset configuration can be fitted to `target_players`,
    /// with a message explaining how.
    ///
    /// Never fails; the `bool` carries the answer and the message is meant
    /// for display.
    pub fn can_auto_scale(
        &self,
        config: &RoleConfiguration,
        target_players: usize,
    ) -> (bool, String) {
        if config.is_custom() {
            return (
                false,
                "Custom configurations do not support auto-scaling".to_string(),
            );
        }

        let Some(preset) = self.presets.get(&config.preset_name) else {
            return (
                false,
                format!("Preset '{}' not found", config.preset_name),
            );
        };

        match preset.scale_to(target_players, config.allow_leaderless_game) {
            Ok(scaled) => {
                let message = match scaled.adjustment {
                    ScaleAdjustment::AddedGuardians(added) => format!(
                        "Can scale to {target_players} players by adding {added} guardian role(s) to {}-player {} preset",
                        scaled.source_players, preset.name
                    ),
                    ScaleAdjustment::RemovedGuardians(removed) => format!(
                        "Can scale to {target_players} players by removing {removed} guardian role(s) from {}-player {} preset",
                        scaled.source_players, preset.name
                    ),
                    ScaleAdjustment::Exact if scaled.source_players == target_players => format!(
                        "Preset '{}' has an exact distribution for {target_players} players",
                        preset.name
                    ),
                    ScaleAdjustment::Exact => format!(
                        "Can scale to {target_players} players using {}-player {} preset",
                        scaled.source_players, preset.name
                    ),
                };
                (true, message)
            }
            Err(_) => (
                false,
                format!(
                    "Cannot scale {} preset to {target_players} players",
                    preset.name
                ),
            ),
        }
    }

    /// Checks a configuration against the card pool and server limits.
    ///
    /// Count checks are skipped for randomized configurations, whose counts
    /// are decided at deal time. Those still need at least one dealable
    /// Leader card unless leaderless play is allowed.
    ///
    /// # Errors
    /// The first violation found, as a field-naming [`RoleConfigError`].
    pub fn validate_configuration(&self, config: &RoleConfiguration) -> Result<(), RoleConfigError> {
        if !config.is_custom() {
            self.lookup(&config.preset_name)?;
        }

        for (role_type, type_config) in config.role_types.iter() {
            if let Some(card) = type_config
                .enabled_cards
                .iter()
                .find(|name| !self.pool.contains(role_type, name))
            {
                return Err(RoleConfigError::UnknownCard {
                    role_type,
                    card: card.clone(),
                });
            }
        }

        if !config.is_randomized() {
            let leaders = config.role_types.leader.count;
            if leaders > 1 {
                return Err(RoleConfigError::MultipleLeaders(leaders));
            }
            if leaders == 0 && !config.allow_leaderless_game {
                return Err(RoleConfigError::LeaderRequired);
            }

            for (role_type, type_config) in config.role_types.iter() {
                let enabled = type_config.eligible_cards(&self.pool, role_type).len();
                if type_config.count > enabled {
                    return Err(RoleConfigError::InsufficientCards {
                        role_type,
                        requested: type_config.count,
                        enabled,
                    });
                }
            }
        } else if !config.allow_leaderless_game
            && self.enabled_card_count(config, RoleType::Leader) == 0
        {
            return Err(RoleConfigError::LeaderRequired);
        }

        self.check_bounds("min_players", config.min_players)?;
        self.check_bounds("max_players", config.max_players)?;
        if config.min_players > config.max_players {
            return Err(RoleConfigError::MinAboveMax {
                min: config.min_players,
                max: config.max_players,
            });
        }

        Ok(())
    }

    /// A configuration seeded from a preset's distribution for `players`.
    ///
    /// The player bounds cover the preset's defined range and `players`
    /// itself, clamped to the server limits.
    ///
    /// # Errors
    /// [`RoleConfigError::PresetNotFound`] or [`RoleConfigError::CannotScale`].
    pub fn create_from_preset(
        &self,
        preset_name: &str,
        players: usize,
    ) -> Result<RoleConfiguration, RoleConfigError> {
        let preset = self.lookup(preset_name)?;
        let scaled = preset.scale_to(players, false)?;

        let (low, high) = preset.player_range().unwrap_or((players, players));
        let clamp = |value: usize| {
            value.clamp(
                self.limits.min_players_per_room,
                self.limits.max_players_per_room,
            )
        };

        Ok(RoleConfiguration {
            preset_name: preset.name.clone(),
            min_players: clamp(low.min(players)),
            max_players: clamp(high.max(players)),
            allow_leaderless_game: false,
            hide_role_distribution: false,
            fully_random_roles: false,
            role_types: RoleTypes::from_counts(scaled.counts),
        })
    }

    /// A custom configuration whose bounds respect the server limits.
    pub fn custom_configuration(&self, counts: RoleCounts) -> RoleConfiguration {
        let mut config = RoleConfiguration::custom(counts);
        config.min_players = config
            .min_players
            .max(self.limits.min_players_per_room);
        config.max_players = config
            .max_players
            .clamp(config.min_players, self.limits.max_players_per_room.max(config.min_players));
        config
    }

    /// How many cards of `role_type` a configuration can actually deal.
    pub fn enabled_card_count(&self, config: &RoleConfiguration, role_type: RoleType) -> usize {
        config
            .role_types
            .get(role_type)
            .eligible_cards(&self.pool, role_type)
            .len()
    }

    fn lookup(&self, name: &str) -> Result<&Preset, RoleConfigError> {
        self.presets
            .get(name)
            .ok_or_else(|| RoleConfigError::PresetNotFound(name.to_string()))
    }

    fn check_bounds(&self, field: &'static str, value: usize) -> Result<(), RoleConfigError> {
        let ServerLimits {
            min_players_per_room: min,
            max_players_per_room: max,
        } = self.limits;
        if value < min || value > max {
            return Err(RoleConfigError::PlayerBounds {
                field,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

//! Named presets and the scaling rules that fit them to any table size.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{RoleConfigError, RoleCounts};

// ---------------------------------------------------------------------------
// Preset
// ---------------------------------------------------------------------------

/// A server-defined mapping from player count to role counts.
///
/// In JSON the distribution keys are player counts:
///
/// ```json
/// { "name": "tiny", "distributions": { "3": { "leader": 1, "guardian": 1, "traitor": 1 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub distributions: BTreeMap<usize, RoleCounts>,
}

/// How a preset entry was resized to hit the requested player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAdjustment {
    /// The entry already summed to the requested count.
    Exact,
    /// This many Guardians were added.
    AddedGuardians(usize),
    /// This many Guardians were removed.
    RemovedGuardians(usize),
}

/// The result of fitting a preset to a player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledDistribution {
    /// Player count of the preset entry that was used as the base.
    pub source_players: usize,
    /// Final counts. Sums to the requested player count.
    pub counts: RoleCounts,
    pub adjustment: ScaleAdjustment,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        distributions: impl IntoIterator<Item = (usize, RoleCounts)>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            distributions: distributions.into_iter().collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The entry for exactly `players`, if the preset has one.
    pub fn exact(&self, players: usize) -> Option<&RoleCounts> {
        self.distributions.get(&players)
    }

    /// The entry whose player count is closest to `players`.
    ///
    /// On a tie the smaller player count wins.
    pub fn nearest(&self, players: usize) -> Option<(usize, &RoleCounts)> {
        let mut best: Option<(usize, &RoleCounts)> = None;
        // BTreeMap iterates ascending, so keeping the first strict minimum
        // resolves ties toward the smaller key.
        for (&key, counts) in &self.distributions {
            let better = match best {
                Some((best_key, _)) => key.abs_diff(players) < best_key.abs_diff(players),
                None => true,
            };
            if better {
                best = Some((key, counts));
            }
        }
        best
    }

    /// Smallest and largest player counts the preset defines.
    pub fn player_range(&self) -> Option<(usize, usize)> {
        let min = self.distributions.keys().next()?;
        let max = self.distributions.keys().next_back()?;
        Some((*min, *max))
    }

    /// Fits the preset to `players`.
    ///
    /// Starts from the exact or nearest entry, injects a Leader when the
    /// entry has none and leaderless play is off, then puts any shortfall on
    /// Guardian or takes any excess off Guardian (never below one).
    ///
    /// # Errors
    /// [`RoleConfigError::CannotScale`] if the preset is empty or the excess
    /// is larger than the Guardians available to remove.
    pub fn scale_to(
        &self,
        players: usize,
        allow_leaderless: bool,
    ) -> Result<ScaledDistribution, RoleConfigError> {
        let cannot_scale = || RoleConfigError::CannotScale {
            preset: self.name.clone(),
            players,
        };

        let (source_players, base) = match self.exact(players) {
            Some(counts) => (players, *counts),
            None => self
                .nearest(players)
                .map(|(key, counts)| (key, *counts))
                .ok_or_else(cannot_scale)?,
        };

        let mut counts = base;
        if counts.leader > 1 {
            counts.guardian += counts.leader - 1;
            counts.leader = 1;
        }
        if counts.leader == 0 && !allow_leaderless {
            counts.leader = 1;
        }

        let total = counts.total();
        let adjustment = if total < players {
            let added = players - total;
            counts.guardian += added;
            ScaleAdjustment::AddedGuardians(added)
        } else if total > players {
            let excess = total - players;
            let removable = counts.guardian.saturating_sub(1);
            if excess > removable {
                return Err(cannot_scale());
            }
            counts.guardian -= excess;
            ScaleAdjustment::RemovedGuardians(excess)
        } else {
            ScaleAdjustment::Exact
        };

        Ok(ScaledDistribution {
            source_players,
            counts,
            adjustment,
        })
    }

    /// One Leader, and one of every other role as the table grows.
    pub fn standard() -> Self {
        Self::new(
            "standard",
            [
                (1, RoleCounts::new(1, 0, 0, 0)),
                (2, RoleCounts::new(1, 1, 0, 0)),
                (3, RoleCounts::new(1, 1, 0, 1)),
                (4, RoleCounts::new(1, 1, 1, 1)),
                (5, RoleCounts::new(1, 2, 1, 1)),
                (6, RoleCounts::new(1, 2, 2, 1)),
                (7, RoleCounts::new(1, 3, 2, 1)),
                (8, RoleCounts::new(1, 3, 2, 2)),
            ],
        )
        .with_description("The baseline table for 1 to 8 players.")
    }

    /// Heavier on Traitors.
    pub fn balanced() -> Self {
        Self::new(
            "balanced",
            [
                (4, RoleCounts::new(1, 1, 1, 1)),
                (6, RoleCounts::new(1, 2, 1, 2)),
                (8, RoleCounts::new(1, 3, 2, 2)),
            ],
        )
        .with_description("Even odds between the Leader's side and everyone else.")
    }

    /// Heavier on Assassins.
    pub fn chaos() -> Self {
        Self::new(
            "chaos",
            [
                (4, RoleCounts::new(1, 0, 2, 1)),
                (6, RoleCounts::new(1, 1, 2, 2)),
                (8, RoleCounts::new(1, 2, 3, 2)),
            ],
        )
        .with_description("Few friends, many knives.")
    }
}

/// The presets shipped with the server.
pub fn builtin_presets() -> Vec<Preset> {
    vec![Preset::standard(), Preset::balanced(), Preset::chaos()]
}

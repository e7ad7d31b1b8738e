//! Role distribution for Kingsguard.
//!
//! Two questions live here:
//!
//! 1. **How many of each role?** [`RoleConfigService`] turns a room's
//!    [`RoleConfiguration`] and a player count into exact [`RoleCounts`],
//!    either straight from a custom configuration or by scaling a named
//!    [`Preset`] to fit.
//! 2. **Who gets which card?** [`assign_roles_with_config`] (and the
//!    [`AssignmentStrategy`] trait behind it) shuffles the table and deals
//!    concrete cards from the [`CardPool`](kingsguard_types::CardPool).
//!
//! Everything here is synchronous, in-memory and takes its random source as
//! a parameter, so tests can pass a seeded RNG.

mod config;
mod dealer;
mod error;
mod preset;
mod service;

pub use config::{
    CUSTOM_PRESET, RoleConfiguration, RoleCounts, RoleTypeConfig, RoleTypes, ServerLimits,
};
pub use dealer::{
    AssignmentStrategy, BuiltinTableStrategy, ConfiguredStrategy, DealReport,
    HIDDEN_PRESET_CANDIDATES, assign_roles_builtin, assign_roles_with_config, deal,
    minimal_split, weighted_random_distribution,
};
pub use error::RoleConfigError;
pub use preset::{Preset, ScaleAdjustment, ScaledDistribution, builtin_presets};
pub use service::RoleConfigService;

//! Core data types for Kingsguard.
//!
//! This crate is the leaf of the workspace. It knows nothing about rooms
//! or how roles get distributed; it only describes the things those layers
//! move around:
//!
//! - **Role types** ([`RoleType`]): the four hidden roles, in dealing order.
//! - **Cards** ([`Card`], [`CardPool`]): the themed role cards players receive.
//! - **Players** ([`Player`], [`PlayerHandle`]): who is sitting at the table.
//!
//! # Architecture
//!
//! ```text
//! Room (kingsguard-room) → Roles (kingsguard-roles) → Types (this crate)
//! ```

mod card;
mod error;
mod player;
mod role;

pub use card::{Card, CardPool};
pub use error::CardPoolError;
pub use player::{Player, PlayerHandle, PlayerId, RoomCode};
pub use role::RoleType;

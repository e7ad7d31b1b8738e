//! Room membership and lifecycle for Kingsguard.
//!
//! A [`Room`] is the unit of concurrency: every room guards its own state
//! with one reader/writer lock, and rooms never lock each other.
//!
//! # Key types
//!
//! - [`Room`]: players, lifecycle state and role configuration
//! - [`RoomState`]: `Lobby → Countdown → Playing → Ended`
//! - [`ValidationState`]: the versioned "can we start?" snapshot a UI polls
//! - [`RoomError`]: what room operations can fail with

mod error;
mod room;
mod state;
mod validation;

pub use error::RoomError;
pub use room::{Room, RoomInfo};
pub use state::RoomState;
pub use validation::ValidationState;

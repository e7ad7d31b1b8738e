//! Game start orchestration: validate, deal, count down, play.

use std::sync::Arc;
use std::time::Duration;

use kingsguard_roles::{DealReport, RoleConfigService};
use kingsguard_room::{Room, RoomError, RoomState};

use crate::{KingsguardError, ServerSettings};

/// Drives rooms from the lobby into play.
///
/// Cheap to clone; clones share the role engine, so a starter can be moved
/// into a spawned task per room.
#[derive(Debug, Clone)]
pub struct GameStarter {
    service: Arc<RoleConfigService>,
    countdown: Duration,
}

impl GameStarter {
    pub fn new(service: Arc<RoleConfigService>, countdown: Duration) -> Self {
        Self { service, countdown }
    }

    /// A starter using the settings' countdown.
    pub fn from_settings(settings: &ServerSettings, service: Arc<RoleConfigService>) -> Self {
        Self::new(service, settings.countdown())
    }

    pub fn service(&self) -> &Arc<RoleConfigService> {
        &self.service
    }

    pub fn countdown(&self) -> Duration {
        self.countdown
    }

    /// Starts a game in `room`.
    ///
    /// Runs the room's start validation, deals roles and enters
    /// [`RoomState::Countdown`], waits out the countdown, then moves to
    /// [`RoomState::Playing`]. Returns once play has begun.
    ///
    /// # Errors
    /// - [`KingsguardError::NotReady`] if validation refuses the start, either
    ///   up front or when the room re-checks the table at deal time
    /// - [`KingsguardError::Room`] if the room left the lobby or was moved
    ///   on by someone else during the countdown
    pub async fn start(&self, room: &Room) -> Result<DealReport, KingsguardError> {
        let validation = room.get_validation_state(&self.service);
        if !validation.can_start {
            tracing::info!(
                room = %room.code(),
                version = validation.version,
                reason = %validation.validation_message,
                "start refused"
            );
            return Err(KingsguardError::NotReady(validation.validation_message));
        }

        // ThreadRng is !Send; keep it out of the await below.
        let report = {
            let mut rng = rand::rng();
            room.begin_countdown(&self.service, &mut rng, self.countdown_secs())
                .map_err(|err| match err {
                    RoomError::NotReady(message) => KingsguardError::NotReady(message),
                    other => other.into(),
                })?
        };

        tokio::time::sleep(self.countdown).await;

        room.transition_to(RoomState::Playing)?;
        tracing::info!(room = %room.code(), players = report.assigned, "game started");
        Ok(report)
    }

    /// Ends a running game.
    ///
    /// # Errors
    /// [`KingsguardError::Room`] unless the room is playing.
    pub fn finish(&self, room: &Room) -> Result<(), KingsguardError> {
        room.transition_to(RoomState::Ended)?;
        tracing::info!(room = %room.code(), "game ended");
        Ok(())
    }

    fn countdown_secs(&self) -> u32 {
        u32::try_from(self.countdown.as_secs()).unwrap_or(u32::MAX)
    }
}

//! The room aggregate: membership, lifecycle and role setup behind one lock.
//!
//! Each room owns a single `RwLock`. Queries take the read side; anything
//! that changes the room (joins, leaves, transitions, dealing and even
//! validation, which bumps a version counter) takes the write side.
//! Player records have their own locks and are always locked after the
//! room, never before.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use kingsguard_roles::{DealReport, RoleConfigService, RoleConfiguration, assign_roles_with_config};
use kingsguard_types::{Player, PlayerHandle, PlayerId, RoleType, RoomCode};
use parking_lot::RwLock;
use rand::Rng;
use serde::Serialize;

use crate::validation::{self, ValidationState};
use crate::{RoomError, RoomState};

/// A snapshot of room metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomInfo {
    pub code: RoomCode,
    pub state: RoomState,
    /// Non-host players.
    pub player_count: usize,
    pub host_count: usize,
    pub max_players: usize,
}

struct RoomInner {
    state: RoomState,
    players: HashMap<PlayerId, PlayerHandle>,
    max_players: usize,
    role_config: RoleConfiguration,
    countdown_secs: u32,
    countdown_started_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    version: u64,
    last_validated_at: Option<DateTime<Utc>>,
}

impl RoomInner {
    fn active_count(&self) -> usize {
        self.players.values().filter(|p| !p.is_host()).count()
    }

    fn handles_by_id(&self) -> Vec<PlayerHandle> {
        let mut ids: Vec<&PlayerId> = self.players.keys().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| self.players.get(id).cloned())
            .collect()
    }
}

/// One game table.
///
/// Rooms start empty in [`RoomState::Lobby`] and
/// are safe to share across threads (`Arc<Room>`).
pub struct Room {
    code: RoomCode,
    inner: RwLock<RoomInner>,
}

impl Room {
    /// Creates an empty lobby.
    pub fn new(
        code: impl Into<RoomCode>,
        max_players: usize,
        role_config: RoleConfiguration,
    ) -> Self {
        Self {
            code: code.into(),
            inner: RwLock::new(RoomInner {
                state: RoomState::Lobby,
                players: HashMap::new(),
                max_players,
                role_config,
                countdown_secs: 0,
                countdown_started_at: None,
                created_at: Utc::now(),
                started_at: None,
                ended_at: None,
                version: 0,
                last_validated_at: None,
            }),
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn state(&self) -> RoomState {
        self.inner.read().state
    }

    pub fn max_players(&self) -> usize {
        self.inner.read().max_players
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.read().created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().ended_at
    }

    /// A copy of the current role configuration.
    pub fn role_config(&self) -> RoleConfiguration {
        self.inner.read().role_config.clone()
    }

    /// Replaces the role configuration after validating it.
    ///
    /// # Errors
    /// - [`RoomError::NotInLobby`] once the game has started
    /// - [`RoomError::Config`] if the service rejects the configuration
    pub fn set_role_config(
        &self,
        config: RoleConfiguration,
        service: &RoleConfigService,
    ) -> Result<(), RoomError> {
        service.validate_configuration(&config)?;

        let mut inner = self.inner.write();
        if !inner.state.is_lobby() {
            return Err(RoomError::NotInLobby(inner.state));
        }
        tracing::info!(
            room = %self.code,
            preset = %config.preset_name,
            roles = config.total_roles(),
            "role configuration updated"
        );
        inner.role_config = config;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Seats a player and returns the room's live handle to them.
    ///
    /// Hosts never count toward `max_players`. A player whose id is already
    /// present replaces the old record.
    ///
    /// # Errors
    /// [`RoomError::RoomFull`] if a non-host joins when every seat is taken.
    pub fn add_player(&self, player: Player) -> Result<PlayerHandle, RoomError> {
        // Capacity check and insert share one write lock; splitting them
        // would let two concurrent joins both see a free seat.
        let mut inner = self.inner.write();
        if !player.is_host && inner.active_count() >= inner.max_players {
            tracing::debug!(room = %self.code, player = %player.id, "join rejected, room full");
            return Err(RoomError::RoomFull(self.code.clone()));
        }

        let id = player.id.clone();
        let is_host = player.is_host;
        let handle = PlayerHandle::new(player);
        inner.players.insert(id.clone(), handle.clone());

        tracing::info!(
            room = %self.code,
            player = %id,
            is_host,
            players = inner.active_count(),
            "player joined"
        );
        Ok(handle)
    }

    /// Removes a player. Removing someone who isn't here is a no-op.
    pub fn remove_player(&self, id: &PlayerId) -> Option<PlayerHandle> {
        let mut inner = self.inner.write();
        let removed = inner.players.remove(id);
        if removed.is_some() {
            tracing::info!(
                room = %self.code,
                player = %id,
                players = inner.active_count(),
                "player left"
            );
        }
        removed
    }

    pub fn get_player(&self, id: &PlayerId) -> Option<PlayerHandle> {
        self.inner.read().players.get(id).cloned()
    }

    /// Every player including hosts, ordered by id.
    ///
    /// The handles are live: writing through one changes the room.
    pub fn players(&self) -> Vec<PlayerHandle> {
        self.inner.read().handles_by_id()
    }

    /// Non-host players, ordered by id.
    pub fn active_players(&self) -> Vec<PlayerHandle> {
        self.inner
            .read()
            .handles_by_id()
            .into_iter()
            .filter(|p| !p.is_host())
            .collect()
    }

    pub fn active_player_count(&self) -> usize {
        self.inner.read().active_count()
    }

    /// Whether the room is in the lobby with at least one player.
    ///
    /// This ignores the role setup; see
    /// [`get_validation_state`](Self::get_validation_state) for the full check.
    pub fn can_start(&self) -> bool {
        let inner = self.inner.read();
        inner.state.is_lobby() && inner.active_count() >= 1
    }

    /// The player holding the Leader card, if one has been dealt.
    pub fn leader(&self) -> Option<PlayerHandle> {
        self.inner
            .read()
            .players
            .values()
            .find(|p| {
                p.role()
                    .is_some_and(|card| card.role_type == RoleType::Leader)
            })
            .cloned()
    }

    pub fn info(&self) -> RoomInfo {
        let inner = self.inner.read();
        let player_count = inner.active_count();
        RoomInfo {
            code: self.code.clone(),
            state: inner.state,
            player_count,
            host_count: inner.players.len() - player_count,
            max_players: inner.max_players,
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// The authoritative start check, stamped with a fresh version.
    ///
    /// Checks run in order and the first failure decides the message:
    /// lobby state, at least one player, a Leader (unless leaderless), then
    /// configured roles against players. A preset that is short of roles
    /// may still start if it can be scaled to the table.
    pub fn get_validation_state(&self, service: &RoleConfigService) -> ValidationState {
        let mut inner = self.inner.write();
        inner.version += 1;

        let now = Utc::now();
        let timestamp = match inner.last_validated_at {
            Some(last) if last > now => last,
            _ => now,
        };
        inner.last_validated_at = Some(timestamp);

        let active = inner.active_count();
        let verdict = validation::evaluate(inner.state, active, &inner.role_config, service);

        ValidationState {
            can_start: verdict.can_start,
            can_auto_scale: verdict.can_auto_scale,
            validation_message: verdict.message,
            configured_roles: inner.role_config.total_roles(),
            version: inner.version,
            timestamp,
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Moves to `target` if it is the next state.
    ///
    /// # Errors
    /// [`RoomError::InvalidTransition`] for any other target.
    pub fn transition_to(&self, target: RoomState) -> Result<(), RoomError> {
        let mut inner = self.inner.write();
        self.transition_locked(&mut inner, target)
    }

    /// Re-runs the start checks, deals roles and enters the countdown in one
    /// critical section.
    ///
    /// A snapshot from [`get_validation_state`](Self::get_validation_state)
    /// can be stale by the time the caller acts on it, so the table is
    /// checked again under the same lock that deals it. No join or leave can
    /// land between the check and the deal.
    ///
    /// # Errors
    /// - [`RoomError::NotInLobby`] if the room has already left the lobby
    /// - [`RoomError::NotReady`] if the current table fails the start checks
    pub fn begin_countdown<R: Rng + ?Sized>(
        &self,
        service: &RoleConfigService,
        rng: &mut R,
        countdown_secs: u32,
    ) -> Result<DealReport, RoomError> {
        let mut inner = self.inner.write();
        if !inner.state.is_lobby() {
            return Err(RoomError::NotInLobby(inner.state));
        }

        let active = inner.active_count();
        let verdict = validation::evaluate(inner.state, active, &inner.role_config, service);
        if !verdict.can_start {
            tracing::info!(
                room = %self.code,
                reason = %verdict.message,
                "deal refused, table changed since validation"
            );
            return Err(RoomError::NotReady(verdict.message));
        }

        let players = inner.handles_by_id();
        let report = assign_roles_with_config(
            &players,
            service.card_pool(),
            &inner.role_config,
            service,
            rng,
        );

        inner.countdown_secs = countdown_secs;
        self.transition_locked(&mut inner, RoomState::Countdown)?;
        tracing::info!(
            room = %self.code,
            assigned = report.assigned,
            roleless = report.roleless,
            countdown_secs,
            "roles dealt, countdown started"
        );
        Ok(report)
    }

    /// When the countdown ends, if one has started.
    pub fn countdown_deadline(&self) -> Option<DateTime<Utc>> {
        let inner = self.inner.read();
        inner
            .countdown_started_at
            .map(|started| started + Duration::seconds(i64::from(inner.countdown_secs)))
    }

    fn transition_locked(
        &self,
        inner: &mut RoomInner,
        target: RoomState,
    ) -> Result<(), RoomError> {
        let from = inner.state;
        if !from.can_transition_to(target) {
            return Err(RoomError::InvalidTransition { from, to: target });
        }

        let now = Utc::now();
        match target {
            RoomState::Countdown => inner.countdown_started_at = Some(now),
            RoomState::Playing => inner.started_at = Some(now),
            RoomState::Ended => inner.ended_at = Some(now),
            RoomState::Lobby => {}
        }
        inner.state = target;
        tracing::info!(room = %self.code, %from, to = %target, "room state changed");
        Ok(())
    }
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.info();
        f.debug_struct("Room")
            .field("code", &info.code)
            .field("state", &info.state)
            .field("player_count", &info.player_count)
            .field("max_players", &info.max_players)
            .finish()
    }
}

//! Contract for the shared key-value store behind networked sessions.
//!
//! A store holds one `RoomRecord` per room. Peers publish whole
//! `SyncedState` snapshots and receive whole records back through
//! subscriptions. Publishing is a compare-and-set on the sequence number:
//! a snapshot only lands if it is newer than what the room already holds.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engines::engine_trait::Difficulty;
use crate::errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::session::session_config::{PlayMode, SessionConfig, TimerMode, Variant};
use crate::utils::room_code::random_room_code;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_room_code(rng))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque per-client identity, e.g. an anonymous auth uid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Game state tagged with the number of moves published so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedState {
    pub sequence: u64,
    pub state: GameState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: RoomId,
    pub variant: Variant,
    pub mode: PlayMode,
    pub timer: TimerMode,
    pub difficulty: Difficulty,
    pub participants: BTreeMap<ParticipantId, Color>,
    pub synced: SyncedState,
    pub created: DateTime<Utc>,
}

impl RoomRecord {
    /// Fresh room at sequence 0 with no participants.
    pub fn new(id: RoomId, config: &SessionConfig, state: GameState) -> Self {
        Self {
            id,
            variant: config.variant,
            mode: config.mode,
            timer: config.timer,
            difficulty: config.difficulty,
            participants: BTreeMap::new(),
            synced: SyncedState { sequence: 0, state },
            created: Utc::now(),
        }
    }

    pub fn color_of(&self, participant: &ParticipantId) -> Option<Color> {
        self.participants.get(participant).copied()
    }

    /// A color no registered participant holds, Dark first.
    pub fn open_color(&self) -> Option<Color> {
        [Color::Dark, Color::Light]
            .into_iter()
            .find(|color| !self.participants.values().any(|taken| taken == color))
    }

    pub fn is_ready(&self) -> bool {
        self.participants.len() >= 2
    }

    /// Session setup implied by the record, seen from `local_side`.
    pub fn session_config(&self, local_side: Color) -> SessionConfig {
        SessionConfig {
            variant: self.variant,
            mode: PlayMode::Networked,
            local_side,
            difficulty: self.difficulty,
            timer: self.timer,
            ..SessionConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

pub type UpdateCallback = Arc<dyn Fn(&RoomRecord) + Send + Sync>;

/// Shared store holding rooms.
///
/// Callbacks may run on any thread and may deliver a peer's own publish back
/// to it.
pub trait SyncStore: Send + Sync {
    /// Insert a new room. Fails with `RoomExists` if the id is taken.
    fn create_room(&self, record: RoomRecord) -> ChessResult<()>;

    fn fetch_room(&self, room: &RoomId) -> ChessResult<Option<RoomRecord>>;

    /// Record `participant` as playing `color`. Notifies subscribers.
    fn register_participant(
        &self,
        room: &RoomId,
        participant: ParticipantId,
        color: Color,
    ) -> ChessResult<()>;

    /// Store `synced` if its sequence exceeds the stored one, otherwise fail
    /// with `StaleSnapshot`. Notifies subscribers on success.
    fn publish(&self, room: &RoomId, synced: SyncedState) -> ChessResult<()>;

    /// Register `on_update`. The current record is delivered immediately.
    fn subscribe(&self, room: &RoomId, on_update: UpdateCallback) -> ChessResult<SubscriptionId>;

    fn unsubscribe(&self, subscription: SubscriptionId);
}

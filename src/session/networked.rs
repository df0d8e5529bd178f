//! Session kept in step with a remote peer through a `SyncStore`.
//!
//! Each side applies its own moves locally and publishes the result with the
//! next sequence number. Store notifications are queued on a channel and only
//! applied when the owner calls `poll_remote`, so the local `Session` is never
//! touched from a store thread.

use std::collections::BTreeMap;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, Move};
use crate::session::session::{Controller, MoveOutcome, RejectReason, Session};
use crate::session::session_config::{PlayMode, SessionConfig};
use crate::session::sync_store::{
    ParticipantId, RoomId, RoomRecord, SubscriptionId, SyncStore, SyncedState,
};
use crate::utils::room_code::is_room_code;

/// Room-id collisions tolerated before giving up on `create`.
const MAX_ROOM_ID_ATTEMPTS: u32 = 8;

pub struct NetworkedSession {
    store: Arc<dyn SyncStore>,
    room: RoomId,
    participant: ParticipantId,
    session: Session,
    sequence: u64,
    participants: BTreeMap<ParticipantId, Color>,
    subscription: Option<SubscriptionId>,
    updates: Receiver<RoomRecord>,
}

impl NetworkedSession {
    /// Open a new room with `participant` playing Light.
    pub fn create(
        store: Arc<dyn SyncStore>,
        config: SessionConfig,
        participant: ParticipantId,
    ) -> ChessResult<Self> {
        let config = SessionConfig {
            mode: PlayMode::Networked,
            local_side: Color::Light,
            ..config
        };
        let session = Session::new(config.clone())?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut attempts = 0;
        let room = loop {
            let id = RoomId::random(&mut rng);
            match store.create_room(RoomRecord::new(id.clone(), &config, *session.state())) {
                Ok(()) => break id,
                Err(ChessError::RoomExists { .. }) if attempts + 1 < MAX_ROOM_ID_ATTEMPTS => {
                    attempts += 1;
                    debug!(room = %id, "room id taken, drawing another");
                }
                Err(err) => return Err(err),
            }
        };

        store.register_participant(&room, participant.clone(), Color::Light)?;
        info!(%room, %participant, variant = %config.variant, "room created");
        Self::attach(store, room, participant, session)
    }

    /// Join an existing room. A participant already registered keeps its
    /// color; anyone else takes the open color, Dark first.
    pub fn join(
        store: Arc<dyn SyncStore>,
        room: &RoomId,
        participant: ParticipantId,
    ) -> ChessResult<Self> {
        if !is_room_code(room.as_str()) {
            debug!(%room, "malformed room code");
            return Err(ChessError::RoomNotFound {
                room: room.to_string(),
            });
        }
        let record = store
            .fetch_room(room)?
            .ok_or_else(|| ChessError::RoomNotFound {
                room: room.to_string(),
            })?;

        let side = match record.color_of(&participant) {
            Some(color) => color,
            None => {
                let color = record.open_color().ok_or_else(|| ChessError::RoomFull {
                    room: room.to_string(),
                })?;
                store.register_participant(room, participant.clone(), color)?;
                color
            }
        };

        let session = Session::from_state(record.session_config(side), record.synced.state);
        info!(%room, %participant, %side, "joined room");
        let mut joined = Self::attach(store, room.clone(), participant, session)?;
        joined.sequence = record.synced.sequence;
        joined.participants = record.participants;
        joined.poll_remote();
        Ok(joined)
    }

    fn attach(
        store: Arc<dyn SyncStore>,
        room: RoomId,
        participant: ParticipantId,
        session: Session,
    ) -> ChessResult<Self> {
        let (sender, updates) = unbounded();
        let subscription = store.subscribe(
            &room,
            Arc::new(move |record: &RoomRecord| {
                // Receiver gone means the session was dropped.
                let _ = sender.send(record.clone());
            }),
        )?;

        Ok(Self {
            store,
            room,
            participant,
            session,
            sequence: 0,
            participants: BTreeMap::new(),
            subscription: Some(subscription),
            updates,
        })
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room
    }

    pub fn participant(&self) -> &ParticipantId {
        &self.participant
    }

    pub fn local_side(&self) -> Color {
        self.session.config().local_side
    }

    /// Number of moves reflected in the local state.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Both colors have a participant.
    pub fn opponent_ready(&self) -> bool {
        self.participants.len() >= 2
    }

    pub fn can_play(&self) -> bool {
        self.opponent_ready()
            && self.session.outcome().is_none()
            && self.session.state().side_to_move == self.local_side()
    }

    /// Apply `mv` locally and publish it.
    ///
    /// If a peer's snapshot reached the store first the move is dropped, the
    /// stored state is adopted and `Superseded` is returned.
    pub fn submit_move(&mut self, mv: Move) -> ChessResult<MoveOutcome> {
        self.poll_remote();
        if !self.opponent_ready() {
            return Ok(MoveOutcome::Rejected(RejectReason::WaitingForOpponent));
        }

        let previous = *self.session.state();
        let outcome = self.session.submit_move(Controller::Local, mv);
        if !outcome.is_applied() {
            return Ok(outcome);
        }

        let synced = SyncedState {
            sequence: self.sequence + 1,
            state: *self.session.state(),
        };
        match self.store.publish(&self.room, synced) {
            Ok(()) => {
                self.sequence = synced.sequence;
                debug!(room = %self.room, %mv, sequence = self.sequence, "move published");
                Ok(outcome)
            }
            Err(ChessError::StaleSnapshot { stored, .. }) => {
                warn!(room = %self.room, %mv, stored, "publish lost the race, adopting stored state");
                self.session.revert_last(previous);
                self.resync()?;
                Ok(MoveOutcome::Superseded)
            }
            Err(err) => {
                self.session.revert_last(previous);
                Err(err)
            }
        }
    }

    /// Apply queued store notifications. Returns how many snapshots were
    /// adopted; echoes and older snapshots are dropped.
    pub fn poll_remote(&mut self) -> usize {
        let mut adopted = 0;
        while let Ok(record) = self.updates.try_recv() {
            if self.adopt(record) {
                adopted += 1;
            }
        }
        adopted
    }

    /// Stop receiving updates. Dropping the session does the same.
    pub fn leave(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.store.unsubscribe(subscription);
            info!(room = %self.room, participant = %self.participant, "left room");
        }
    }

    fn resync(&mut self) -> ChessResult<()> {
        let record = self
            .store
            .fetch_room(&self.room)?
            .ok_or_else(|| ChessError::RoomNotFound {
                room: self.room.to_string(),
            })?;
        self.adopt(record);
        Ok(())
    }

    fn adopt(&mut self, record: RoomRecord) -> bool {
        // Participants are only ever added, so an older roster never shrinks ours.
        self.participants.extend(record.participants);
        let incoming = record.synced.sequence;
        if incoming <= self.sequence {
            debug!(room = %self.room, incoming, local = self.sequence, "snapshot ignored");
            return false;
        }
        self.sequence = incoming;
        self.session.replace_state(record.synced.state);
        debug!(room = %self.room, sequence = incoming, "remote snapshot adopted");
        true
    }
}

impl Drop for NetworkedSession {
    fn drop(&mut self) {
        self.leave();
    }
}

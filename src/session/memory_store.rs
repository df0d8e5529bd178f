//! In-process `SyncStore`.
//!
//! Rooms are kept as serialized JSON so every reader gets an independent
//! copy, the same as a remote store would hand out. Subscriber callbacks run
//! after the lock is released, so a callback may call back into the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Color;
use crate::session::sync_store::{
    ParticipantId, RoomId, RoomRecord, SubscriptionId, SyncStore, SyncedState, UpdateCallback,
};

struct Subscriber {
    id: SubscriptionId,
    room: RoomId,
    on_update: UpdateCallback,
}

#[derive(Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<RoomId, String>>,
    subscribers: Mutex<Vec<Subscriber>>,
    next_subscription: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.lock().len()
    }

    pub fn subscriber_count(&self, room: &RoomId) -> usize {
        self.subscribers
            .lock()
            .iter()
            .filter(|sub| &sub.room == room)
            .count()
    }

    /// Read-modify-write one room under the lock; returns the new record.
    fn update<F>(&self, room: &RoomId, edit: F) -> ChessResult<RoomRecord>
    where
        F: FnOnce(&mut RoomRecord) -> ChessResult<()>,
    {
        let mut rooms = self.rooms.lock();
        let stored = rooms.get_mut(room).ok_or_else(|| ChessError::RoomNotFound {
            room: room.to_string(),
        })?;
        let mut record: RoomRecord = serde_json::from_str(stored)?;
        edit(&mut record)?;
        *stored = serde_json::to_string(&record)?;
        Ok(record)
    }

    fn notify(&self, record: &RoomRecord) {
        let callbacks: Vec<UpdateCallback> = self
            .subscribers
            .lock()
            .iter()
            .filter(|sub| sub.room == record.id)
            .map(|sub| sub.on_update.clone())
            .collect();
        for callback in callbacks {
            callback(record);
        }
    }
}

impl SyncStore for MemoryStore {
    fn create_room(&self, record: RoomRecord) -> ChessResult<()> {
        let encoded = serde_json::to_string(&record)?;
        let mut rooms = self.rooms.lock();
        if rooms.contains_key(&record.id) {
            return Err(ChessError::RoomExists {
                room: record.id.to_string(),
            });
        }
        rooms.insert(record.id.clone(), encoded);
        debug!(room = %record.id, "room stored");
        Ok(())
    }

    fn fetch_room(&self, room: &RoomId) -> ChessResult<Option<RoomRecord>> {
        let rooms = self.rooms.lock();
        match rooms.get(room) {
            Some(encoded) => Ok(Some(serde_json::from_str(encoded)?)),
            None => Ok(None),
        }
    }

    fn register_participant(
        &self,
        room: &RoomId,
        participant: ParticipantId,
        color: Color,
    ) -> ChessResult<()> {
        let record = self.update(room, |record| {
            record.participants.insert(participant, color);
            Ok(())
        })?;
        self.notify(&record);
        Ok(())
    }

    fn publish(&self, room: &RoomId, synced: SyncedState) -> ChessResult<()> {
        let record = self.update(room, |record| {
            let stored = record.synced.sequence;
            if synced.sequence <= stored {
                warn!(%room, sequence = synced.sequence, stored, "stale publish refused");
                return Err(ChessError::StaleSnapshot {
                    room: room.to_string(),
                    sequence: synced.sequence,
                    stored,
                });
            }
            record.synced = synced;
            Ok(())
        })?;
        self.notify(&record);
        Ok(())
    }

    fn subscribe(&self, room: &RoomId, on_update: UpdateCallback) -> ChessResult<SubscriptionId> {
        let current = self.fetch_room(room)?.ok_or_else(|| ChessError::RoomNotFound {
            room: room.to_string(),
        })?;
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push(Subscriber {
            id,
            room: room.clone(),
            on_update: on_update.clone(),
        });
        on_update(&current);
        Ok(id)
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.subscribers.lock().retain(|sub| sub.id != subscription);
    }
}

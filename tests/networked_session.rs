use std::sync::Arc;

use parking_lot::Mutex;

use quantum_chess::errors::{ChessError, ChessResult};
use quantum_chess::game_state::chess_types::{Color, Move};
use quantum_chess::game_state::variants::Variant;
use quantum_chess::session::memory_store::MemoryStore;
use quantum_chess::session::networked::NetworkedSession;
use quantum_chess::session::session::MoveOutcome;
use quantum_chess::session::session_config::SessionConfig;
use quantum_chess::session::sync_store::{
    ParticipantId, RoomId, RoomRecord, SubscriptionId, SyncStore, SyncedState, UpdateCallback,
};

fn host_and_guest(store: &Arc<dyn SyncStore>, config: SessionConfig) -> (NetworkedSession, NetworkedSession) {
    let host = NetworkedSession::create(Arc::clone(store), config, ParticipantId::new("host"))
        .expect("room created");
    let guest = NetworkedSession::join(Arc::clone(store), host.room_id(), ParticipantId::new("guest"))
        .expect("guest joins");
    (host, guest)
}

#[test]
fn peers_converge_move_by_move() {
    let store: Arc<dyn SyncStore> = Arc::new(MemoryStore::new());
    let (mut host, mut guest) = host_and_guest(
        &store,
        SessionConfig::default().with_variant(Variant::Randomized).with_seed(31),
    );

    assert_eq!(guest.session().state(), host.session().state());
    assert_eq!(guest.session().config().variant, Variant::Randomized);
    assert_eq!(guest.local_side(), Color::Dark);

    let opening = host.session().legal_moves()[0];
    assert!(host.submit_move(opening).expect("publish succeeds").is_applied());
    assert_eq!(host.sequence(), 1);

    assert_eq!(guest.poll_remote(), 1);
    assert_eq!(guest.sequence(), 1);
    assert_eq!(guest.session().state(), host.session().state());
    assert!(guest.can_play());

    let reply = guest.session().legal_moves()[0];
    assert!(guest.submit_move(reply).expect("publish succeeds").is_applied());

    // The host's own echo is dropped; only the reply is adopted.
    assert_eq!(host.poll_remote(), 1);
    assert_eq!(host.sequence(), 2);
    assert_eq!(host.session().state(), guest.session().state());
    assert_eq!(guest.poll_remote(), 0);
}

#[test]
fn join_errors() {
    let store: Arc<dyn SyncStore> = Arc::new(MemoryStore::new());
    let missing = NetworkedSession::join(Arc::clone(&store), &RoomId::new("nope0"), ParticipantId::new("x"));
    assert!(matches!(missing, Err(ChessError::RoomNotFound { .. })));

    let (host, _guest) = host_and_guest(&store, SessionConfig::default().with_seed(5));
    let third = NetworkedSession::join(Arc::clone(&store), host.room_id(), ParticipantId::new("third"));
    assert!(matches!(third, Err(ChessError::RoomFull { .. })));

    let rejoin = NetworkedSession::join(Arc::clone(&store), host.room_id(), ParticipantId::new("guest"))
        .expect("known participant rejoins");
    assert_eq!(rejoin.local_side(), Color::Dark);
}

#[test]
fn leaving_cancels_the_subscription() {
    let memory = Arc::new(MemoryStore::new());
    let store: Arc<dyn SyncStore> = memory.clone();
    let (mut host, guest) = host_and_guest(&store, SessionConfig::default().with_seed(6));
    let room = host.room_id().clone();
    assert_eq!(memory.subscriber_count(&room), 2);

    host.leave();
    assert_eq!(memory.subscriber_count(&room), 1);
    drop(guest);
    assert_eq!(memory.subscriber_count(&room), 0);
}

/// Store whose notifications can be held back, so two clients can act on
/// the same snapshot.
#[derive(Default)]
struct LaggyStore {
    inner: MemoryStore,
    shared: Arc<Lag>,
}

#[derive(Default)]
struct Lag {
    holding: Mutex<bool>,
    held: Mutex<Vec<(UpdateCallback, RoomRecord)>>,
}

impl LaggyStore {
    fn hold(&self) {
        *self.shared.holding.lock() = true;
    }

    fn release(&self) {
        *self.shared.holding.lock() = false;
        let held: Vec<_> = self.shared.held.lock().drain(..).collect();
        for (callback, record) in held {
            callback(&record);
        }
    }
}

impl SyncStore for LaggyStore {
    fn create_room(&self, record: RoomRecord) -> ChessResult<()> {
        self.inner.create_room(record)
    }

    fn fetch_room(&self, room: &RoomId) -> ChessResult<Option<RoomRecord>> {
        self.inner.fetch_room(room)
    }

    fn register_participant(&self, room: &RoomId, participant: ParticipantId, color: Color) -> ChessResult<()> {
        self.inner.register_participant(room, participant, color)
    }

    fn publish(&self, room: &RoomId, synced: SyncedState) -> ChessResult<()> {
        self.inner.publish(room, synced)
    }

    fn subscribe(&self, room: &RoomId, on_update: UpdateCallback) -> ChessResult<SubscriptionId> {
        let shared = Arc::clone(&self.shared);
        self.inner.subscribe(
            room,
            Arc::new(move |record: &RoomRecord| {
                if *shared.holding.lock() {
                    shared.held.lock().push((Arc::clone(&on_update), record.clone()));
                } else {
                    on_update(record);
                }
            }),
        )
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.inner.unsubscribe(subscription)
    }
}

#[test]
fn losing_publish_adopts_the_stored_state() {
    let laggy = Arc::new(LaggyStore::default());
    let store: Arc<dyn SyncStore> = laggy.clone();
    let (mut host, mut guest) = host_and_guest(&store, SessionConfig::default().with_seed(8));

    // Same participant on a second client takes the same color.
    let mut host_again = NetworkedSession::join(Arc::clone(&store), host.room_id(), ParticipantId::new("host"))
        .expect("host rejoins");
    assert_eq!(host_again.local_side(), Color::Light);
    assert!(host_again.can_play());

    laggy.hold();
    let first = Move::from_coords(6, 4, 4, 4);
    let second = Move::from_coords(6, 3, 4, 3);
    assert!(host.submit_move(first).expect("first publish lands").is_applied());
    assert_eq!(
        host_again.submit_move(second).expect("stale publish is recovered"),
        MoveOutcome::Superseded
    );
    assert_eq!(host_again.sequence(), 1);
    assert_eq!(host_again.session().state(), host.session().state());
    assert!(host_again.session().history().is_empty());

    laggy.release();
    assert_eq!(host_again.poll_remote(), 0);
    assert_eq!(guest.poll_remote(), 1);
    assert_eq!(guest.session().state(), host.session().state());

    let stored = store
        .fetch_room(host.room_id())
        .expect("fetch")
        .expect("room exists");
    assert_eq!(stored.synced.sequence, 1);
    assert_eq!(stored.synced.state, *host.session().state());
}

//! In-memory room relay.
//!
//! Connections register with [`RoomRelay::connect`] and receive an inbox of
//! [`ServerEvent`]s. Joining a room creates it on first use; a room is dropped
//! when its last member disconnects. There is no leave operation short of
//! disconnecting, and no cap on rooms or members.
//!
//! All state sits behind one lock. Join, fan-out and disconnect cleanup each
//! run to completion under it without awaiting, so a disconnect can never
//! interleave with a half-finished broadcast.

use crate::protocol::{ClientEvent, ServerEvent};
use chrono::{DateTime, Utc};
use pairdebug_core::{ConnectionId, RoomId};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Receiving end of a connection's outbound queue.
pub type Inbox = mpsc::UnboundedReceiver<ServerEvent>;

/// A live connection.
struct Member {
    /// Outbound queue drained by the connection's socket writer.
    outbox: mpsc::UnboundedSender<ServerEvent>,

    /// Rooms this connection has joined.
    rooms: HashSet<RoomId>,

    /// Connection time.
    connected_at: DateTime<Utc>,
}

#[derive(Default)]
struct RelayState {
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
    members: HashMap<ConnectionId, Member>,
}

/// Room-scoped pub/sub hub.
#[derive(Default)]
pub struct RoomRelay {
    state: RwLock<RelayState>,
}

impl RoomRelay {
    /// Create an empty relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection.
    pub fn connect(&self) -> (ConnectionId, Inbox) {
        let id = ConnectionId::generate();
        let (outbox, inbox) = mpsc::unbounded_channel();

        self.state.write().members.insert(
            id.clone(),
            Member {
                outbox,
                rooms: HashSet::new(),
                connected_at: Utc::now(),
            },
        );

        (id, inbox)
    }

    /// Add `conn` to `room`.
    ///
    /// Returns `true` if the connection was not already a member. Unknown
    /// connections are ignored.
    pub fn join(&self, conn: &ConnectionId, room: RoomId) -> bool {
        let mut state = self.state.write();
        let state = &mut *state;

        let Some(member) = state.members.get_mut(conn) else {
            debug!("Ignoring join from unknown connection {}", conn);
            return false;
        };

        if !member.rooms.insert(room.clone()) {
            return false;
        }

        state.rooms.entry(room.clone()).or_default().insert(conn.clone());
        info!("Connection {} joined room {}", conn, room);
        true
    }

    /// Deliver `event` to every member of `room` except `sender`.
    ///
    /// A sender that is not a member of `room` reaches nobody. Returns the
    /// number of members the event was queued for.
    pub fn broadcast(&self, sender: &ConnectionId, room: &RoomId, event: ServerEvent) -> usize {
        let state = self.state.read();

        let Some(peers) = state.rooms.get(room) else {
            return 0;
        };
        if !peers.contains(sender) {
            debug!("Connection {} is not in room {}, dropping {}", sender, room, event.name());
            return 0;
        }

        let mut delivered = 0;
        for peer in peers.iter().filter(|peer| *peer != sender) {
            // A closed inbox means the socket is going away; disconnect()
            // will remove it shortly.
            if let Some(member) = state.members.get(peer) {
                if member.outbox.send(event.clone()).is_ok() {
                    delivered += 1;
                }
            }
        }

        debug!(
            "Relayed {} from {} to {} peer(s) in room {}",
            event.name(),
            sender,
            delivered,
            room
        );
        delivered
    }

    /// Apply a client event on behalf of `conn`.
    ///
    /// Returns the number of peers reached (always 0 for joins).
    pub fn handle(&self, conn: &ConnectionId, event: ClientEvent) -> usize {
        match event {
            ClientEvent::JoinRoom(room) => {
                self.join(conn, room);
                0
            }
            ClientEvent::CodeUpdate(update) => {
                self.broadcast(conn, &update.room_id, ServerEvent::CodeUpdate(update.code))
            }
            ClientEvent::DebugResult(update) => self.broadcast(
                conn,
                &update.room_id,
                ServerEvent::DebugResult(update.result),
            ),
        }
    }

    /// Remove `conn` from every room it joined.
    ///
    /// Rooms left without members are pruned. Returns the rooms the connection
    /// belonged to.
    pub fn disconnect(&self, conn: &ConnectionId) -> Vec<RoomId> {
        let mut state = self.state.write();

        let Some(member) = state.members.remove(conn) else {
            return Vec::new();
        };

        for room in &member.rooms {
            if let Some(peers) = state.rooms.get_mut(room) {
                peers.remove(conn);
                if peers.is_empty() {
                    state.rooms.remove(room);
                    debug!("Room {} is empty, pruned", room);
                }
            }
        }

        let connected_for = Utc::now() - member.connected_at;
        info!(
            "Connection {} left {} room(s) after {}s",
            conn,
            member.rooms.len(),
            connected_for.num_seconds()
        );

        let mut rooms: Vec<RoomId> = member.rooms.iter().cloned().collect();
        rooms.sort();
        rooms
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.state.read().members.len()
    }

    /// Number of rooms with at least one member.
    pub fn room_count(&self) -> usize {
        self.state.read().rooms.len()
    }

    /// Members of `room`, sorted.
    pub fn members(&self, room: &RoomId) -> Vec<ConnectionId> {
        let mut members: Vec<ConnectionId> = self
            .state
            .read()
            .rooms
            .get(room)
            .map(|peers| peers.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        members
    }

    /// Rooms `conn` has joined, sorted.
    pub fn rooms_of(&self, conn: &ConnectionId) -> Vec<RoomId> {
        let mut rooms: Vec<RoomId> = self
            .state
            .read()
            .members
            .get(conn)
            .map(|member| member.rooms.iter().cloned().collect())
            .unwrap_or_default();
        rooms.sort();
        rooms
    }
}

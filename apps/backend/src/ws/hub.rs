//! Connection hub: the notifier capability behind the game logic.
//!
//! Holds a recipient per live WebSocket connection and fans server
//! messages out to one, all, or all-but-one of them. Game logic never
//! touches a socket directly; handlers call these after the pure
//! computation returns its outcome.

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// A server message on its way out to one connection's actor.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

#[derive(Default)]
pub struct WsRegistry {
    connections: DashMap<Uuid, Recipient<Outbound>>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register(&self, conn_id: Uuid, recipient: Recipient<Outbound>) {
        self.connections.insert(conn_id, recipient);
    }

    pub fn unregister(&self, conn_id: Uuid) {
        self.connections.remove(&conn_id);
    }

    /// Delivers to a single connection. Unknown ids are ignored; the
    /// connection may have gone away between computing and notifying.
    pub fn send_to(&self, conn_id: Uuid, msg: &ServerMsg) {
        if let Some(recipient) = self.connections.get(&conn_id) {
            recipient.do_send(Outbound(msg.clone()));
        }
    }

    pub fn broadcast_all(&self, msg: &ServerMsg) {
        for entry in self.connections.iter() {
            entry.value().do_send(Outbound(msg.clone()));
        }
    }

    pub fn broadcast_except(&self, exclude: Uuid, msg: &ServerMsg) {
        for entry in self.connections.iter() {
            if *entry.key() != exclude {
                entry.value().do_send(Outbound(msg.clone()));
            }
        }
    }
}

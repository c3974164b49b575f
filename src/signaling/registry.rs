/**
 * Connection Registry
 *
 * In-memory table of live WebSocket connections. Each entry pairs the
 * connection's identity (who, which role, which session once joined)
 * with the unbounded sender feeding its outbound queue, so the router
 * can deliver without ever blocking on a slow client.
 *
 * The registry is process-local. Scaling the signaling layer across
 * processes would need a shared pub/sub relay in front of it; that is
 * an extension point, not something this table attempts.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::model::Role;
use crate::signaling::protocol::ServerEvent;
use crate::signaling::ConnId;

/// Identity and session binding of one live connection
///
/// `session_id` stays `None` between the socket accept and a successful
/// `join-session`; only bound connections receive session broadcasts.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub session_id: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
}

struct ConnectionEntry {
    info: ConnectionInfo,
    tx: mpsc::UnboundedSender<ServerEvent>,
}

/// Shared map of live connections
#[derive(Clone)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<ConnId, ConnectionEntry>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a fresh connection with its outbound queue sender
    pub fn register(
        &self,
        conn_id: ConnId,
        info: ConnectionInfo,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) {
        self.connections
            .lock()
            .unwrap()
            .insert(conn_id, ConnectionEntry { info, tx });
    }

    /// Remove a connection, returning its last known identity
    pub fn unregister(&self, conn_id: ConnId) -> Option<ConnectionInfo> {
        self.connections
            .lock()
            .unwrap()
            .remove(&conn_id)
            .map(|entry| entry.info)
    }

    /// Bind a connection to a session after a successful join
    ///
    /// Returns false if the connection disappeared in the meantime.
    pub fn bind_session(&self, conn_id: ConnId, session_id: &str) -> bool {
        let mut connections = self.connections.lock().unwrap();
        match connections.get_mut(&conn_id) {
            Some(entry) => {
                entry.info.session_id = Some(session_id.to_string());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, conn_id: ConnId) -> Option<ConnectionInfo> {
        self.connections
            .lock()
            .unwrap()
            .get(&conn_id)
            .map(|entry| entry.info.clone())
    }

    /// Outbound queue sender for one connection
    pub fn sender(&self, conn_id: ConnId) -> Option<mpsc::UnboundedSender<ServerEvent>> {
        self.connections
            .lock()
            .unwrap()
            .get(&conn_id)
            .map(|entry| entry.tx.clone())
    }

    /// All connections currently bound to a session
    pub fn find_by_session(&self, session_id: &str) -> Vec<(ConnId, ConnectionInfo)> {
        self.connections
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, entry)| entry.info.session_id.as_deref() == Some(session_id))
            .map(|(conn_id, entry)| (*conn_id, entry.info.clone()))
            .collect()
    }

    /// Outbound senders for every connection bound to a session
    ///
    /// Senders are copied out under the lock; the actual sends happen
    /// after it is released.
    pub fn session_senders(&self, session_id: &str) -> Vec<mpsc::UnboundedSender<ServerEvent>> {
        self.connections
            .lock()
            .unwrap()
            .values()
            .filter(|entry| entry.info.session_id.as_deref() == Some(session_id))
            .map(|entry| entry.tx.clone())
            .collect()
    }

    /// The teacher connection of a session, if one is live
    pub fn find_teacher_of_session(&self, session_id: &str) -> Option<ConnId> {
        self.connections
            .lock()
            .unwrap()
            .iter()
            .find(|(_, entry)| {
                entry.info.role == Role::Teacher
                    && entry.info.session_id.as_deref() == Some(session_id)
            })
            .map(|(conn_id, _)| *conn_id)
    }

    /// True when no connection is bound to the session anymore
    pub fn session_is_empty(&self, session_id: &str) -> bool {
        !self
            .connections
            .lock()
            .unwrap()
            .values()
            .any(|entry| entry.info.session_id.as_deref() == Some(session_id))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().unwrap().len()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

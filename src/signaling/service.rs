/**
 * Signaling Service
 *
 * Delivery layer on top of the connection registry: unicast to one
 * connection, broadcast to every connection bound to a session, and
 * per-session sequence numbers so receivers can discard stale slide
 * and understood-count updates that arrive out of order.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::signaling::protocol::ServerEvent;
use crate::signaling::registry::ConnectionRegistry;
use crate::signaling::ConnId;

/// Shared signaling state handed to the socket tasks and HTTP handlers
#[derive(Clone)]
pub struct SignalingService {
    registry: ConnectionRegistry,
    sequences: Arc<Mutex<HashMap<String, u64>>>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            sequences: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Next sequence number for a session's ordered updates
    ///
    /// Counters start at 1 and increase monotonically for as long as the
    /// session has live connections.
    pub fn next_seq(&self, session_id: &str) -> u64 {
        let mut sequences = self.sequences.lock().unwrap();
        let seq = sequences.entry(session_id.to_string()).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Send one event to one connection
    ///
    /// Returns false when the connection is unknown or its outbound
    /// queue has already closed.
    pub fn unicast(&self, conn_id: ConnId, event: ServerEvent) -> bool {
        match self.registry.sender(conn_id) {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }

    /// Send one event to every connection bound to a session
    ///
    /// Returns the number of queues the event was handed to. Delivery is
    /// fire-and-forget; a connection mid-teardown just drops it.
    pub fn broadcast_to_session(&self, session_id: &str, event: ServerEvent) -> usize {
        let senders = self.registry.session_senders(session_id);
        let mut delivered = 0;
        for tx in &senders {
            if tx.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        tracing::debug!(
            "[Signaling] Broadcast {} to {} connection(s) in session {}",
            event.name(),
            delivered,
            session_id
        );
        delivered
    }

    /// Drop per-session counters once the last connection has left
    pub fn release_session_state(&self, session_id: &str) {
        if self.registry.session_is_empty(session_id) {
            self.sequences.lock().unwrap().remove(session_id);
            tracing::debug!("[Signaling] Released state for empty session {}", session_id);
        }
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::signaling::registry::ConnectionInfo;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn bound_info(session_id: &str) -> ConnectionInfo {
        ConnectionInfo {
            session_id: Some(session_id.to_string()),
            user_id: "user-1".to_string(),
            user_name: "Asha".to_string(),
            role: Role::Student,
        }
    }

    #[test]
    fn test_seq_is_monotonic_per_session() {
        let service = SignalingService::new();
        assert_eq!(service.next_seq("s-1"), 1);
        assert_eq!(service.next_seq("s-1"), 2);
        assert_eq!(service.next_seq("s-2"), 1);
        assert_eq!(service.next_seq("s-1"), 3);
    }

    #[test]
    fn test_unicast_to_unknown_connection() {
        let service = SignalingService::new();
        let delivered = service.unicast(
            Uuid::new_v4(),
            ServerEvent::Error {
                message: "Peer not connected".to_string(),
            },
        );
        assert!(!delivered);
    }

    #[test]
    fn test_broadcast_reaches_session_members_only() {
        let service = SignalingService::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();

        service
            .registry()
            .register(Uuid::new_v4(), bound_info("s-1"), tx_a);
        service
            .registry()
            .register(Uuid::new_v4(), bound_info("s-2"), tx_b);

        let delivered = service.broadcast_to_session(
            "s-1",
            ServerEvent::UnderstoodCountUpdated {
                understood_count: 1,
                seq: 1,
            },
        );

        assert_eq!(delivered, 1);
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn test_release_drops_counter_only_when_empty() {
        let service = SignalingService::new();
        let conn_id = Uuid::new_v4();
        let (tx, _rx) = mpsc::unbounded_channel();
        service.registry().register(conn_id, bound_info("s-1"), tx);

        assert_eq!(service.next_seq("s-1"), 1);

        // Still occupied: counter survives.
        service.release_session_state("s-1");
        assert_eq!(service.next_seq("s-1"), 2);

        // Last connection gone: counter resets.
        service.registry().unregister(conn_id);
        service.release_session_state("s-1");
        assert_eq!(service.next_seq("s-1"), 1);
    }
}

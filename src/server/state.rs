/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container, holding:
 * - The session store (SQLite-backed session documents)
 * - The chat log (persisted per-session messages)
 * - Material storage (files under the media root)
 * - The signaling service (live connections, delivery, sequencing)
 *
 * # Thread Safety
 *
 * Every field is cheaply cloneable and internally synchronized: the
 * stores share a connection pool, and the signaling service keeps its
 * tables behind short-held mutexes.
 */

use axum::extract::FromRef;

use crate::signaling::SignalingService;
use crate::store::{ChatLog, MaterialStorage, SessionStore};

/// Shared application state handed to every handler and socket task
#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
    pub chat: ChatLog,
    pub materials: MaterialStorage,
    pub signaling: SignalingService,
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for ChatLog {
    fn from_ref(state: &AppState) -> Self {
        state.chat.clone()
    }
}

impl FromRef<AppState> for MaterialStorage {
    fn from_ref(state: &AppState) -> Self {
        state.materials.clone()
    }
}

impl FromRef<AppState> for SignalingService {
    fn from_ref(state: &AppState) -> Self {
        state.signaling.clone()
    }
}

/**
 * Server Initialization
 *
 * This module assembles the application: state creation from an open
 * database pool and the configured media root, then router
 * construction. The database pool is handed in rather than opened here
 * so tests can run the full app against a throwaway database file.
 */

use std::path::PathBuf;

use axum::Router;
use sqlx::SqlitePool;

use crate::routes::create_router;
use crate::server::state::AppState;
use crate::signaling::SignalingService;
use crate::store::{ChatLog, MaterialStorage, SessionStore};

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `pool` - Open SQLite pool with migrations applied
/// * `media_root` - Directory for uploaded session materials
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_app(pool: SqlitePool, media_root: impl Into<PathBuf>) -> Router {
    tracing::info!("Initializing live session server");

    // Shared state: both stores ride the same pool.
    let app_state = AppState {
        store: SessionStore::new(pool.clone()),
        chat: ChatLog::new(pool),
        materials: MaterialStorage::new(media_root.into()),
        signaling: SignalingService::new(),
    };

    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}

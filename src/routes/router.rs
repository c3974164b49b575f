/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * Routes are added in a specific order to ensure proper matching:
 * 1. Signaling route (WebSocket upgrade) and liveness probe
 * 2. API routes (teacher and student live-session endpoints)
 * 3. Media file serving (uploaded session materials)
 * 4. Fallback handler (404)
 *
 * # Route Priority
 *
 * Static route segments take precedence over parameterized ones, so
 * `/api/student/live-session/available` matches before
 * `/api/student/live-session/{id}`. The CORS layer wraps the whole
 * router and mirrors the request origin so browser clients can send
 * credentialed requests.
 */

use axum::http::StatusCode;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// This function sets up all HTTP routes for the application in the
/// following order:
///
/// 1. **Signaling Route**: WebSocket upgrade for live sessions
/// 2. **API Routes**: Teacher and student live-session endpoints
/// 3. **Media Files**: Serve uploaded session materials
/// 4. **Fallback Handler**: 404 errors
///
/// # Arguments
///
/// * `app_state` - Application state containing stores and services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Route Details
///
/// ## Signaling Route
///
/// - `GET /live-session` - WebSocket upgrade for the signaling channel
/// - `GET /` - Liveness probe
///
/// ## API Routes
///
/// - `/api/teacher/live-session/...` - Session management (teacher)
/// - `/api/student/live-session/...` - Session discovery (student)
///
/// ## Media Files
///
/// Uploaded materials are served from the media root under `/media`.
///
/// ## Fallback
///
/// The fallback handler returns 404 for unknown routes.
pub fn create_router(app_state: AppState) -> Router<()> {
    // Start with the signaling route and liveness probe
    let router = Router::new()
        .route(
            "/live-session",
            axum::routing::get({
                use crate::signaling::socket::ws_handler;
                ws_handler
            }),
        )
        .route("/", axum::routing::get(|| async { "ClassLive Backend" }));

    // Add API routes
    let router = configure_api_routes(router);

    // Serve uploaded materials from the media root
    let router =
        router.nest_service("/media", ServeDir::new(app_state.materials.root()));

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    // CORS mirrors the request origin and allows credentials
    let router = router.layer(CorsLayer::very_permissive());

    // Use AppState as router state
    router.with_state(app_state)
}

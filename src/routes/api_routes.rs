/**
 * API Route Configuration
 *
 * This module wires the live-session HTTP endpoints onto the router,
 * grouped by audience. Each group carries its own middleware stack:
 * token verification first, then the role gate.
 *
 * # Routes
 *
 * ## Teacher (role: teacher)
 * - `POST /api/teacher/live-session/schedule` - Schedule a session
 * - `POST /api/teacher/live-session/start/{id}` - Activate a session
 * - `POST /api/teacher/live-session/end/{id}` - End a session
 * - `POST /api/teacher/live-session/upload-material/{id}` - Upload materials
 * - `POST /api/teacher/live-session/change-slide/{id}` - Move the deck
 * - `GET /api/teacher/live-session` - List own sessions
 * - `GET /api/teacher/live-session/{id}` - Fetch one session
 * - `GET /api/teacher/live-session/{id}/understood` - Understood counter
 * - `GET /api/teacher/live-session/{id}/chat` - Chat history
 *
 * ## Student (role: student)
 * - `GET /api/student/live-session/available` - Active org sessions
 * - `GET /api/student/live-session/all` - Recent org sessions
 * - `GET /api/student/live-session/{id}` - Fetch one session
 * - `GET /api/student/live-session/{id}/materials` - Session materials
 * - `GET /api/student/live-session/{id}/chat` - Chat history
 */

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::live::handlers::{lifecycle, materials, queries, schedule, slides, student};
use crate::middleware::{auth_middleware, require_student, require_teacher};
use crate::server::state::AppState;

/// Configure API routes
///
/// Adds the teacher and student live-session route groups under
/// `/api`. Both groups verify the bearer token before the role gate
/// runs, so an unauthenticated caller always gets 401 and a caller
/// with the wrong role gets 403.
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .nest("/api/teacher/live-session", teacher_session_routes())
        .nest("/api/student/live-session", student_session_routes())
}

fn teacher_session_routes() -> Router<AppState> {
    Router::new()
        .route("/schedule", post(schedule::schedule_session))
        .route("/start/{id}", post(lifecycle::start_session))
        .route("/end/{id}", post(lifecycle::end_session))
        .route("/upload-material/{id}", post(materials::upload_materials))
        .route("/change-slide/{id}", post(slides::change_slide))
        .route("/", get(queries::list_sessions))
        .route("/{id}", get(queries::get_session))
        .route("/{id}/understood", get(queries::get_understood_count))
        .route("/{id}/chat", get(queries::get_session_chat))
        // The layer added last is outermost, so the token is verified
        // before the role gate reads the authenticated user.
        .route_layer(middleware::from_fn(require_teacher))
        .route_layer(middleware::from_fn(auth_middleware))
}

fn student_session_routes() -> Router<AppState> {
    Router::new()
        .route("/available", get(student::get_available_sessions))
        .route("/all", get(student::get_all_sessions))
        .route("/{id}", get(student::get_session_details))
        .route("/{id}/materials", get(student::get_session_materials))
        .route("/{id}/chat", get(student::get_session_chat))
        .route_layer(middleware::from_fn(require_student))
        .route_layer(middleware::from_fn(auth_middleware))
}

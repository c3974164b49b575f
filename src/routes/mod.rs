//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Architecture
//!
//! The routes module is organized into focused submodules:
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - API endpoints (teacher and student live-session)
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint configuration
//! ```
//!
//! # Route Organization
//!
//! Routes are added in a specific order to ensure proper matching:
//!
//! 1. **Signaling Route** - WebSocket upgrade for live sessions
//! 2. **API Routes** - Teacher and student live-session endpoints
//! 3. **Media Files** - Uploaded session materials
//! 4. **Fallback Handler** - 404 errors
//!
//! # Route Types
//!
//! ## Signaling Route
//!
//! - `GET /live-session` - WebSocket upgrade for the signaling channel
//! - `GET /` - Liveness probe
//!
//! ## Teacher API Routes
//!
//! - `POST /api/teacher/live-session/schedule` - Schedule a session
//! - `POST /api/teacher/live-session/start/{id}` - Activate a session
//! - `POST /api/teacher/live-session/end/{id}` - End a session
//! - `POST /api/teacher/live-session/upload-material/{id}` - Upload materials
//! - `POST /api/teacher/live-session/change-slide/{id}` - Move the deck
//! - `GET /api/teacher/live-session` - List own sessions
//! - `GET /api/teacher/live-session/{id}` - Fetch one session
//! - `GET /api/teacher/live-session/{id}/understood` - Understood counter
//! - `GET /api/teacher/live-session/{id}/chat` - Chat history
//!
//! ## Student API Routes
//!
//! - `GET /api/student/live-session/available` - Active org sessions
//! - `GET /api/student/live-session/all` - Recent org sessions
//! - `GET /api/student/live-session/{id}` - Fetch one session
//! - `GET /api/student/live-session/{id}/materials` - Session materials
//! - `GET /api/student/live-session/{id}/chat` - Chat history
//!
//! ## Media Files
//!
//! Uploaded materials are served from the media root under `/media`.
//!
//! # Dependencies
//!
//! - `server::state` - Application state
//! - `live::handlers` - Live-session HTTP handlers
//! - `signaling::socket` - WebSocket upgrade handler
//! - `middleware` - Authentication and role gates

/// Main router creation
pub mod router;

/// API endpoint configuration
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;

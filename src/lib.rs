// Increase recursion limit for complex async operations
#![recursion_limit = "256"]

//! ClassLive - Main Library
//!
//! ClassLive is the realtime backbone of a multi-tenant education platform,
//! providing live-session scheduling, WebRTC signaling relay, slide
//! synchronization, session chat, and comprehension polling over a single
//! WebSocket channel.
//!
//! # Overview
//!
//! This library provides the core functionality for ClassLive, including:
//! - Live-session lifecycle management (schedule, start, end)
//! - WebRTC signaling relay with Opus audio constraint rewriting
//! - Slide synchronization with per-session sequence numbers
//! - Session chat with persistent history
//! - Understood-count comprehension polling
//! - Material upload and delivery to connected participants
//!
//! # Module Structure
//!
//! The library is organized into focused modules:
//!
//! - **`model`** - Domain types shared across the crate
//!   - Session, participant, chat, and material structures
//!   - Role and network-quality enums
//!
//! - **`store`** - SQLite persistence
//!   - Session rows with atomic counter and state transitions
//!   - Chat log and participant tracking
//!   - Material files on disk under the media root
//!
//! - **`auth`** / **`middleware`** - Authentication
//!   - JWT issuing and verification
//!   - Token middleware and role gates for HTTP routes
//!
//! - **`signaling`** - Realtime coordination over WebSocket
//!   - Connection registry and per-connection outbound queues
//!   - Event protocol, dispatch, and room broadcast
//!   - SDP munging for low-bandwidth Opus audio
//!
//! - **`live`** - HTTP handlers for session management
//!   - Teacher endpoints (schedule, start, end, slides, materials)
//!   - Student endpoints (discovery, materials, chat history)
//!
//! - **`server`** / **`routes`** - Assembly
//!   - Configuration from environment variables
//!   - Database pool setup and migrations
//!   - Router creation and application state
//!
//! - **`error`** - API error type and HTTP mapping
//!
//! # Usage
//!
//! ```rust,no_run
//! use classlive::server::{connect_database, create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env();
//! let pool = connect_database(&config.database_url).await?;
//! let app = create_app(pool, config.media_root);
//! // Use app with Axum server
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The application follows a modular architecture:
//!
//! - **HTTP Layer**: Axum handlers for session management, guarded by
//!   JWT middleware and role gates
//! - **Signaling Layer**: One task per WebSocket connection, with an
//!   unbounded outbound queue so broadcasts never block on a slow peer
//! - **Persistence**: SQLite via sqlx with embedded migrations
//!
//! Session state lives in the database; connection state lives in an
//! in-memory registry and disappears when the process restarts.
//!
//! # Thread Safety
//!
//! - **Registry**: `Arc<Mutex<HashMap>>` guarded maps, locks never held
//!   across await points
//! - **Broadcast**: per-connection `mpsc::UnboundedSender` handles are
//!   cloned out under the lock and sent to outside it
//! - **Database**: sqlx pool handles concurrent access
//!
//! # Error Handling
//!
//! The library uses Rust's standard error handling:
//!
//! - `Result<T, E>` for fallible operations
//! - `ApiError` in `error` maps domain failures onto HTTP responses
//! - Socket-side failures become `error` events on the offending
//!   connection instead of tearing the socket down
//!
//! # See Also
//!
//! - [README.md](../README.md) - Project overview and quick start
//! - Module-level documentation for specific features

/// Domain types shared across the crate
pub mod model;

/// SQLite persistence for sessions, chat, and materials
pub mod store;

/// JWT issuing and verification
pub mod auth;

/// Token middleware and role gates
pub mod middleware;

/// Realtime signaling over WebSocket
pub mod signaling;

/// HTTP handlers for live-session management
pub mod live;

/// Server configuration, state, and initialization
pub mod server;

/// Router assembly
pub mod routes;

/// API error type and HTTP mapping
pub mod error;

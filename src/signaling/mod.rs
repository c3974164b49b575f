//! Real-time Signaling Module
//!
//! This module carries the live side of a class session: the WebSocket
//! endpoint students and teachers connect to, the event protocol spoken
//! over it, and the in-memory state that routes events between peers.
//!
//! # Architecture
//!
//! The signaling module is organized into focused submodules:
//!
//! - **`protocol`** - Tagged JSON event types (client and server sides)
//! - **`registry`** - Live connection table with per-connection queues
//! - **`service`** - Unicast/broadcast delivery and per-session sequencing
//! - **`sdp`** - Opus audio constraint transform for relayed SDP
//! - **`socket`** - WebSocket upgrade handler and per-connection task
//!
//! # Module Structure
//!
//! ```text
//! signaling/
//! ├── mod.rs       - Module exports and documentation
//! ├── protocol.rs  - Wire event definitions
//! ├── registry.rs  - Connection registry
//! ├── service.rs   - Delivery layer
//! ├── sdp.rs       - SDP audio rewriting
//! └── socket.rs    - Socket lifecycle and event dispatch
//! ```
//!
//! # Delivery Model
//!
//! Every connection owns an unbounded outbound queue; the socket task is
//! the only writer to the underlying WebSocket. Handlers and HTTP routes
//! push events onto queues through [`SignalingService`], so a slow client
//! never blocks a broadcast.

/// Wire event definitions
pub mod protocol;

/// Live connection table
pub mod registry;

/// SDP audio rewriting
pub mod sdp;

/// Unicast/broadcast delivery and sequencing
pub mod service;

/// Socket lifecycle and event dispatch
pub mod socket;

// Re-export commonly used types and functions
pub use protocol::{ClientEvent, ServerEvent, SessionDescription};
pub use registry::{ConnectionInfo, ConnectionRegistry};
pub use sdp::constrain_opus_audio;
pub use service::SignalingService;
pub use socket::ws_handler;

/// Identifier of one WebSocket connection, minted at accept time
pub type ConnId = uuid::Uuid;

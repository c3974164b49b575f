//! Domain Model Module
//!
//! Data types for live class sessions: the session document itself, its
//! materials, chat messages, and the participant roles. These types are
//! shared between the store, the HTTP handlers, and the signaling
//! protocol, and serialize to the camelCase wire form clients expect.

/// Live session document, materials, roles
pub mod session;

/// In-session chat messages
pub mod chat;

// Re-export commonly used types
pub use session::{LiveSession, Material, NetworkQuality, Role};
pub use chat::ChatMessage;

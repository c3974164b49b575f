//! Persistence Module
//!
//! Durable state for live sessions. Three collaborators, all injected
//! through app state:
//!
//! - **`sessions`** - session documents, lifecycle transitions, the
//!   participant set, the understood counter, material descriptors
//! - **`chat`** - per-session chat log
//! - **`materials`** - local-disk file storage for uploaded materials
//!
//! Sessions and chat share one SQLite pool; schema lives in the
//! embedded migrations.

/// Session document store
pub mod sessions;

/// Per-session chat log
pub mod chat;

/// Material file storage
pub mod materials;

// Re-export commonly used types
pub use sessions::{NewSession, SessionStore};
pub use chat::ChatLog;
pub use materials::MaterialStorage;

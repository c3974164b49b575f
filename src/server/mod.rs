//! Server Module
//!
//! Configuration, shared state and application assembly.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── config.rs - Environment configuration and database setup
//! ├── state.rs  - Shared application state
//! └── init.rs   - Application assembly
//! ```

/// Environment configuration and database setup
pub mod config;

/// Application assembly
pub mod init;

/// Shared application state
pub mod state;

// Re-export commonly used types and functions
pub use config::{connect_database, ServerConfig};
pub use init::create_app;
pub use state::AppState;

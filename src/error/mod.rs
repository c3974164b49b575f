//! Service Error Module
//!
//! This module defines the error taxonomy for the live-session service.
//! The same variants back both surfaces: HTTP handlers convert them to
//! status codes and JSON bodies, the signaling dispatch converts them to
//! per-connection `error` events.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `NotFound` - Missing session or sub-resource (404)
//! - `Unauthorized` - Missing or invalid token (401)
//! - `Forbidden` - Authenticated but not allowed (403)
//! - `InvalidState` - Lifecycle state forbids the operation (400)
//! - `Validation` - Malformed request input (400)
//! - `Unavailable` - Requested peer not connected (503)
//! - `Database` / `Internal` - Server-side failures (500, details logged)

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;

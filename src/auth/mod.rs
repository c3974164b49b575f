//! Authentication Module
//!
//! JWT claims verification for the identity boundary. Tokens are minted
//! by the platform's auth service; this module only verifies them and
//! exposes the decoded claims to the HTTP middleware and the WebSocket
//! handshake.

/// JWT token creation and verification
pub mod tokens;

// Re-export commonly used types
pub use tokens::{create_token, verify_token, Claims};

//! Middleware Module
//!
//! Request middleware for the HTTP surface: token authentication and
//! role guards.

/// Authentication middleware and role guards
pub mod auth;

// Re-export commonly used types
pub use auth::{auth_middleware, require_student, require_teacher, AuthUser, AuthenticatedUser};

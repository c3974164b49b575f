//! Live Session HTTP Module
//!
//! The HTTP surface of the live-class system: scheduling, lifecycle
//! transitions, slide control, material uploads and the read endpoints
//! backing the teacher dashboard and the student app.
//!
//! Everything stateful lives in the store and signaling layers; these
//! handlers validate, load, mutate and broadcast.

/// HTTP handlers and their request/response types
pub mod handlers;

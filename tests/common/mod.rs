//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database test fixtures
//! - Application and live-server fixtures
//! - Authentication test helpers
//! - WebSocket client helpers

#![allow(dead_code)]

pub mod auth_helpers;
pub mod database;
pub mod server;
pub mod ws;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use database::*;
pub use server::*;
pub use ws::*;

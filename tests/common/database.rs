//! Database test fixtures and utilities
//!
//! Provides a throwaway SQLite database per test, created in a temp
//! directory and migrated through the same path the server uses.

use sqlx::SqlitePool;
use tempfile::TempDir;

use classlive::server::connect_database;

/// Test database fixture
///
/// Owns the temp directory holding the database file, so the file
/// lives exactly as long as the fixture.
pub struct TestDatabase {
    pool: SqlitePool,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a new migrated test database
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("classlive-test.db");
        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = connect_database(&database_url)
            .await
            .expect("Failed to open test database");

        Self { pool, _dir: dir }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/**
 * Server Configuration
 *
 * This module handles loading of server configuration and opening the
 * SQLite database behind the session store and chat log.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development:
 *
 * - `SERVER_PORT` - Listen port (default 8928)
 * - `DATABASE_URL` - SQLite database URL (default `sqlite://classlive.db?mode=rwc`)
 * - `MEDIA_ROOT` - Directory for uploaded session materials (default `media`)
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

const DEFAULT_PORT: u16 = 8928;
const DEFAULT_DATABASE_URL: &str = "sqlite://classlive.db?mode=rwc";
const DEFAULT_MEDIA_ROOT: &str = "media";

/// Runtime configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub media_root: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let media_root = std::env::var("MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MEDIA_ROOT));

        Self {
            port,
            database_url,
            media_root,
        }
    }
}

/// Open the SQLite pool and run migrations
///
/// This function:
/// 1. Parses the database URL into connection options
/// 2. Enables WAL journaling, foreign keys and a busy timeout
/// 3. Creates the connection pool
/// 4. Runs the embedded migrations
///
/// # Errors
///
/// Returns the underlying sqlx error if the URL is invalid, the pool
/// cannot be opened or a migration fails.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {:?}", e);
        sqlx::Error::Migrate(Box::new(e))
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

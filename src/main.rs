/**
 * ClassLive Server Entry Point
 *
 * This is the main entry point for the ClassLive backend server.
 * It initializes the Axum HTTP server with the live-session signaling
 * channel and management API.
 */

use classlive::server::{connect_database, create_app, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    // Initialize tracing with DEBUG level by default
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug".to_string());

    eprintln!("[STARTUP] Setting RUST_LOG={}", env_filter);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    eprintln!("[STARTUP] Tracing initialized");
    tracing::warn!("[STARTUP] Server initialization started");

    let config = ServerConfig::from_env();

    // Connect to the database and run migrations
    let pool = connect_database(&config.database_url).await?;
    eprintln!("[STARTUP] Database ready at {}", config.database_url);

    // Create the Axum app
    let app = create_app(pool, config.media_root);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    eprintln!("[STARTUP] Starting server on {}", addr);
    tracing::warn!("Starting server on {}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("[STARTUP] Listening on {}", addr);
    eprintln!("[STARTUP] Clients should connect to http://127.0.0.1:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}

//! Application fixtures
//!
//! Two ways to stand the app up for a test:
//!
//! - [`TestApp`] drives the router in-process through `axum_test`,
//!   which is enough for the HTTP surface.
//! - [`LiveServer`] binds a real listener on an ephemeral port so
//!   WebSocket clients can connect through an actual upgrade.

use axum_test::TestServer;
use tempfile::TempDir;

use classlive::server::create_app;

use super::database::TestDatabase;

/// In-process application fixture for HTTP tests
pub struct TestApp {
    pub server: TestServer,
    pub db: TestDatabase,
    _media: TempDir,
}

impl TestApp {
    /// Create the full application over a fresh database and media root
    pub async fn spawn() -> Self {
        let db = TestDatabase::new().await;
        let media = tempfile::tempdir().expect("Failed to create media dir");

        let app = create_app(db.pool().clone(), media.path().to_path_buf());
        let server = TestServer::new(app).expect("Failed to start test server");

        Self {
            server,
            db,
            _media: media,
        }
    }
}

/// Listening application fixture for WebSocket tests
pub struct LiveServer {
    pub addr: std::net::SocketAddr,
    pub db: TestDatabase,
    _media: TempDir,
}

impl LiveServer {
    /// Bind the app on an ephemeral local port and serve it in the background
    pub async fn spawn() -> Self {
        let db = TestDatabase::new().await;
        let media = tempfile::tempdir().expect("Failed to create media dir");

        let app = create_app(db.pool().clone(), media.path().to_path_buf());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            addr,
            db,
            _media: media,
        }
    }

    /// Signaling endpoint URL carrying the token as a query parameter
    pub fn ws_url(&self, token: &str) -> String {
        format!("ws://{}/live-session?token={}", self.addr, token)
    }
}

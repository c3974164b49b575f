//! WebSocket client helpers
//!
//! A thin wrapper over `tokio-tungstenite` that speaks the signaling
//! envelope, with timeouts so a missing broadcast fails the test
//! instead of hanging it.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Signaling client connected to a [`LiveServer`](super::server::LiveServer)
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Connect and complete the WebSocket upgrade
    pub async fn connect(url: &str) -> Self {
        let (stream, _response) = connect_async(url).await.expect("Failed to connect");
        Self { stream }
    }

    /// Try to connect, returning the handshake error instead of panicking
    pub async fn try_connect(
        url: &str,
    ) -> Result<Self, tokio_tungstenite::tungstenite::Error> {
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Send one event envelope
    pub async fn send(&mut self, event: &str, data: Value) {
        let frame = serde_json::json!({ "event": event, "data": data });
        self.stream
            .send(Message::Text(frame.to_string()))
            .await
            .expect("Failed to send frame");
    }

    /// Send a raw text frame, bypassing the envelope
    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string()))
            .await
            .expect("Failed to send frame");
    }

    /// Receive the next event envelope, skipping transport frames
    pub async fn recv(&mut self) -> Value {
        loop {
            let message = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for an event")
                .expect("Connection closed")
                .expect("Transport error");

            match message {
                Message::Text(text) => {
                    return serde_json::from_str(&text).expect("Frame is not valid JSON")
                }
                Message::Ping(_) | Message::Pong(_) => continue,
                other => panic!("Unexpected frame: {:?}", other),
            }
        }
    }

    /// Receive envelopes until one matches `event`, returning its data
    ///
    /// Other events are discarded, which keeps tests robust against
    /// broadcast interleaving.
    pub async fn recv_event(&mut self, event: &str) -> Value {
        loop {
            let frame = self.recv().await;
            if frame["event"] == event {
                return frame["data"].clone();
            }
        }
    }

    /// Close the connection and let the server observe the disconnect
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

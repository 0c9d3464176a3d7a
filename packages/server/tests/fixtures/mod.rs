//! Integration test fixtures.
//!
//! Runs the real server in-process on an ephemeral port with a temporary
//! history directory and no operator console.

#![allow(dead_code)]

use std::{net::SocketAddr, path::Path, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::ServerConfig;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::{net::TcpListener, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Test server handle that shuts the server down on drop
pub struct TestServer {
    addr: SocketAddr,
    history_dir: TempDir,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a server
    pub async fn start() -> Self {
        Self::start_with(None).await
    }

    /// Start a server whose operator messages target `operator_room`
    pub async fn start_with(operator_room: Option<&str>) -> Self {
        let history_dir = tempfile::tempdir().expect("Failed to create history dir");
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let config = ServerConfig {
            host: addr.ip().to_string(),
            port: addr.port(),
            history_dir: history_dir.path().to_path_buf(),
            operator_room: operator_room.map(str::to_string),
            no_console: true,
        };

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = hiroba_server::serve(listener, config, shutdown).await {
                panic!("Server failed: {e}");
            }
        });

        Self {
            addr,
            history_dir,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn history_dir(&self) -> &Path {
        self.history_dir.path()
    }

    /// Open a WebSocket connection to the server
    pub async fn connect(&self) -> TestClient {
        let (stream, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    /// Connect, sign up and sign in as `name` with password `pw`
    pub async fn signed_in(&self, name: &str) -> TestClient {
        let mut client = self.connect().await;
        client.send_event("signup", name, "pw").await;
        client.expect_info("Signup successful").await;
        client.send_event("signin", name, "pw").await;
        client.expect_info("Signin successful").await;
        client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// WebSocket test client speaking the JSON event format
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl TestClient {
    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::text(text.to_string()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send_raw(&value.to_string()).await;
    }

    pub async fn send_event(&mut self, r#type: &str, sender: &str, content: &str) {
        self.send_json(json!({"type": r#type, "sender": sender, "content": content}))
            .await;
    }

    /// Receive the next event, panicking after a timeout
    pub async fn recv(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for event")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Invalid JSON from server");
            }
        }
    }

    /// Whether no event arrives within `wait`
    pub async fn is_silent_for(&mut self, wait: Duration) -> bool {
        tokio::time::timeout(wait, self.stream.next()).await.is_err()
    }

    pub async fn expect_info(&mut self, content: &str) {
        let event = self.recv().await;
        assert_eq!(event["type"], "info", "unexpected event: {event}");
        assert_eq!(event["content"], content);
    }

    pub async fn expect_error(&mut self, content: &str) {
        let event = self.recv().await;
        assert_eq!(event["type"], "error", "unexpected event: {event}");
        assert_eq!(event["content"], content);
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

//! Shared test fixtures.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::sleep;

/// A real server instance running on a local port for the duration of a test.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Boot the server on `port` and wait until it accepts connections.
    pub async fn start(port: u16) -> Self {
        tokio::spawn(async move {
            naisho::run("127.0.0.1", port)
                .await
                .expect("server failed to start");
        });

        // Wait for the listener to come up
        for _ in 0..100 {
            if TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
                return Self { port };
            }
            sleep(Duration::from_millis(50)).await;
        }
        panic!("server on port {port} did not become ready");
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    #[allow(dead_code)]
    pub fn ws_url(&self, username: &str) -> String {
        format!("ws://127.0.0.1:{}/ws?username={}", self.port, username)
    }
}

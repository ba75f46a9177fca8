//! Shared harness for the integration tests.
//!
//! Starts a real server on an ephemeral loopback port and speaks to it over
//! HTTP and WebSocket.

use futures::{SinkExt, StreamExt};
use pairdebug_core::config::GatewayConfig;
use pairdebug_gateway::{ClientEvent, Gateway, ServerEvent};
use pairdebug_providers::CompletionProvider;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// A WebSocket client connected to the relay.
pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A running server; stopped when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub gateway: Arc<Gateway>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by `provider`.
    pub async fn start(provider: Arc<dyn CompletionProvider>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let gateway = Arc::new(Gateway::new(GatewayConfig::default(), provider));
        let (tx, rx) = oneshot::channel::<()>();

        let serving = gateway.clone();
        let handle = tokio::spawn(async move {
            serving
                .serve(listener, async move {
                    let _ = rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            gateway,
            shutdown: Some(tx),
            handle,
        }
    }

    /// HTTP URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Open a relay connection and wait until the server registered it.
    pub async fn connect(&self) -> WsClient {
        let before = self.gateway.relay().connection_count();
        let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws", self.addr))
            .await
            .unwrap();
        wait_for(|| self.gateway.relay().connection_count() > before).await;
        ws
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

/// Poll `condition` until it holds, panicking after two seconds.
pub async fn wait_for(condition: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        if tokio::time::Instant::now() > deadline {
            panic!("condition not reached within 2s");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Send a client event as a text frame.
pub async fn send_event(ws: &mut WsClient, event: &ClientEvent) {
    let text = serde_json::to_string(event).unwrap();
    ws.send(Message::Text(text)).await.unwrap();
}

/// Next server event, or `None` if nothing arrives within `wait`.
pub async fn next_event(ws: &mut WsClient, wait: Duration) -> Option<ServerEvent> {
    let deadline = tokio::time::Instant::now() + wait;
    loop {
        let frame = tokio::time::timeout_at(deadline, ws.next()).await.ok()??;
        match frame.ok()? {
            Message::Text(text) => return Some(serde_json::from_str(&text).unwrap()),
            Message::Close(_) => return None,
            _ => continue,
        }
    }
}

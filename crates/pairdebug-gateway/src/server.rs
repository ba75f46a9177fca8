//! HTTP and WebSocket server.

use crate::debugger::Debugger;
use crate::error::GatewayError;
use crate::handlers::{debug_handler, health_handler, liveness_handler};
use crate::protocol::ClientEvent;
use crate::relay::{Inbox, RoomRelay};
use crate::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::Method,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use pairdebug_core::config::{BindMode, GatewayConfig};
use pairdebug_core::ConnectionId;
use pairdebug_providers::CompletionProvider;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Shared server state, handed to every handler.
pub struct GatewayState {
    /// Room relay hub.
    pub relay: RoomRelay,

    /// Debug service.
    pub debugger: Debugger,

    /// Configuration.
    pub config: GatewayConfig,

    /// Server start time.
    pub started_at: Instant,
}

/// The pairdebug server.
pub struct Gateway {
    state: Arc<GatewayState>,
}

impl Gateway {
    /// Create a server backed by a completion provider.
    pub fn new(config: GatewayConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        let state = Arc::new(GatewayState {
            relay: RoomRelay::new(),
            debugger: Debugger::new(provider),
            config,
            started_at: Instant::now(),
        });

        Self { state }
    }

    /// The room relay owned by this server.
    pub fn relay(&self) -> &RoomRelay {
        &self.state.relay
    }

    /// Bind to the configured address and serve until the process exits.
    pub async fn run(&self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Bind to the configured address and serve until `shutdown` resolves.
    pub async fn run_until(&self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr = self.bind_address();

        if self.state.config.bind != BindMode::Loopback {
            warn!("Server binding to {}; rooms have no authentication", addr);
        }

        let listener = TcpListener::bind(addr).await.map_err(GatewayError::Io)?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let addr = listener.local_addr().map_err(GatewayError::Io)?;
        info!(
            "Starting server on {} (completion provider: {})",
            addr,
            self.state.debugger.provider_name()
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(GatewayError::Io)?;

        info!("Server stopped");
        Ok(())
    }

    /// Build the Axum router.
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .route("/api/test", get(liveness_handler))
            .route("/api/debug", post(debug_handler))
            .route("/health", get(health_handler))
            .route("/ws", get(ws_handler))
            .with_state(self.state.clone());

        if self.state.config.cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST])
                    .allow_headers(Any),
            );
        }

        router.layer(TraceLayer::new_for_http())
    }

    /// Get the bind address.
    fn bind_address(&self) -> SocketAddr {
        let ip = match self.state.config.bind {
            BindMode::Loopback => [127, 0, 0, 1],
            BindMode::Lan => [0, 0, 0, 0],
        };

        SocketAddr::from((ip, self.state.config.port))
    }
}

/// WebSocket upgrade handler.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle one relay connection from upgrade to close.
async fn handle_socket(socket: WebSocket, state: Arc<GatewayState>) {
    let (conn_id, inbox) = state.relay.connect();
    info!("Client connected: {}", conn_id);

    let (sender, mut receiver) = socket.split();
    let writer = tokio::spawn(forward_events(inbox, sender, conn_id.clone()));

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => handle_frame(&state.relay, &conn_id, &text),
            Ok(Message::Close(_)) => {
                debug!("Client {} closed connection", conn_id);
                break;
            }
            Err(e) => {
                warn!("WebSocket error on {}: {}", conn_id, e);
                break;
            }
            _ => {}
        }
    }

    state.relay.disconnect(&conn_id);
    writer.abort();
    info!("Client disconnected: {}", conn_id);
}

/// Drain a connection's inbox into its socket.
async fn forward_events(mut inbox: Inbox, mut sender: SplitSink<WebSocket, Message>, conn_id: ConnectionId) {
    while let Some(event) = inbox.recv().await {
        let text = match serde_json::to_string(&event) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to encode {} for {}: {}", event.name(), conn_id, e);
                continue;
            }
        };

        if sender.send(Message::Text(text)).await.is_err() {
            debug!("Socket for {} closed, stopping writer", conn_id);
            break;
        }
    }
}

/// Decode and apply one client frame. Malformed frames are ignored.
fn handle_frame(relay: &RoomRelay, conn_id: &ConnectionId, text: &str) {
    match ClientEvent::parse(text) {
        Ok(event) => {
            relay.handle(conn_id, event);
        }
        Err(e) => debug!("Ignoring malformed frame from {}: {}", conn_id, e),
    }
}

//! Websocket transport and settings routes.
//!
//! Each websocket client gets a bounded outbound queue drained by its own
//! writer task. The registry only ever `try_send`s into that queue, so the
//! listener thread never waits on a socket.

use crate::{AppError, AppResult, PointerService, config::Config};

use pointer_core::{
    ConnectionHandle, CoreError, CoreResult, HotkeySpec, collaborators::ConnectionSink,
};

use std::{
    future::Future,
    net::SocketAddr,
    panic::Location,
    path::PathBuf,
    sync::Arc,
};

use axum::{
    Json, Router,
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use error_location::ErrorLocation;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{
    net::TcpListener,
    sync::{Mutex, mpsc},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Label stored when the hotkey is reset to its default.
pub(crate) const DEFAULT_HOTKEY_DESCRIPTION: &str = "Main hotkey";

/// Outbound frames buffered per connection before sends start failing.
pub(crate) const CONNECTION_QUEUE_CAPACITY: usize = 64;

/// Shared state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub(crate) service: Arc<PointerService>,
    pub(crate) config: Arc<Mutex<Config>>,
    pub(crate) config_path: PathBuf,
}

impl AppState {
    /// Handlers persist hotkey changes to `config_path`.
    pub fn new(service: Arc<PointerService>, config: Config, config_path: PathBuf) -> Self {
        Self {
            service,
            config: Arc::new(Mutex::new(config)),
            config_path,
        }
    }
}

/// Sending side of one websocket connection.
pub(crate) struct WsSink {
    id: Uuid,
    tx: mpsc::Sender<Arc<str>>,
}

impl WsSink {
    pub(crate) fn new(id: Uuid, tx: mpsc::Sender<Arc<str>>) -> Self {
        Self { id, tx }
    }
}

impl ConnectionSink for WsSink {
    #[track_caller]
    fn send(&self, payload: Arc<str>) -> CoreResult<()> {
        self.tx.try_send(payload).map_err(|e| CoreError::Transport {
            connection_id: self.id,
            reason: format!("Outbound queue unavailable: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Hotkey as exchanged with the settings UI.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HotkeyPayload {
    pub(crate) keys: Vec<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .route("/api/hotkey/current", get(current_hotkey))
        .route("/api/hotkey/set", post(set_hotkey))
        .route("/api/hotkey/reset", post(reset_hotkey))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

/// Bind the server socket on `127.0.0.1:port`. Port 0 picks a free port.
pub async fn bind(port: u16) -> AppResult<TcpListener> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    TcpListener::bind(addr).await.map_err(|e| AppError::Server {
        reason: format!("Failed to bind {}: {}", addr, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Serve on `listener` until `shutdown` resolves.
#[instrument(skip_all)]
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Server listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Server {
            reason: format!("Server stopped: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "connections": state.service.connection_count(),
    }))
}

async fn current_hotkey(State(state): State<AppState>) -> impl IntoResponse {
    let spec = state.service.current_hotkey();
    let config = state.config.lock().await;

    Json(HotkeyPayload {
        keys: spec.to_key_list(),
        description: Some(config.hotkey.description_or(&spec)),
    })
}

async fn set_hotkey(
    State(state): State<AppState>,
    Json(payload): Json<HotkeyPayload>,
) -> Response {
    let spec = match HotkeySpec::from_key_list(&payload.keys) {
        Ok(spec) => spec,
        Err(e) => {
            warn!(keys = ?payload.keys, error = %e, "Rejected hotkey");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response();
        }
    };

    apply_hotkey(&state, spec, payload.description).await
}

async fn reset_hotkey(State(state): State<AppState>) -> Response {
    apply_hotkey(
        &state,
        HotkeySpec::default(),
        Some(DEFAULT_HOTKEY_DESCRIPTION.to_string()),
    )
    .await
}

/// Swap the live hotkey, then persist it. A failed save keeps the live swap.
async fn apply_hotkey(state: &AppState, spec: HotkeySpec, description: Option<String>) -> Response {
    let keys = spec.to_key_list();
    state.service.update_hotkey(spec.clone());

    let mut config = state.config.lock().await;
    config.hotkey.set_spec(&spec, description);
    let description = config.hotkey.description_or(&spec);

    if let Err(e) = config.save(&state.config_path) {
        error!(error = ?e, "Failed to persist hotkey");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response();
    }

    Json(json!({ "success": true, "keys": keys, "description": description })).into_response()
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.service))
}

#[instrument(skip(socket, service))]
async fn handle_socket(socket: WebSocket, service: Arc<PointerService>) {
    let id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::channel::<Arc<str>>(CONNECTION_QUEUE_CAPACITY);
    let (mut ws_tx, mut ws_rx) = socket.split();

    service.register_connection(ConnectionHandle::with_id(id, Arc::new(WsSink::new(id, tx))));

    let mut writer = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            let frame = Message::Text(Utf8Bytes::from(payload.to_string()));
            if let Err(e) = ws_tx.send(frame).await {
                debug!(connection_id = %id, error = %e, "Websocket write failed");
                break;
            }
        }
    });

    let mut reader = tokio::spawn(async move {
        while let Some(message) = ws_rx.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    debug!(connection_id = %id, len = text.as_str().len(), "Client message ignored");
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(connection_id = %id, error = %e, "Websocket read failed");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    service.unregister_connection(id);
}

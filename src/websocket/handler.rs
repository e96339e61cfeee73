use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::services::{BannerController, LocationProvider};
use crate::types::{BannerView, ClientMessage, ServerMessage};
use crate::AppState;

/// Query parameters of the WebSocket endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct WsQuery {
    /// Channel to show; the configured default when absent
    pub channel: Option<String>,
    /// Location the client starts on
    pub location: Option<String>,
}

/// WebSocket upgrade handler.
///
/// Each connection mounts its own banner controller; closing the socket
/// unmounts it.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query))
}

async fn handle_socket(socket: WebSocket, state: AppState, query: WsQuery) {
    let (mut sender, mut receiver) = socket.split();
    let session_id = Uuid::new_v4();

    // Create a channel for sending messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let controller = state.banner_controller(query.channel.as_deref());
    let location = LocationProvider::new(query.location.unwrap_or_else(|| "/".to_string()));
    controller.mount();
    let follow_task = controller.follow(&location);
    info!(
        "Banner session {} connected on '{}'",
        session_id,
        controller.channel()
    );

    // Forward queued messages to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(WsMessage::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Push the banner list to the client whenever it changes
    let channel = controller.channel().to_string();
    let mut banners_rx = controller.watch();
    let snapshot_tx = tx.clone();
    let snapshot_task = tokio::spawn(async move {
        loop {
            let banners: Vec<BannerView> =
                banners_rx.borrow_and_update().iter().map(BannerView::from).collect();
            let msg = ServerMessage::Banners {
                channel: channel.clone(),
                banners,
            };
            if let Ok(json) = serde_json::to_string(&msg) {
                if snapshot_tx.send(json).is_err() {
                    break;
                }
            }
            if banners_rx.changed().await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages
    while let Some(result) = receiver.next().await {
        match result {
            Ok(WsMessage::Text(text)) => {
                debug!("Received message from {}: {}", session_id, text);
                handle_message(&controller, &location, &tx, &text);
            }
            Ok(WsMessage::Close(_)) => {
                info!("Banner session disconnecting: {}", session_id);
                break;
            }
            Ok(WsMessage::Ping(_)) => {
                // Pong is handled automatically by axum
                debug!("Received ping from {}", session_id);
            }
            Err(e) => {
                error!("WebSocket error for {}: {}", session_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up
    follow_task.abort();
    snapshot_task.abort();
    controller.unmount();
    send_task.abort();
    info!("Banner session disconnected: {}", session_id);
}

fn handle_message(
    controller: &BannerController,
    location: &LocationProvider,
    tx: &mpsc::UnboundedSender<String>,
    text: &str,
) {
    let msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            send_error(tx, &format!("Invalid message: {}", e));
            return;
        }
    };

    match msg {
        ClientMessage::Navigate { location: to } => {
            if location.navigate(&to) {
                debug!("Session on '{}' navigated to {}", controller.channel(), to);
            }
        }
        ClientMessage::Dismiss { instance_id } => {
            if !controller.dismiss(instance_id) {
                debug!("Dismiss of unknown banner {}", instance_id);
            }
        }
    }
}

fn send_error(tx: &mpsc::UnboundedSender<String>, error: &str) {
    let msg = ServerMessage::Error {
        error: error.to_string(),
    };
    if let Ok(json) = serde_json::to_string(&msg) {
        let _ = tx.send(json);
    }
}

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Path, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use tracing::debug;

use super::hub::NotificationHub;

pub fn routes(hub: Arc<NotificationHub>) -> Router {
    Router::new()
        .route("/ws/:group", get(ws_upgrade))
        .with_state(hub)
}

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    Path(group): Path<String>,
    State(hub): State<Arc<NotificationHub>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_socket(socket, group, hub))
}

/// Fans group notifications out to the client as `{"message": ...}` JSON
/// frames, and re-publishes any text frame the client sends to its group.
async fn serve_socket(socket: WebSocket, group: String, hub: Arc<NotificationHub>) {
    debug!(group = %group, "notification: websocket connected");

    let mut group_receiver = hub.subscribe(&group).await;
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let mut forward = tokio::spawn(async move {
        while let Ok(message) = group_receiver.recv().await {
            let payload = serde_json::json!({ "message": message }).to_string();
            if ws_sender.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
    });

    let inbound_group = group.clone();
    let inbound_hub = Arc::clone(&hub);
    let mut inbound = tokio::spawn(async move {
        while let Some(Ok(message)) = ws_receiver.next().await {
            if let Message::Text(text) = message {
                inbound_hub.send(&inbound_group, &text).await;
            }
        }
    });

    tokio::select! {
        _ = &mut forward => inbound.abort(),
        _ = &mut inbound => forward.abort(),
    }

    debug!(group = %group, "notification: websocket closed");
}

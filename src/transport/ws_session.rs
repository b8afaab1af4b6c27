use crate::app::state::AppState;
use crate::app::time::now_millis;
use crate::game::types::Variant;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>, variant: Variant) {
    let (mut sender, mut receiver) = socket.split();
    let room = match state.open_session(variant, now_millis()) {
        Ok(room) => room,
        Err(error) => {
            tracing::error!(%error, "failed to start session");
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };
    let session_id = room.id().to_string();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    room.attach(tx).await;
    room.ensure_loop(Arc::clone(&state.textures));

    let send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        let Ok(message) = result else { break };
        match message {
            Message::Text(text) => {
                room.handle_text_message(&text, &state.textures, now_millis())
                    .await;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    room.detach().await;
    state.close_session(&session_id);
    send_task.abort();
}

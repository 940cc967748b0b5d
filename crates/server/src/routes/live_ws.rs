//! WebSocket live feed.
//!
//! A joining viewer first receives `connection_established` with the current
//! summary, then every `move` / `game_over` frame in the order the hub emits them.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    Extension,
};
use chess_core::LiveEvent;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::hub::SharedHub;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Extension(hub): Extension<SharedHub>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: SharedHub) {
    let (mut sender, mut receiver) = socket.split();
    let (joined, mut events) = hub.join().await;
    tracing::info!("Client connected");

    if let Err(e) = send_event(&mut sender, &joined).await {
        tracing::warn!("Failed to send snapshot: {}", e);
        return;
    }

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if let Err(e) = send_event(&mut sender, &event).await {
                        tracing::debug!("Send failed, dropping client: {}", e);
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Client lagged, dropped {} frames", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                // Viewers only listen
                Some(Ok(_)) => continue,
            },
        }
    }

    tracing::info!("Client disconnected");
}

async fn send_event(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    event: &LiveEvent,
) -> anyhow::Result<()> {
    let frame = event.to_frame()?;
    sender.send(Message::Text(frame.into())).await?;
    Ok(())
}

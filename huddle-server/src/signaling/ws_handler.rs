use crate::config::HeartbeatConfig;
use crate::http::AppState;
use crate::registry::RegistryError;
use crate::signaling::SignalingOutput;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientEvent, ConnectionId, ProtocolError, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection = ConnectionId::new();
    info!("New WebSocket connection: {}", connection);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_connection(connection, tx.clone());

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();
        let heartbeat = state.heartbeat;

        async move {
            let mut ticker = tokio::time::interval_at(
                Instant::now() + heartbeat.interval,
                heartbeat.interval,
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_seen = Instant::now();

            loop {
                tokio::select! {
                    frame = receiver.next() => {
                        let Some(Ok(msg)) = frame else { break };
                        last_seen = Instant::now();

                        match msg {
                            Message::Text(text) => {
                                if let Err(e) = handle_frame(&state, connection, text.as_str()).await {
                                    error!("Registry unavailable for {}: {}", connection, e);
                                    break;
                                }
                            }
                            Message::Close(_) => break,
                            _ => {}
                        }
                    }

                    _ = ticker.tick() => {
                        if is_idle(last_seen, &heartbeat) {
                            warn!("Evicting {}: silent for {:?}", connection, last_seen.elapsed());
                            break;
                        }
                        if tx.send(Message::Ping(Bytes::new())).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.signaling.remove_connection(&connection);
    if let Err(e) = state.registry.disconnect(connection).await {
        error!("Failed to report disconnect of {}: {}", connection, e);
    }
    info!("WebSocket disconnected: {}", connection);
}

async fn handle_frame(
    state: &AppState,
    connection: ConnectionId,
    text: &str,
) -> Result<(), RegistryError> {
    match ClientEvent::decode(text) {
        Ok(event) => {
            debug!("{} -> {}", connection, event.name());
            state.registry.dispatch(connection, event).await
        }
        Err(e) => {
            warn!("Invalid event from {}: {}", connection, e);
            state
                .signaling
                .send_event(connection, ServerEvent::error(rejection_message(&e)))
                .await;
            Ok(())
        }
    }
}

fn rejection_message(err: &ProtocolError) -> String {
    match err {
        ProtocolError::UnknownEvent(name) => format!("Unknown event: {}", name),
        ProtocolError::MissingEvent | ProtocolError::Malformed(_) => "Malformed event".to_owned(),
    }
}

fn is_idle(last_seen: Instant, heartbeat: &HeartbeatConfig) -> bool {
    last_seen.elapsed() > heartbeat.idle_timeout
}

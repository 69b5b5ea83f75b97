use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use huddle_core::{ConnectionId, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Writes server events into the per-connection WebSocket writer tasks.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
            }),
        }
    }

    pub fn add_connection(&self, connection: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(connection, tx);
    }

    pub fn remove_connection(&self, connection: &ConnectionId) {
        self.inner.connections.remove(connection);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    fn send_signal(&self, connection: ConnectionId, event: &ServerEvent) {
        let Some(tx) = self.inner.connections.get(&connection) else {
            warn!(
                "Attempted to send {} to disconnected connection {}",
                event.name(),
                connection
            );
            return;
        };

        match event.encode() {
            Ok(json) => {
                if let Err(e) = tx.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", connection, e);
                }
            }
            Err(e) => error!("Failed to serialize server event: {}", e),
        }
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_event(&self, connection: ConnectionId, event: ServerEvent) {
        self.send_signal(connection, &event);
    }
}

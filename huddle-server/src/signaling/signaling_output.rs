use async_trait::async_trait;
use huddle_core::{ConnectionId, ServerEvent};

/// Outbound side of the event channel, as seen by the room registry.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Deliver one event to one connection. Best effort: a vanished connection
    /// is logged and skipped.
    async fn send_event(&self, connection: ConnectionId, event: ServerEvent);
}

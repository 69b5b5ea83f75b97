use crate::error::ClientError;
use async_trait::async_trait;
use huddle_core::ClientEvent;

/// Client-to-relay half of the event channel. The relay-to-client half is an
/// `mpsc::Receiver<ServerEvent>` handed over alongside it; its end means the
/// channel is gone.
#[async_trait]
pub trait EventChannel: Send + Sync {
    async fn emit(&self, event: ClientEvent) -> Result<(), ClientError>;
}

use crate::error::CallFailure;
use crate::media::MediaStream;
use async_trait::async_trait;
use huddle_core::PeerId;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of opening a peer session.
pub struct SessionOpened {
    /// Identifier the media subsystem assigned to this participant.
    pub peer_id: PeerId,
    /// Calls placed to us by other participants.
    pub incoming: mpsc::Receiver<Arc<dyn MediaCall>>,
}

/// Point-to-point media session provider.
///
/// Constructed by the caller and handed to the coordinator, which opens it on
/// entry and disconnects it on leave.
#[async_trait]
pub trait PeerSession: Send + Sync {
    async fn open(&self) -> Result<SessionOpened, CallFailure>;

    async fn call(
        &self,
        remote: &PeerId,
        local: &MediaStream,
    ) -> Result<Arc<dyn MediaCall>, CallFailure>;

    async fn disconnect(&self);
}

/// One call, outbound or inbound.
#[async_trait]
pub trait MediaCall: Send + Sync {
    fn remote(&self) -> &PeerId;

    /// Accept an inbound call, offering our stream.
    async fn answer(&self, local: &MediaStream) -> Result<(), CallFailure>;

    /// Resolves once the remote side's stream arrives.
    async fn remote_stream(&self) -> Result<MediaStream, CallFailure>;

    async fn close(&self);
}

use crate::error::ClientError;
use crate::session::{RoomSnapshot, SessionCommand};
use huddle_core::{PeerId, RoomId};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

/// Owner-side interface to a running coordinator.
#[derive(Clone)]
pub struct SessionHandle {
    room_id: RoomId,
    local_id: PeerId,
    command_tx: mpsc::Sender<SessionCommand>,
    snapshot_rx: watch::Receiver<RoomSnapshot>,
}

impl SessionHandle {
    pub(crate) fn new(
        room_id: RoomId,
        local_id: PeerId,
        command_tx: mpsc::Sender<SessionCommand>,
        snapshot_rx: watch::Receiver<RoomSnapshot>,
    ) -> Self {
        Self {
            room_id,
            local_id,
            command_tx,
            snapshot_rx,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn local_id(&self) -> &PeerId {
        &self.local_id
    }

    /// Flip the local mic. Returns the new state.
    pub async fn toggle_mic(&self) -> Result<bool, ClientError> {
        self.request(|reply| SessionCommand::ToggleMic { reply }).await
    }

    /// Flip the local camera. Returns the new state.
    pub async fn toggle_video(&self) -> Result<bool, ClientError> {
        self.request(|reply| SessionCommand::ToggleVideo { reply }).await
    }

    /// Leave the room. Resolves once every call is closed and the media
    /// session is disconnected.
    pub async fn leave(&self) -> Result<(), ClientError> {
        self.request(|reply| SessionCommand::Leave { reply }).await
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<RoomSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Wait until the snapshot satisfies `predicate`.
    pub async fn wait_for<F>(
        &self,
        timeout: Duration,
        predicate: F,
    ) -> Result<RoomSnapshot, ClientError>
    where
        F: FnMut(&RoomSnapshot) -> bool,
    {
        let mut rx = self.snapshot_rx.clone();

        match tokio::time::timeout(timeout, rx.wait_for(predicate)).await {
            Ok(Ok(snapshot)) => Ok(snapshot.clone()),
            Ok(Err(_)) => Err(ClientError::SessionClosed),
            Err(_) => Err(ClientError::Timeout(timeout)),
        }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, ClientError> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(command(reply))
            .await
            .map_err(|_| ClientError::SessionClosed)?;

        rx.await.map_err(|_| ClientError::SessionClosed)
    }
}

use crate::config::DisconnectPolicy;
use crate::registry::registry_command::RegistryCommand;
use crate::registry::registry_error::RegistryError;
use crate::registry::room_registry::RoomRegistry;
use crate::signaling::SignalingOutput;
use huddle_core::{ClientEvent, ConnectionId, RoomId};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

const COMMAND_BUFFER: usize = 256;

/// Cloneable sender side of the registry actor.
#[derive(Clone)]
pub struct RegistryHandle {
    command_tx: mpsc::Sender<RegistryCommand>,
}

impl RegistryHandle {
    /// Spawn a registry task on the current runtime.
    pub fn spawn(output: Arc<dyn SignalingOutput>, policy: DisconnectPolicy) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let registry = RoomRegistry::new(command_rx, output, policy);
        tokio::spawn(registry.run());

        Self { command_tx }
    }

    pub async fn send(&self, cmd: RegistryCommand) -> Result<(), RegistryError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| RegistryError::RegistryClosed)
    }

    pub async fn dispatch(
        &self,
        connection: ConnectionId,
        event: ClientEvent,
    ) -> Result<(), RegistryError> {
        self.send(RegistryCommand::from_client_event(connection, event))
            .await
    }

    pub async fn disconnect(&self, connection: ConnectionId) -> Result<(), RegistryError> {
        self.send(RegistryCommand::Disconnect { connection }).await
    }

    /// Resolves after every previously sent command has been applied.
    pub async fn members(&self, room_id: &RoomId) -> Result<Vec<ConnectionId>, RegistryError> {
        let (reply, rx) = oneshot::channel();
        self.send(RegistryCommand::Members {
            room_id: room_id.clone(),
            reply,
        })
        .await?;

        rx.await.map_err(|_| RegistryError::RegistryClosed)
    }
}

use crate::config::DisconnectPolicy;
use crate::registry::registry_command::RegistryCommand;
use crate::registry::registry_error::RegistryError;
use crate::registry::room::Room;
use crate::signaling::SignalingOutput;
use huddle_core::{ConnectionId, PeerId, RoomId, ServerEvent};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const JOIN_FAILED: &str = "Failed to join room";

/// Owns every room's member set. Runs as a single task, so membership changes
/// and fan-out are applied strictly in command order.
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    subscriptions: HashMap<ConnectionId, HashSet<RoomId>>,
    command_rx: mpsc::Receiver<RegistryCommand>,
    output: Arc<dyn SignalingOutput>,
    policy: DisconnectPolicy,
}

impl RoomRegistry {
    pub fn new(
        command_rx: mpsc::Receiver<RegistryCommand>,
        output: Arc<dyn SignalingOutput>,
        policy: DisconnectPolicy,
    ) -> Self {
        Self {
            rooms: HashMap::new(),
            subscriptions: HashMap::new(),
            command_rx,
            output,
            policy,
        }
    }

    pub async fn run(mut self) {
        info!("Room registry started (disconnect policy: {:?})", self.policy);

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Room registry finished");
    }

    async fn handle_command(&mut self, cmd: RegistryCommand) {
        match cmd {
            RegistryCommand::Join {
                connection,
                room_id,
                peer_id,
            } => {
                if let Err(e) = self.join(connection, room_id, peer_id).await {
                    warn!("Rejected join-room from {}: {}", connection, e);
                    self.output
                        .send_event(connection, ServerEvent::error(JOIN_FAILED))
                        .await;
                }
            }

            RegistryCommand::ToggleMic {
                connection,
                room_id,
                user_id,
                enabled,
            } => {
                self.subscribe(connection, &room_id, user_id.clone());
                let event = ServerEvent::ToggleMic { user_id, enabled };
                self.broadcast(&room_id, connection, event).await;
            }

            RegistryCommand::ToggleVideo {
                connection,
                room_id,
                user_id,
                enabled,
            } => {
                self.subscribe(connection, &room_id, user_id.clone());
                let event = ServerEvent::ToggleVideo { user_id, enabled };
                self.broadcast(&room_id, connection, event).await;
            }

            RegistryCommand::Leave {
                connection,
                room_id,
                user_id,
            } => {
                info!("{} left room '{}' as {}", connection, room_id, user_id);
                self.unsubscribe(connection, &room_id);
                let event = ServerEvent::UserDisconnected { user_id };
                self.broadcast(&room_id, connection, event).await;
            }

            RegistryCommand::Disconnect { connection } => {
                self.disconnect(connection).await;
            }

            RegistryCommand::Members { room_id, reply } => {
                let members = self
                    .rooms
                    .get(&room_id)
                    .map(Room::members)
                    .unwrap_or_default();
                let _ = reply.send(members);
            }
        }
    }

    async fn join(
        &mut self,
        connection: ConnectionId,
        room_id: Option<RoomId>,
        peer_id: Option<PeerId>,
    ) -> Result<(), RegistryError> {
        let room_id = room_id
            .filter(|id| !id.is_empty())
            .ok_or(RegistryError::InvalidRequest)?;
        let peer_id = peer_id
            .filter(|id| !id.is_empty())
            .ok_or(RegistryError::InvalidRequest)?;

        info!("{} joined room '{}' as {}", connection, room_id, peer_id);

        self.subscribe(connection, &room_id, peer_id.clone());
        self.broadcast(&room_id, connection, ServerEvent::UserConnected(peer_id))
            .await;

        Ok(())
    }

    async fn disconnect(&mut self, connection: ConnectionId) {
        let Some(rooms) = self.subscriptions.remove(&connection) else {
            debug!("{} disconnected without room subscriptions", connection);
            return;
        };

        for room_id in rooms {
            let Some(peer_id) = self.remove_member(connection, &room_id) else {
                continue;
            };

            match self.policy {
                DisconnectPolicy::Announce => {
                    info!(
                        "{} dropped from room '{}', announcing {} as gone",
                        connection, room_id, peer_id
                    );
                    let event = ServerEvent::UserDisconnected { user_id: peer_id };
                    self.broadcast(&room_id, connection, event).await;
                }
                DisconnectPolicy::Silent => {
                    info!("{} dropped from room '{}' silently", connection, room_id);
                }
            }
        }
    }

    fn subscribe(&mut self, connection: ConnectionId, room_id: &RoomId, peer_id: PeerId) {
        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating room '{}'", room_id);
            Room::new()
        });
        room.subscribe(connection, peer_id);

        self.subscriptions
            .entry(connection)
            .or_default()
            .insert(room_id.clone());
    }

    fn unsubscribe(&mut self, connection: ConnectionId, room_id: &RoomId) {
        self.remove_member(connection, room_id);

        if let Some(rooms) = self.subscriptions.get_mut(&connection) {
            rooms.remove(room_id);
            if rooms.is_empty() {
                self.subscriptions.remove(&connection);
            }
        }
    }

    fn remove_member(&mut self, connection: ConnectionId, room_id: &RoomId) -> Option<PeerId> {
        let room = self.rooms.get_mut(room_id)?;
        let peer_id = room.unsubscribe(&connection);

        if room.is_empty() {
            self.rooms.remove(room_id);
            info!("Room '{}' is empty, dropping it", room_id);
        }

        peer_id
    }

    async fn broadcast(&self, room_id: &RoomId, origin: ConnectionId, event: ServerEvent) {
        let Some(room) = self.rooms.get(room_id) else {
            return;
        };

        let targets = room.others(&origin);
        debug!(
            "Broadcasting {} in '{}' to {} member(s)",
            event.name(),
            room_id,
            targets.len()
        );

        for target in targets {
            self.output.send_event(target, event.clone()).await;
        }
    }
}

use huddle_core::{ClientEvent, ConnectionId, PeerId, RoomId};
use tokio::sync::oneshot;

/// Commands delivered to the registry actor by connection tasks.
#[derive(Debug)]
pub enum RegistryCommand {
    /// Subscribe the connection and announce the peer to the rest of the room.
    Join {
        connection: ConnectionId,
        room_id: Option<RoomId>,
        peer_id: Option<PeerId>,
    },

    ToggleMic {
        connection: ConnectionId,
        room_id: RoomId,
        user_id: PeerId,
        enabled: Option<bool>,
    },

    ToggleVideo {
        connection: ConnectionId,
        room_id: RoomId,
        user_id: PeerId,
        enabled: Option<bool>,
    },

    Leave {
        connection: ConnectionId,
        room_id: RoomId,
        user_id: PeerId,
    },

    /// The event channel closed without a prior `leave-room`.
    Disconnect { connection: ConnectionId },

    /// Current subscribers of a room, in no particular order.
    Members {
        room_id: RoomId,
        reply: oneshot::Sender<Vec<ConnectionId>>,
    },
}

impl RegistryCommand {
    pub fn from_client_event(connection: ConnectionId, event: ClientEvent) -> Self {
        match event {
            ClientEvent::JoinRoom { room_id, peer_id } => Self::Join {
                connection,
                room_id,
                peer_id,
            },
            ClientEvent::ToggleMic {
                room_id,
                user_id,
                enabled,
            } => Self::ToggleMic {
                connection,
                room_id,
                user_id,
                enabled,
            },
            ClientEvent::ToggleVideo {
                room_id,
                user_id,
                enabled,
            } => Self::ToggleVideo {
                connection,
                room_id,
                user_id,
                enabled,
            },
            ClientEvent::LeaveRoom { room_id, user_id } => Self::Leave {
                connection,
                room_id,
                user_id,
            },
        }
    }
}

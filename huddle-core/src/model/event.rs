use crate::error::ProtocolError;
use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TAG: &str = "event";

/// Frames a client sends to the relay.
///
/// `join-room` keeps both fields optional so that an incomplete request still
/// decodes and can be answered with an `error` event by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    JoinRoom {
        #[serde(default)]
        room_id: Option<RoomId>,
        #[serde(default)]
        peer_id: Option<PeerId>,
    },
    ToggleMic {
        room_id: RoomId,
        user_id: PeerId,
        /// State after the toggle. Older peers leave it out and expect a flip.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
    },
    ToggleVideo {
        room_id: RoomId,
        user_id: PeerId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
    },
    LeaveRoom {
        room_id: RoomId,
        user_id: PeerId,
    },
}

impl ClientEvent {
    pub const NAMES: [&'static str; 4] = ["join-room", "toggle-mic", "toggle-video", "leave-room"];

    pub fn join(room_id: RoomId, peer_id: PeerId) -> Self {
        Self::JoinRoom {
            room_id: Some(room_id),
            peer_id: Some(peer_id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRoom { .. } => "join-room",
            Self::ToggleMic { .. } => "toggle-mic",
            Self::ToggleVideo { .. } => "toggle-video",
            Self::LeaveRoom { .. } => "leave-room",
        }
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        decode_tagged(text, &Self::NAMES)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Frames the relay sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    UserConnected(PeerId),
    ToggleMic {
        user_id: PeerId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
    },
    ToggleVideo {
        user_id: PeerId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
    },
    UserDisconnected {
        user_id: PeerId,
    },
    Error {
        message: String,
    },
}

impl ServerEvent {
    pub const NAMES: [&'static str; 5] = [
        "user-connected",
        "toggle-mic",
        "toggle-video",
        "user-disconnected",
        "error",
    ];

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::UserConnected(_) => "user-connected",
            Self::ToggleMic { .. } => "toggle-mic",
            Self::ToggleVideo { .. } => "toggle-video",
            Self::UserDisconnected { .. } => "user-disconnected",
            Self::Error { .. } => "error",
        }
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        decode_tagged(text, &Self::NAMES)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn decode_tagged<T: DeserializeOwned>(text: &str, names: &[&str]) -> Result<T, ProtocolError> {
    let value: Value = serde_json::from_str(text)?;

    let name = value
        .get(TAG)
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingEvent)?;

    if !names.contains(&name) {
        return Err(ProtocolError::UnknownEvent(name.to_owned()));
    }

    Ok(serde_json::from_value(value)?)
}

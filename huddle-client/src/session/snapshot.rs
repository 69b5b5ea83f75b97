use crate::error::CallFailure;
use crate::session::ParticipantState;
use huddle_core::{PeerId, RoomId};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Joined,
    /// Left on our own request.
    Left,
    /// The event channel went away underneath us.
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailureRecord {
    pub remote: PeerId,
    pub failure: CallFailure,
}

/// Read-only view of the room as this client sees it.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub local_id: PeerId,
    pub phase: SessionPhase,
    pub participants: BTreeMap<PeerId, ParticipantState>,
    pub call_failures: Vec<CallFailureRecord>,
    pub last_error: Option<String>,
}

impl RoomSnapshot {
    pub fn participant(&self, peer_id: &PeerId) -> Option<&ParticipantState> {
        self.participants.get(peer_id)
    }

    pub fn local(&self) -> Option<&ParticipantState> {
        self.participants.get(&self.local_id)
    }

    /// Every participant except ourselves.
    pub fn remotes(&self) -> impl Iterator<Item = (&PeerId, &ParticipantState)> {
        self.participants
            .iter()
            .filter(|(peer_id, _)| **peer_id != self.local_id)
    }

    pub fn has_remote(&self, peer_id: &PeerId) -> bool {
        *peer_id != self.local_id && self.participants.contains_key(peer_id)
    }
}

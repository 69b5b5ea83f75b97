use huddle_core::{ConnectionId, PeerId};
use std::collections::HashMap;

/// Subscribers of a single room.
///
/// Each connection remembers the last participant id it announced here, which
/// is what gets reported when the connection vanishes without leaving.
#[derive(Debug, Default)]
pub struct Room {
    members: HashMap<ConnectionId, PeerId>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the connection was not subscribed before.
    pub fn subscribe(&mut self, connection: ConnectionId, peer_id: PeerId) -> bool {
        self.members.insert(connection, peer_id).is_none()
    }

    pub fn unsubscribe(&mut self, connection: &ConnectionId) -> Option<PeerId> {
        self.members.remove(connection)
    }

    pub fn contains(&self, connection: &ConnectionId) -> bool {
        self.members.contains_key(connection)
    }

    /// Everyone except `connection`.
    pub fn others(&self, connection: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .keys()
            .filter(|member| *member != connection)
            .copied()
            .collect()
    }

    pub fn members(&self) -> Vec<ConnectionId> {
        self.members.keys().copied().collect()
    }

    pub fn peer_of(&self, connection: &ConnectionId) -> Option<&PeerId> {
        self.members.get(connection)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

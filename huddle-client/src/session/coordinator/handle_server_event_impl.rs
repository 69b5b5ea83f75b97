use huddle_core::{PeerId, ServerEvent};
use tracing::{debug, info, warn};

use crate::session::participant::apply_toggle;
use crate::session::{SessionCoordinator, Track};

impl SessionCoordinator {
    pub(super) async fn handle_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::UserConnected(peer_id) => self.on_user_connected(peer_id).await,

            ServerEvent::ToggleMic { user_id, enabled } => {
                self.on_remote_toggle(user_id, Track::Mic, enabled)
            }

            ServerEvent::ToggleVideo { user_id, enabled } => {
                self.on_remote_toggle(user_id, Track::Video, enabled)
            }

            ServerEvent::UserDisconnected { user_id } => self.on_user_disconnected(user_id).await,

            ServerEvent::Error { message } => {
                warn!("Relay reported an error: {}", message);
                self.last_error = Some(message);
            }
        }
    }

    async fn on_user_connected(&mut self, peer_id: PeerId) {
        if peer_id == self.local_id {
            debug!("Ignoring announcement of ourselves");
            return;
        }

        info!("{} joined, calling", peer_id);
        self.close_calls_with(&peer_id).await;

        let handle = self.calls.call(peer_id.clone(), &self.local_stream);
        self.pending_calls.insert(peer_id, handle);
    }

    fn on_remote_toggle(&mut self, peer_id: PeerId, track: Track, enabled: Option<bool>) {
        if peer_id == self.local_id {
            debug!("Ignoring {:?} toggle addressed as ourselves", track);
            return;
        }

        let Some(state) = self.participants.get_mut(&peer_id) else {
            debug!("{:?} toggle for unknown participant {}", track, peer_id);
            return;
        };

        apply_toggle(state.flag_mut(track), enabled);
        debug!("{} {:?} is now {}", peer_id, track, state.flag(track));
    }

    async fn on_user_disconnected(&mut self, peer_id: PeerId) {
        if peer_id == self.local_id {
            return;
        }

        info!("{} left", peer_id);
        self.close_calls_with(&peer_id).await;

        if self.participants.remove(&peer_id).is_none() {
            debug!("{} had no participant entry", peer_id);
        }
    }
}

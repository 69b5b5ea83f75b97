use std::ops::ControlFlow;

use huddle_core::ClientEvent;
use tracing::{error, info, warn};

use crate::session::{SessionCommand, SessionCoordinator, SessionPhase, Track};

impl SessionCoordinator {
    pub(super) async fn handle_command(&mut self, cmd: SessionCommand) -> ControlFlow<()> {
        match cmd {
            SessionCommand::ToggleMic { reply } => {
                let enabled = self.toggle_local(Track::Mic).await;
                let _ = reply.send(enabled);
            }

            SessionCommand::ToggleVideo { reply } => {
                let enabled = self.toggle_local(Track::Video).await;
                let _ = reply.send(enabled);
            }

            SessionCommand::Leave { reply } => {
                self.leave().await;
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Flip our own flag and tell the room the new value.
    async fn toggle_local(&mut self, track: Track) -> bool {
        let Some(local) = self.participants.get_mut(&self.local_id) else {
            error!("Local participant entry is missing");
            return false;
        };

        let flag = local.flag_mut(track);
        *flag = !*flag;
        let enabled = *flag;
        info!("Local {:?} is now {}", track, if enabled { "on" } else { "off" });

        let room_id = self.room_id.clone();
        let user_id = self.local_id.clone();
        let event = match track {
            Track::Mic => ClientEvent::ToggleMic {
                room_id,
                user_id,
                enabled: Some(enabled),
            },
            Track::Video => ClientEvent::ToggleVideo {
                room_id,
                user_id,
                enabled: Some(enabled),
            },
        };

        if let Err(e) = self.channel.emit(event).await {
            warn!("Failed to announce {:?} toggle: {}", track, e);
            self.last_error = Some(e.to_string());
        }

        enabled
    }

    pub(super) async fn leave(&mut self) {
        info!("Leaving room '{}'", self.room_id);

        let event = ClientEvent::LeaveRoom {
            room_id: self.room_id.clone(),
            user_id: self.local_id.clone(),
        };
        if let Err(e) = self.channel.emit(event).await {
            warn!("Failed to announce leave: {}", e);
        }

        self.teardown(SessionPhase::Left).await;
    }
}

use std::sync::Arc;

use tracing::{debug, info};

use crate::call::CallEvent;
use crate::media::MediaCall;
use crate::session::{ParticipantState, SessionCoordinator};

impl SessionCoordinator {
    pub(super) async fn accept_call(&mut self, inbound: Arc<dyn MediaCall>) {
        let remote = inbound.remote().clone();

        if let Some(previous) = self.pending_calls.remove(&remote) {
            self.calls.close(&previous).await;
        }

        let handle = self.calls.accept(inbound, &self.local_stream);
        self.pending_calls.insert(remote, handle);
    }

    pub(super) async fn handle_call_event(&mut self, event: CallEvent) {
        let remote = event.remote().clone();

        let is_current = self
            .pending_calls
            .get(&remote)
            .is_some_and(|handle| handle.id() == event.call());
        if !is_current {
            debug!("Ignoring stale {} with {}", event.call(), remote);
            return;
        }
        let Some(handle) = self.pending_calls.remove(&remote) else {
            return;
        };

        match event {
            CallEvent::Established { stream, .. } => {
                info!("Stream from {} arrived on {}", remote, handle.id());

                let (mic, video) = (self.config.initial_mic_on, self.config.initial_video_on);
                let state = self
                    .participants
                    .entry(remote)
                    .or_insert_with(|| ParticipantState::new(None, mic, video));

                state.stream = Some(stream);
                if let Some(previous) = state.call.replace(handle) {
                    self.calls.close(&previous).await;
                }
            }

            CallEvent::Failed { failure, .. } => {
                self.calls.close(&handle).await;
                self.record_failure(remote, failure);
            }
        }
    }
}

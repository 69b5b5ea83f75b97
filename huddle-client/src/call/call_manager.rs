use crate::call::{CallDirection, CallEvent, CallHandle, CallId, CallSlot};
use crate::error::CallFailure;
use crate::media::{MediaCall, MediaStream, PeerSession};
use huddle_core::PeerId;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const EVENT_BUFFER: usize = 32;

/// Dials and answers calls over a [`PeerSession`]. Negotiation (dial or
/// answer, then the remote stream) runs in a task per call, bounded by
/// `call_timeout`, and ends in one [`CallEvent`]. A failed call is left to
/// its owner to close.
pub struct PeerCallManager {
    session: Arc<dyn PeerSession>,
    events_tx: mpsc::Sender<CallEvent>,
    call_timeout: Duration,
}

enum Negotiation {
    Dial(Arc<dyn PeerSession>),
    Answer(Arc<dyn MediaCall>),
}

impl PeerCallManager {
    pub fn new(
        session: Arc<dyn PeerSession>,
        call_timeout: Duration,
    ) -> (Self, mpsc::Receiver<CallEvent>) {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let manager = Self {
            session,
            events_tx,
            call_timeout,
        };
        (manager, events_rx)
    }

    /// Start dialing `remote`. Returns at once; the outcome arrives as a
    /// [`CallEvent`].
    pub fn call(&self, remote: PeerId, local: &MediaStream) -> CallHandle {
        info!("Calling {}", remote);

        self.negotiate(
            remote,
            CallSlot::default(),
            local.clone(),
            CallDirection::Outbound,
            Negotiation::Dial(self.session.clone()),
        )
    }

    /// Start answering `inbound`. Returns at once; the outcome arrives as a
    /// [`CallEvent`].
    pub fn accept(&self, inbound: Arc<dyn MediaCall>, local: &MediaStream) -> CallHandle {
        let remote = inbound.remote().clone();
        info!("Answering call from {}", remote);

        self.negotiate(
            remote,
            CallSlot::with_media(inbound.clone()),
            local.clone(),
            CallDirection::Inbound,
            Negotiation::Answer(inbound),
        )
    }

    pub async fn close(&self, handle: &CallHandle) {
        if handle.close().await {
            debug!("Closed {} with {}", handle.id(), handle.remote());
        }
    }

    fn negotiate(
        &self,
        remote: PeerId,
        slot: CallSlot,
        local: MediaStream,
        direction: CallDirection,
        negotiation: Negotiation,
    ) -> CallHandle {
        let id = CallId::next();
        let call_timeout = self.call_timeout;
        let events_tx = self.events_tx.clone();
        let task_slot = slot.clone();
        let task_remote = remote.clone();

        let task = tokio::spawn(async move {
            let remote = task_remote;
            let negotiated = async {
                let call = match negotiation {
                    Negotiation::Dial(session) => {
                        let call = session.call(&remote, &local).await?;
                        if !task_slot.attach(call.clone()).await {
                            return Ok(None);
                        }
                        call
                    }
                    Negotiation::Answer(call) => {
                        call.answer(&local).await?;
                        call
                    }
                };
                let stream = call.remote_stream().await?;
                Ok::<_, CallFailure>(Some(stream))
            };

            let outcome = tokio::time::timeout(call_timeout, negotiated)
                .await
                .unwrap_or(Err(CallFailure::Timeout));

            let event = match outcome {
                Ok(Some(stream)) => CallEvent::Established {
                    call: id,
                    remote,
                    stream,
                },
                Ok(None) => {
                    debug!("{} with {} closed while dialing", id, remote);
                    return;
                }
                Err(failure) => {
                    warn!("{} with {} failed: {}", id, remote, failure);
                    CallEvent::Failed {
                        call: id,
                        remote,
                        failure,
                    }
                }
            };

            let _ = events_tx.send(event).await;
        });

        CallHandle::new(id, remote, direction, slot, task.abort_handle())
    }
}

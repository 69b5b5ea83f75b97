use crate::call::{CallEvent, CallHandle, PeerCallManager};
use crate::channel::EventChannel;
use crate::config::ClientConfig;
use crate::error::{CallFailure, ClientError};
use crate::media::{LocalCapture, MediaCall, MediaStream, PeerSession, SessionOpened};
use crate::session::{
    CallFailureRecord, ParticipantState, RoomSnapshot, SessionCommand, SessionHandle, SessionPhase,
};
use huddle_core::{ClientEvent, PeerId, RoomId, ServerEvent};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

mod handle_call_event_impl;
mod handle_command_impl;
mod handle_server_event_impl;

const COMMAND_BUFFER: usize = 16;

/// Collaborators a session is entered with.
pub struct SessionParts {
    pub capture: Arc<dyn LocalCapture>,
    pub session: Arc<dyn PeerSession>,
    pub channel: Arc<dyn EventChannel>,
    /// Relay-to-client half of `channel`.
    pub events: mpsc::Receiver<ServerEvent>,
}

/// Client side of one room: owns the participant map, the calls and the
/// peer session, and runs as a single task.
pub struct SessionCoordinator {
    room_id: RoomId,
    local_id: PeerId,
    local_stream: MediaStream,
    config: ClientConfig,
    phase: SessionPhase,
    participants: HashMap<PeerId, ParticipantState>,
    /// Calls still waiting for their remote stream, by remote peer.
    pending_calls: HashMap<PeerId, CallHandle>,
    call_failures: Vec<CallFailureRecord>,
    last_error: Option<String>,
    channel: Arc<dyn EventChannel>,
    session: Arc<dyn PeerSession>,
    calls: PeerCallManager,
    server_rx: mpsc::Receiver<ServerEvent>,
    incoming_rx: mpsc::Receiver<Arc<dyn MediaCall>>,
    call_rx: mpsc::Receiver<CallEvent>,
    command_rx: mpsc::Receiver<SessionCommand>,
    snapshot_tx: watch::Sender<RoomSnapshot>,
}

impl SessionCoordinator {
    /// Acquire local media, open the peer session, announce ourselves in
    /// `room_id` and start the coordinator task.
    ///
    /// Nothing is emitted on the channel unless both the local stream and
    /// the peer session are available.
    pub async fn enter(
        room_id: RoomId,
        parts: SessionParts,
        config: ClientConfig,
    ) -> Result<SessionHandle, ClientError> {
        let SessionParts {
            capture,
            session,
            channel,
            events,
        } = parts;

        let local_stream = capture.acquire().await?;
        debug!("Local stream {} acquired", local_stream.id());

        let SessionOpened { peer_id, incoming } = session.open().await?;
        info!("Peer session open as {}", peer_id);

        let (calls, call_rx) = PeerCallManager::new(session.clone(), config.call_timeout);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);

        let mut participants = HashMap::new();
        participants.insert(
            peer_id.clone(),
            ParticipantState::new(
                Some(local_stream.clone()),
                config.initial_mic_on,
                config.initial_video_on,
            ),
        );

        let initial = RoomSnapshot {
            room_id: room_id.clone(),
            local_id: peer_id.clone(),
            phase: SessionPhase::Joined,
            participants: participants
                .iter()
                .map(|(id, state)| (id.clone(), state.clone()))
                .collect(),
            call_failures: Vec::new(),
            last_error: None,
        };
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let coordinator = Self {
            room_id: room_id.clone(),
            local_id: peer_id.clone(),
            local_stream,
            config,
            phase: SessionPhase::Joined,
            participants,
            pending_calls: HashMap::new(),
            call_failures: Vec::new(),
            last_error: None,
            channel,
            session,
            calls,
            server_rx: events,
            incoming_rx: incoming,
            call_rx,
            command_rx,
            snapshot_tx,
        };

        let join = ClientEvent::join(room_id.clone(), peer_id.clone());
        if let Err(e) = coordinator.channel.emit(join).await {
            coordinator.session.disconnect().await;
            return Err(e);
        }
        info!("Joined room '{}' as {}", room_id, peer_id);

        tokio::spawn(coordinator.run());

        Ok(SessionHandle::new(room_id, peer_id, command_tx, snapshot_rx))
    }

    async fn run(mut self) {
        info!("Session coordinator for '{}' started", self.room_id);

        loop {
            tokio::select! {
                event = self.server_rx.recv() => {
                    match event {
                        Some(e) => self.handle_server_event(e).await,
                        None => {
                            warn!("Event channel lost");
                            self.teardown(SessionPhase::Disconnected).await;
                            break;
                        }
                    }
                }

                Some(call) = self.incoming_rx.recv() => self.accept_call(call).await,

                Some(event) = self.call_rx.recv() => self.handle_call_event(event).await,

                cmd = self.command_rx.recv() => {
                    let flow = match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Every session handle dropped, leaving");
                            self.leave().await;
                            ControlFlow::Break(())
                        }
                    };
                    if flow.is_break() {
                        break;
                    }
                }
            }

            self.publish();
        }

        info!("Session coordinator for '{}' finished", self.room_id);
    }

    /// Close every call, release the peer session and enter `phase`.
    async fn teardown(&mut self, phase: SessionPhase) {
        for (_, handle) in self.pending_calls.drain() {
            self.calls.close(&handle).await;
        }
        for state in self.participants.values_mut() {
            if let Some(handle) = state.call.take() {
                self.calls.close(&handle).await;
            }
        }
        self.participants.retain(|peer_id, _| *peer_id == self.local_id);

        self.session.disconnect().await;
        self.phase = phase;
        self.publish();
    }

    /// Close whatever call we have with `peer_id`, pending or established.
    async fn close_calls_with(&mut self, peer_id: &PeerId) {
        if let Some(handle) = self.pending_calls.remove(peer_id) {
            self.calls.close(&handle).await;
        }
        if let Some(handle) = self
            .participants
            .get_mut(peer_id)
            .and_then(|state| state.call.take())
        {
            self.calls.close(&handle).await;
        }
    }

    fn record_failure(&mut self, remote: PeerId, failure: CallFailure) {
        warn!("Call with {} failed: {}", remote, failure);
        self.call_failures.push(CallFailureRecord { remote, failure });
    }

    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.room_id.clone(),
            local_id: self.local_id.clone(),
            phase: self.phase,
            participants: self
                .participants
                .iter()
                .map(|(id, state)| (id.clone(), state.clone()))
                .collect(),
            call_failures: self.call_failures.clone(),
            last_error: self.last_error.clone(),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

use crate::call::CallId;
use crate::error::CallFailure;
use crate::media::MediaStream;
use huddle_core::PeerId;

/// Outcome of a call's negotiation, reported back to the coordinator.
#[derive(Debug)]
pub enum CallEvent {
    Established {
        call: CallId,
        remote: PeerId,
        stream: MediaStream,
    },
    Failed {
        call: CallId,
        remote: PeerId,
        failure: CallFailure,
    },
}

impl CallEvent {
    pub fn call(&self) -> CallId {
        match self {
            Self::Established { call, .. } | Self::Failed { call, .. } => *call,
        }
    }

    pub fn remote(&self) -> &PeerId {
        match self {
            Self::Established { remote, .. } | Self::Failed { remote, .. } => remote,
        }
    }
}

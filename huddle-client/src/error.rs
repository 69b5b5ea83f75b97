use huddle_core::ProtocolError;
use std::time::Duration;
use thiserror::Error;

/// Why a point-to-point call did not produce a remote stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallFailure {
    #[error("no remote stream arrived in time")]
    Timeout,

    #[error("negotiation failed: {0}")]
    Negotiation(String),

    #[error("media failure: {0}")]
    Media(String),

    #[error("peer unreachable: {0}")]
    Unreachable(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("camera or microphone access was denied")]
    PermissionDenied,

    #[error("no capture device available")]
    DeviceUnavailable,

    #[error("capture failed: {0}")]
    Capture(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to acquire local media: {0}")]
    MediaAcquisition(#[from] MediaError),

    #[error("media session failed: {0}")]
    Session(#[from] CallFailure),

    #[error("event channel failed: {0}")]
    Channel(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("session is no longer running")]
    SessionClosed,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame has no event name")]
    MissingEvent,

    #[error("unknown event: {0}")]
    UnknownEvent(String),

    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}

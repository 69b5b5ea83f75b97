use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(Uuid);

impl StreamId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StreamId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to an audio/video stream owned by the media subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    id: StreamId,
    label: Arc<str>,
}

impl MediaStream {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self {
            id: StreamId::new(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> StreamId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

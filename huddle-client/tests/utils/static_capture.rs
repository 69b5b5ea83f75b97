use async_trait::async_trait;
use huddle_client::{LocalCapture, MediaError, MediaStream};

/// Capture that either always grants a fresh stream or always fails.
pub struct StaticCapture {
    outcome: Result<String, MediaError>,
}

impl StaticCapture {
    pub fn granted(label: &str) -> Self {
        Self {
            outcome: Ok(label.to_owned()),
        }
    }

    pub fn denied() -> Self {
        Self {
            outcome: Err(MediaError::PermissionDenied),
        }
    }
}

#[async_trait]
impl LocalCapture for StaticCapture {
    async fn acquire(&self) -> Result<MediaStream, MediaError> {
        self.outcome.clone().map(MediaStream::new)
    }
}

use crate::error::MediaError;
use crate::media::MediaStream;
use async_trait::async_trait;

/// Source of the local camera + microphone stream.
#[async_trait]
pub trait LocalCapture: Send + Sync {
    async fn acquire(&self) -> Result<MediaStream, MediaError>;
}

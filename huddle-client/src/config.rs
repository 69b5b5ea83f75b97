use std::time::Duration;

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound for a call to yield the remote stream, dial included.
    pub call_timeout: Duration,
    /// Flags every participant entry starts with, the local one included.
    pub initial_mic_on: bool,
    pub initial_video_on: bool,
    /// Capacity of the inbound server event queue.
    pub event_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
            initial_mic_on: false,
            initial_video_on: true,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

mod local_capture;
mod media_stream;
mod peer_session;

pub use local_capture::*;
pub use media_stream::*;
pub use peer_session::*;

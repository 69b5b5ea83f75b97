mod event_channel;
mod ws_channel;

pub use event_channel::*;
pub use ws_channel::*;

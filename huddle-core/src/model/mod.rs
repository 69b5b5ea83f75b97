mod connection;
mod event;
mod peer;
mod room;

pub use connection::ConnectionId;
pub use event::{ClientEvent, ServerEvent};
pub use peer::PeerId;
pub use room::RoomId;

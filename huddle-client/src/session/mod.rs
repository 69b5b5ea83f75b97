mod coordinator;
mod participant;
mod session_command;
mod session_handle;
mod snapshot;

pub use coordinator::*;
pub use participant::*;
pub use session_command::*;
pub use session_handle::*;
pub use snapshot::*;

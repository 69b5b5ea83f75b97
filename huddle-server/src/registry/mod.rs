mod registry_command;
mod registry_error;
mod registry_handle;
mod room;
mod room_registry;

pub use registry_command::*;
pub use registry_error::*;
pub use registry_handle::*;
pub use room::*;
pub use room_registry::*;

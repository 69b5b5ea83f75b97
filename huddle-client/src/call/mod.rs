mod call_event;
mod call_handle;
mod call_manager;

pub use call_event::*;
pub use call_handle::*;
pub use call_manager::*;

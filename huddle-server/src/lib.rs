mod config;
mod http;
mod registry;
mod server;
mod signaling;

pub use config::*;
pub use http::*;
pub use registry::*;
pub use server::*;
pub use signaling::*;

mod call;
mod channel;
mod config;
mod error;
mod media;
mod session;

pub use call::*;
pub use channel::*;
pub use config::*;
pub use error::*;
pub use media::*;
pub use session::*;

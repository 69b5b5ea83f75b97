use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// `join-room` arrived without a usable room or peer id.
    #[error("invalid room data")]
    InvalidRequest,

    #[error("room registry is no longer running")]
    RegistryClosed,
}

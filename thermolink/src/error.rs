//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Core(#[from] thermolink_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] thermolink_transport::Error),
}

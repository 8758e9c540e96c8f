//! Error types for thermolink-core

/// Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Command text would break the single-line framing
    #[error("Command text contains a line break: {text:?}")]
    InvalidText {
        text: String,
    },
}

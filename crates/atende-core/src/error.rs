use thiserror::Error;

/// Top-level error type for atende.
#[derive(Debug, Error)]
pub enum AtendeError {
    /// Error from the chat transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// Error reading or writing the session credential store.
    #[error("session error: {0}")]
    Session(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Shared error types for the Bino agent.

use thiserror::Error;

/// Top-level error type for the Bino agent.
#[derive(Error, Debug)]
pub enum BinoError {
    /// A configuration error occurred (missing credential, bad value).
    /// Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A memory store error occurred.
    #[error("Memory error: {0}")]
    Memory(String),

    /// An LLM driver error occurred. Fatal for the current invocation.
    #[error("LLM driver error: {0}")]
    LlmDriver(String),

    /// The external publishing step failed.
    #[error("Publish error: {0}")]
    Publish(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for Results with BinoError.
pub type BinoResult<T> = Result<T, BinoError>;

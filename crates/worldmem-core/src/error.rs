//! Error types for worldmem-core.

use thiserror::Error;

use crate::engine::EngineError;

/// Result type alias using worldmem-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for world-memory operations
#[derive(Error, Debug)]
pub enum Error {
    /// The engine failed to initialize at startup; the service is degraded
    /// until the process is restarted.
    #[error("Knowledge engine not initialized. Check service logs.")]
    NotReady,

    /// Malformed input, rejected before touching the engine.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Any failure reported by the underlying knowledge engine.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

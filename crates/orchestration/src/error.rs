//! Orchestration error types.

use thiserror::Error;

/// Errors that prevent an orchestration run from producing a normal response.
///
/// Specialist failures never appear here; they are absorbed by fallbacks.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// The request was rejected before any specialist was called.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The engine itself misbehaved (a branch task panicked, a run produced no steps).
    #[error("Engine error: {0}")]
    Engine(String),
}

impl From<tokio::task::JoinError> for OrchestrationError {
    fn from(err: tokio::task::JoinError) -> Self {
        OrchestrationError::Engine(format!("specialist task failed: {err}"))
    }
}

/// Convenience type alias for orchestration results.
pub type Result<T> = std::result::Result<T, OrchestrationError>;

//! Error types for prompt optimization.

use thiserror::Error;

use crate::llm::CompletionError;

/// Errors produced while handling an optimize request.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Prompt was missing or whitespace-only.
    #[error("Missing 'prompt' in request body.")]
    MissingPrompt,

    /// The completion provider failed.
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    /// A spawned completion task panicked or was aborted.
    #[error("completion task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl OptimizeError {
    /// Whether the caller is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingPrompt)
    }
}

/// Convenience result alias for optimizer operations.
pub type OptimizeResult<T> = Result<T, OptimizeError>;

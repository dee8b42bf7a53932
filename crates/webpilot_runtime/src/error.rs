//! Runtime error types
//!
//! Everything here ends the session. Recoverable effector failures never
//! surface as errors; they become error tool results in the transcript.

use thiserror::Error;
use webpilot_toolbus::HostError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Effector host unreachable: {0}")]
    Transport(String),

    #[error("LLM error: {0}")]
    LlmFailed(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// Failures where the operator should check the host and credentials.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            RuntimeError::Transport(_) | RuntimeError::LlmFailed(_) | RuntimeError::ProviderNotFound(_)
        )
    }
}

impl From<HostError> for RuntimeError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Transport(message) => RuntimeError::Transport(message),
            other => RuntimeError::ConfigError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

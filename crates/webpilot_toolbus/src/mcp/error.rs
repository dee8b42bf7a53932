use thiserror::Error;

use super::config::ConfigError;

#[derive(Error, Debug)]
pub enum McpError {
    #[error("Failed to start MCP server: {0}")]
    StartFailed(String),

    /// The peer answered with a JSON-RPC error object.
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i32, message: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection closed by peer")]
    Closed,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// Whether the connection itself is unusable, as opposed to one request
    /// having been rejected.
    pub fn is_transport(&self) -> bool {
        !matches!(self, McpError::JsonRpc { .. })
    }
}

pub type McpResult<T> = Result<T, McpError>;

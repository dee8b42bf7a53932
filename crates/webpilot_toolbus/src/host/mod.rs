//! The seam between the conversation driver and whatever executes effectors.
//!
//! [`LocalHost`] runs the [`crate::ToolBus`] in process; [`RemoteHost`] drives
//! a separate effector server over MCP. The driver only sees [`EffectorHost`].

mod local;
mod remote;

pub use local::LocalHost;
pub use remote::RemoteHost;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::ToolSpec;
use crate::artifacts::ArtifactContents;
use crate::tools::ToolOutput;

#[derive(Debug, Error)]
pub enum HostError {
    /// The model asked for a name outside the catalog.
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Artifact unavailable: {0}")]
    Artifact(String),

    /// The host itself is unreachable. Ends the session.
    #[error("Effector host transport failed: {0}")]
    Transport(String),
}

impl HostError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, HostError::Transport(_))
    }
}

#[async_trait]
pub trait EffectorHost: Send + Sync {
    /// Tool specs in the order they should be offered to the model.
    async fn catalog(&self) -> Result<Vec<ToolSpec>, HostError>;

    async fn invoke(&self, name: &str, args: JsonValue) -> Result<ToolOutput, HostError>;

    async fn read_artifact(&self, uri: &str) -> Result<ArtifactContents, HostError>;

    async fn shutdown(&self) -> Result<(), HostError>;
}

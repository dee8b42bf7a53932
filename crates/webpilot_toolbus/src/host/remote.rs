use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::Mutex;
use tracing::info;

use super::{EffectorHost, HostError};
use crate::ToolSpec;
use crate::artifacts::ArtifactContents;
use crate::mcp::content::from_mcp;
use crate::mcp::{McpClient, McpError, McpServerConfig};
use crate::tools::ToolOutput;

const NOT_FOUND_PREFIX: &str = "Error: Artifact not found:";

/// Effectors executed by a separate server process over MCP. The catalog is
/// fetched once at connect time.
pub struct RemoteHost {
    client: Mutex<McpClient>,
    catalog: Vec<ToolSpec>,
}

fn transport(err: McpError) -> HostError {
    HostError::Transport(err.to_string())
}

impl RemoteHost {
    pub async fn connect(config: &McpServerConfig) -> Result<Self, HostError> {
        let client = McpClient::connect(config).await.map_err(transport)?;
        Self::from_client(client).await
    }

    /// Initializes `client` and caches its tool catalog.
    pub async fn from_client(mut client: McpClient) -> Result<Self, HostError> {
        client.initialize().await.map_err(transport)?;
        let catalog: Vec<ToolSpec> = client
            .list_tools()
            .await
            .map_err(transport)?
            .into_iter()
            .map(|tool| ToolSpec {
                name: tool.name,
                description: tool.description,
                input_schema: tool.input_schema,
            })
            .collect();

        info!(server = %client.server_id(), tools = catalog.len(), "Remote effectors available");
        Ok(Self {
            client: Mutex::new(client),
            catalog,
        })
    }
}

#[async_trait]
impl EffectorHost for RemoteHost {
    async fn catalog(&self) -> Result<Vec<ToolSpec>, HostError> {
        Ok(self.catalog.clone())
    }

    async fn invoke(&self, name: &str, args: JsonValue) -> Result<ToolOutput, HostError> {
        if !self.catalog.iter().any(|spec| spec.name == name) {
            return Err(HostError::UnknownTool(name.to_string()));
        }

        let result = self
            .client
            .lock()
            .await
            .call_tool(name, args)
            .await
            .map_err(|e| {
                if e.is_transport() {
                    transport(e)
                } else {
                    HostError::ToolFailed {
                        tool: name.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        if result.is_error {
            return Err(HostError::ToolFailed {
                tool: name.to_string(),
                message: result.text(),
            });
        }
        Ok(result.content.into_iter().filter_map(from_mcp).collect())
    }

    async fn read_artifact(&self, uri: &str) -> Result<ArtifactContents, HostError> {
        let result = self
            .client
            .lock()
            .await
            .read_resource(uri)
            .await
            .map_err(|e| {
                if e.is_transport() {
                    transport(e)
                } else {
                    HostError::Artifact(e.to_string())
                }
            })?;

        let contents = result
            .contents
            .into_iter()
            .next()
            .ok_or_else(|| HostError::Artifact(format!("Empty resource: {}", uri)))?;
        let text = contents.text.unwrap_or_default();
        if text.starts_with(NOT_FOUND_PREFIX) {
            return Err(HostError::Artifact(text.trim_start_matches("Error: ").to_string()));
        }

        Ok(ArtifactContents {
            uri: contents.uri,
            mime_type: contents.mime_type.unwrap_or_else(|| "text/plain".to_string()),
            text,
        })
    }

    async fn shutdown(&self) -> Result<(), HostError> {
        self.client.lock().await.shutdown().await.map_err(transport)
    }
}

//! Caller side of the effector protocol.

use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use webpilot_constant::app;

use super::config::McpServerConfig;
use super::error::{McpError, McpResult};
use super::protocol::{
    CallToolRequest, CallToolResult, Implementation, InitializeParams, InitializeResult,
    ListResourceTemplatesResult, ListResourcesResult, ListToolsResult, ReadResourceRequest,
    ReadResourceResult, Resource, ResourceTemplate, Tool,
};
use super::transport::StdioTransport;

/// Schema property some servers inject for their own request context.
const INJECTED_CONTEXT_PROPERTY: &str = "ctx";

/// A connection to one effector host.
///
/// ```ignore
/// let config = McpServerConfig::new("browser", "webpilot").with_args(vec!["serve".into()]);
/// let mut client = McpClient::connect(&config).await?;
/// client.initialize().await?;
/// let tools = client.list_tools().await?;
/// client.shutdown().await?;
/// ```
pub struct McpClient {
    transport: StdioTransport,
    server_id: String,
    initialized: bool,
}

impl McpClient {
    /// Spawns the configured server process.
    pub async fn connect(config: &McpServerConfig) -> McpResult<Self> {
        info!(server = %config.id, command = %config.command, "Connecting to effector host");
        let env = config.resolved_env()?;
        let transport = StdioTransport::spawn(
            &config.command,
            &config.args,
            &env,
            config.working_dir.as_deref(),
            &config.id,
        )?;
        Ok(Self::with_transport(transport))
    }

    pub fn with_transport(transport: StdioTransport) -> Self {
        Self {
            server_id: transport.label().to_string(),
            transport,
            initialized: false,
        }
    }

    /// Handshake, then the `notifications/initialized` notification.
    pub async fn initialize(&mut self) -> McpResult<InitializeResult> {
        let params = InitializeParams::new(Implementation::new(app::NAME, app::VERSION));
        let result: InitializeResult = self
            .transport
            .send_request("initialize", Some(serde_json::to_value(params)?))
            .await?;

        info!(
            server = %self.server_id,
            name = %result.server_info.name,
            version = %result.server_info.version,
            protocol = %result.protocol_version,
            "Effector host initialized"
        );

        self.transport
            .send_notification("notifications/initialized", None)
            .await?;
        self.initialized = true;
        Ok(result)
    }

    fn ensure_initialized(&self) -> McpResult<()> {
        if !self.initialized {
            return Err(McpError::Protocol("Server not initialized".to_string()));
        }
        Ok(())
    }

    /// The server's tools with any injected `ctx` property removed from
    /// their input schemas.
    pub async fn list_tools(&mut self) -> McpResult<Vec<Tool>> {
        self.ensure_initialized()?;
        let result: ListToolsResult = self.transport.send_request("tools/list", None).await?;
        debug!(server = %self.server_id, count = result.tools.len(), "Listed tools");
        Ok(result.tools.into_iter().map(strip_injected_context).collect())
    }

    pub async fn call_tool(&mut self, name: &str, arguments: JsonValue) -> McpResult<CallToolResult> {
        self.ensure_initialized()?;
        let request = CallToolRequest::with_arguments(name, arguments);
        let result: CallToolResult = self
            .transport
            .send_request("tools/call", Some(serde_json::to_value(request)?))
            .await?;

        if result.is_error {
            warn!(server = %self.server_id, tool = name, error = %result.text(), "Tool returned error");
        }
        Ok(result)
    }

    pub async fn list_resources(&mut self) -> McpResult<Vec<Resource>> {
        self.ensure_initialized()?;
        let result: ListResourcesResult = self.transport.send_request("resources/list", None).await?;
        Ok(result.resources)
    }

    pub async fn list_resource_templates(&mut self) -> McpResult<Vec<ResourceTemplate>> {
        self.ensure_initialized()?;
        let result: ListResourceTemplatesResult = self
            .transport
            .send_request("resources/templates/list", None)
            .await?;
        Ok(result.resource_templates)
    }

    pub async fn read_resource(&mut self, uri: &str) -> McpResult<ReadResourceResult> {
        self.ensure_initialized()?;
        let request = ReadResourceRequest {
            uri: uri.to_string(),
        };
        self.transport
            .send_request("resources/read", Some(serde_json::to_value(request)?))
            .await
    }

    pub async fn ping(&mut self) -> McpResult<()> {
        let _: JsonValue = self.transport.send_request("ping", None).await?;
        Ok(())
    }

    /// Asks the server to stop, then closes the connection.
    pub async fn shutdown(&mut self) -> McpResult<()> {
        if self.initialized {
            info!(server = %self.server_id, "Shutting down effector host");
            if let Err(e) = self.transport.send_request::<JsonValue>("shutdown", None).await {
                debug!(server = %self.server_id, error = %e, "Shutdown request failed");
            }
            self.transport.send_notification("exit", None).await.ok();
            self.initialized = false;
        }
        self.transport.close().await
    }

    pub fn server_id(&self) -> &str {
        &self.server_id
    }
}

fn strip_injected_context(mut tool: Tool) -> Tool {
    if let Some(properties) = tool
        .input_schema
        .get_mut("properties")
        .and_then(JsonValue::as_object_mut)
    {
        properties.remove(INJECTED_CONTEXT_PROPERTY);
    }
    if let Some(required) = tool
        .input_schema
        .get_mut("required")
        .and_then(JsonValue::as_array_mut)
    {
        required.retain(|name| name != INJECTED_CONTEXT_PROPERTY);
    }
    tool
}

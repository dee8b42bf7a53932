//! Serves a [`ToolBus`] and its session artifacts to one client over a pair
//! of byte streams, one request at a time.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tracing::{debug, info, warn};
use webpilot_constant::{app, defaults};
use webpilot_core::ARTIFACT_LIST_URI;

use super::content::to_mcp;
use super::error::McpResult;
use super::protocol::{
    CallToolRequest, CallToolResult, Implementation, InitializeResult, JsonRpcErrorObject,
    JsonRpcRequest, JsonRpcResponse, ListChangedCapability, ListResourceTemplatesResult,
    ListResourcesResult, ListToolsResult, ReadResourceRequest, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate, ResourcesCapability, ServerCapabilities, Tool,
    error_codes,
};
use super::transport::{read_frame, write_frame};
use crate::ToolBus;
use crate::artifacts::{ArtifactError, ArtifactStore};

type HandlerResult = Result<JsonValue, JsonRpcErrorObject>;

pub struct McpServer {
    bus: Arc<ToolBus>,
    store: ArtifactStore,
    info: Implementation,
}

impl McpServer {
    pub fn new(bus: Arc<ToolBus>) -> Self {
        let store = ArtifactStore::new(bus.layout().clone());
        Self {
            bus,
            store,
            info: Implementation::new(app::NAME, app::VERSION),
        }
    }

    /// Runs until the client sends `exit` or closes its end.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        info!(session = %self.bus.layout().session(), "Effector host serving");

        while let Some(frame) = read_frame(&mut reader).await? {
            if frame.get("method").is_none() {
                debug!(?frame, "Ignoring non-request message");
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_value(frame) {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "Malformed request");
                    let error = JsonRpcErrorObject::new(error_codes::INVALID_REQUEST, e.to_string());
                    write_frame(&mut writer, &JsonRpcResponse::<JsonValue>::error(JsonValue::Null, error))
                        .await?;
                    continue;
                }
            };

            if request.is_notification() {
                if request.method == "exit" {
                    break;
                }
                debug!(method = %request.method, "Notification");
                continue;
            }
            let id = request.id.unwrap_or_default();

            let response = match self.handle(&request.method, request.params).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(error) => {
                    debug!(method = %request.method, code = error.code, message = %error.message, "Request rejected");
                    JsonRpcResponse::error(id, error)
                }
            };
            write_frame(&mut writer, &response).await?;
        }

        info!("Effector host client disconnected");
        Ok(())
    }

    async fn handle(&self, method: &str, params: Option<JsonValue>) -> HandlerResult {
        match method {
            "initialize" => to_result(self.initialize()),
            "ping" | "shutdown" => Ok(serde_json::json!({})),
            "tools/list" => to_result(self.list_tools()),
            "tools/call" => {
                let request: CallToolRequest = parse_params(params)?;
                to_result(self.call_tool(request).await)
            }
            "resources/list" => to_result(self.list_resources().await?),
            "resources/templates/list" => to_result(self.list_resource_templates()),
            "resources/read" => {
                let request: ReadResourceRequest = parse_params(params)?;
                to_result(self.read_resource(&request.uri).await?)
            }
            other => Err(JsonRpcErrorObject::new(
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }

    fn initialize(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: defaults::MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ListChangedCapability::default()),
                resources: Some(ResourcesCapability::default()),
            },
            server_info: self.info.clone(),
        }
    }

    fn list_tools(&self) -> ListToolsResult {
        let tools = self
            .bus
            .list_tools()
            .into_iter()
            .map(|spec| Tool::new(spec.name, spec.description, spec.input_schema))
            .collect();
        ListToolsResult {
            tools,
            next_cursor: None,
        }
    }

    /// Effector failures, unknown names included, are tool-level errors
    /// the model gets to see, not protocol errors.
    async fn call_tool(&self, request: CallToolRequest) -> CallToolResult {
        let args = request.arguments.unwrap_or_else(|| serde_json::json!({}));
        match self.bus.call(&request.name, args).await {
            Ok((output, duration_ms)) => {
                debug!(tool = %request.name, duration_ms, "Tool call served");
                CallToolResult::new(output.into_iter().map(to_mcp).collect())
            }
            Err(e) => {
                warn!(tool = %request.name, error = %e, "Tool call failed");
                CallToolResult::error(format!("Error: {}", e))
            }
        }
    }

    async fn list_resources(&self) -> Result<ListResourcesResult, JsonRpcErrorObject> {
        let names = self.store.list().await.map_err(internal_error)?;

        let mut resources = vec![Resource {
            uri: ARTIFACT_LIST_URI.to_string(),
            name: "artifacts".to_string(),
            description: Some("List all artifacts for the current session".to_string()),
            mime_type: Some("text/plain".to_string()),
        }];
        resources.extend(names.into_iter().map(|name| {
            let uri = self.store.uri_for(&name);
            Resource {
                uri: uri.to_string(),
                mime_type: Some(uri.mime_type().to_string()),
                name,
                description: None,
            }
        }));

        Ok(ListResourcesResult { resources })
    }

    fn list_resource_templates(&self) -> ListResourceTemplatesResult {
        ListResourceTemplatesResult {
            resource_templates: vec![ResourceTemplate {
                uri_template: "artifact://{session_id}/{filename}".to_string(),
                name: "artifact".to_string(),
                description: Some("A file written during a browsing session".to_string()),
                mime_type: None,
            }],
        }
    }

    /// A missing artifact is answered with a plain-text error body.
    async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, JsonRpcErrorObject> {
        let contents = if uri == ARTIFACT_LIST_URI {
            let listing = self.store.listing().await.map_err(internal_error)?;
            text_contents(uri, "text/plain", listing)
        } else {
            match self.store.read(uri).await {
                Ok(artifact) => text_contents(&artifact.uri, &artifact.mime_type, artifact.text),
                Err(ArtifactError::NotFound(filename)) => text_contents(
                    uri,
                    "text/plain",
                    format!("Error: Artifact not found: {}", filename),
                ),
                Err(ArtifactError::InvalidUri(e)) => {
                    return Err(JsonRpcErrorObject::new(error_codes::INVALID_PARAMS, e.to_string()));
                }
                Err(e) => return Err(internal_error(e)),
            }
        };
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

fn text_contents(uri: &str, mime_type: &str, text: String) -> ResourceContents {
    ResourceContents {
        uri: uri.to_string(),
        mime_type: Some(mime_type.to_string()),
        text: Some(text),
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<JsonValue>) -> Result<T, JsonRpcErrorObject> {
    let params = params.unwrap_or(JsonValue::Null);
    serde_json::from_value(params)
        .map_err(|e| JsonRpcErrorObject::new(error_codes::INVALID_PARAMS, e.to_string()))
}

fn to_result<T: Serialize>(value: T) -> HandlerResult {
    serde_json::to_value(value).map_err(internal_error)
}

fn internal_error(err: impl std::fmt::Display) -> JsonRpcErrorObject {
    JsonRpcErrorObject::new(error_codes::INTERNAL_ERROR, err.to_string())
}

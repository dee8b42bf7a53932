//! Effector dispatch and the ambient page note that follows every batch.

use std::time::Instant;

use serde_json::json;
use tracing::{Instrument, debug, info, warn};
use webpilot_core::{
    ArtifactUri, ContentItem, SessionEvent, ToolResult, ToolResultContent, ToolUse, Turn,
};
use webpilot_observability::{record_duration, record_error, tool_span};
use webpilot_toolbus::{HostError, ToolContent, ToolOutput};

use crate::error::RuntimeError;

use super::Runtime;

const PAGE_INFO_TOOL: &str = "get_page_info";
const UNKNOWN: &str = "Unknown";

impl Runtime {
    /// Runs every tool use in order and returns the user turn answering them,
    /// followed by a note naming the current page.
    ///
    /// Effector failures become error results. Only a broken host aborts.
    pub(crate) async fn execute_tool_uses(
        &mut self,
        tool_uses: Vec<ToolUse>,
    ) -> Result<Turn, RuntimeError> {
        info!("Executing {} tool calls", tool_uses.len());

        let mut turn = Turn::user();
        for tool_use in tool_uses {
            let result = self.execute_one(tool_use).await?;
            turn.push(ContentItem::tool_result(result));
        }

        let page = self.current_page().await?;
        turn.push(ContentItem::text(page));
        Ok(turn)
    }

    async fn execute_one(&mut self, tool_use: ToolUse) -> Result<ToolResult, RuntimeError> {
        let span = tool_span!(tool_use.name.as_str(), tool_use.id.as_str());
        async {
            let _ = self
                .event_tx
                .send(SessionEvent::tool_start(tool_use.clone()))
                .await;

            let start = Instant::now();
            let outcome = self
                .host
                .invoke(&tool_use.name, tool_use.input.clone())
                .await;
            let duration = start.elapsed();
            record_duration("tool.duration_ms", duration);

            let result = match outcome {
                Ok(output) => {
                    let content = self.convert_output(output).await;
                    ToolResult::success(&tool_use.id, content)
                }
                Err(e @ HostError::Transport(_)) => {
                    record_error(&e);
                    return Err(RuntimeError::from(e));
                }
                Err(e) => {
                    record_error(&e);
                    ToolResult::error(&tool_use.id, e.to_string())
                }
            };

            let _ = self
                .event_tx
                .send(SessionEvent::tool_done(
                    &tool_use.id,
                    result.clone(),
                    duration.as_millis() as u64,
                ))
                .await;

            Ok(result)
        }
        .instrument(span)
        .await
    }

    /// Maps effector output onto tool result parts. Resources are recorded
    /// with the session's artifact tracker and passed on as JSON.
    async fn convert_output(&mut self, output: ToolOutput) -> Vec<ToolResultContent> {
        let mut content = Vec::with_capacity(output.len());
        for item in output {
            match item {
                ToolContent::Text { text } => content.push(ToolResultContent::text(text)),
                ToolContent::Json { json } => content.push(ToolResultContent::json(json)),
                ToolContent::Image { image } => content.push(ToolResultContent::image(image)),
                ToolContent::Resource { resource } => {
                    if ArtifactUri::parse(&resource.uri).is_ok() {
                        self.record_artifact(&resource.uri).await;
                    }
                    content.push(ToolResultContent::json(json!({ "resource": resource })));
                }
            }
        }
        content
    }

    async fn record_artifact(&mut self, uri: &str) {
        let turn = self.session.transcript.len();
        if self.session.artifacts.record(uri, turn) {
            debug!(uri, turn, "Recorded artifact");
            let _ = self
                .event_tx
                .send(SessionEvent::artifact_recorded(uri))
                .await;
        }
    }

    /// "Current page: Title: '...', URL: '...'" from `get_page_info`.
    ///
    /// Falls back to Unknown fields when the effector is missing or fails.
    pub(crate) async fn current_page(&self) -> Result<String, RuntimeError> {
        let (title, url) = match self.host.invoke(PAGE_INFO_TOOL, json!({})).await {
            Ok(output) => {
                let info = output.iter().find_map(ToolContent::as_json);
                let field = |key: &str| {
                    info.and_then(|v| v.get(key))
                        .and_then(|v| v.as_str())
                        .unwrap_or(UNKNOWN)
                        .to_string()
                };
                (field("title"), field("url"))
            }
            Err(e @ HostError::Transport(_)) => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Page info unavailable");
                (UNKNOWN.to_string(), UNKNOWN.to_string())
            }
        };

        Ok(format!("Current page: Title: '{}', URL: '{}'", title, url))
    }
}

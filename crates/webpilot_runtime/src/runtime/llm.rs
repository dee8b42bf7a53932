//! LLM calls and response handling.

use std::time::Instant;

use futures::StreamExt;
use tracing::{debug, error, info};
use webpilot_core::{ContentItem, Role, SessionEvent, StopCondition, TokenUsage, ToolUse, Turn};
use webpilot_llms::types::{FinishReason, GenerateRequest, StreamEvent, Usage};
use webpilot_observability::{record_duration, record_error};

use crate::context;
use crate::error::RuntimeError;

use super::Runtime;

impl Runtime {
    /// Sends the transcript to the model and returns the assistant turn with
    /// its stop condition and usage. The turn is not appended here.
    pub(crate) async fn converse(
        &mut self,
    ) -> Result<(Turn, StopCondition, TokenUsage), RuntimeError> {
        let messages =
            context::build_messages(&self.config.system_prompt, self.session.transcript.turns());
        let request = context::build_generate_request(
            &self.config.model,
            messages,
            &self.catalog,
            self.config.max_tokens,
            self.config.temperature,
        );

        if tracing::enabled!(tracing::Level::TRACE) {
            let body = serde_json::to_string_pretty(&request.messages)
                .unwrap_or_else(|_| format!("{:?}", request.messages));
            tracing::trace!(target: "webpilot.trace", model = %request.model, "LLM request\n{}", body);
        }

        let _ = self
            .event_tx
            .send(SessionEvent::turn_start(Role::Assistant))
            .await;

        let start = Instant::now();
        let result = if self.config.stream {
            self.stream_response(request).await
        } else {
            self.generate_response(request).await
        };
        record_duration("llm.duration_ms", start.elapsed());

        if let Err(e) = &result {
            record_error(e);
        }
        result
    }

    async fn generate_response(
        &mut self,
        request: GenerateRequest,
    ) -> Result<(Turn, StopCondition, TokenUsage), RuntimeError> {
        let response = self
            .llm_client
            .generate(request)
            .await
            .map_err(|e| RuntimeError::LlmFailed(e.to_string()))?;

        let text = response.text();
        if !text.is_empty() {
            let _ = self.event_tx.send(SessionEvent::text_delta(text)).await;
        }

        info!(reason = ?response.finish_reason.unified, "LLM response received");
        Ok(context::turn_from_response(&response))
    }

    /// Folds stream events into one assistant turn, keeping text and tool
    /// calls in the order they arrived.
    async fn stream_response(
        &mut self,
        request: GenerateRequest,
    ) -> Result<(Turn, StopCondition, TokenUsage), RuntimeError> {
        let mut stream = self
            .llm_client
            .stream(request)
            .await
            .map_err(|e| RuntimeError::LlmFailed(e.to_string()))?;

        let mut turn = Turn::assistant();
        let mut usage = Usage::default();
        let mut reason: Option<FinishReason> = None;

        while let Some(event) = stream.next().await {
            let event = event.map_err(|e| {
                error!("Stream error: {}", e);
                RuntimeError::LlmFailed(e.to_string())
            })?;

            match event {
                StreamEvent::Start { id } => debug!("LLM stream started: {}", id),
                StreamEvent::TextDelta { delta, .. } => {
                    match turn.content.last_mut() {
                        Some(ContentItem::Text { text }) => text.push_str(&delta),
                        _ => turn.push(ContentItem::text(delta.clone())),
                    }
                    let _ = self.event_tx.send(SessionEvent::text_delta(delta)).await;
                }
                StreamEvent::ToolCallStart { id, name } => {
                    debug!("Tool call started: {} ({})", name, id);
                }
                StreamEvent::ToolCallDelta { .. } => {}
                StreamEvent::ToolCallEnd {
                    id,
                    name,
                    arguments,
                } => {
                    info!("Tool call completed: {} ({})", name, id);
                    turn.push(ContentItem::tool_use(ToolUse::new(id, name, arguments)));
                }
                StreamEvent::Finish { usage: u, reason: r } => {
                    info!("LLM stream finished: {:?}", r.unified);
                    usage = u;
                    reason = Some(r);
                }
                StreamEvent::Error { message } => {
                    error!("LLM stream error: {}", message);
                    return Err(RuntimeError::LlmFailed(message));
                }
            }
        }

        let usage = context::token_usage(&usage);
        let stop = context::stop_condition(&reason.unwrap_or_else(FinishReason::other));
        Ok((turn.with_token_usage(usage.clone()), stop, usage))
    }
}

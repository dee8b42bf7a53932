//! Anthropic streaming support
//!
//! Every SSE `data:` payload carries its own `type`:
//! - `message_start` opens the message and reports input tokens
//! - `content_block_start` / `content_block_delta` / `content_block_stop` frame
//!   text and `tool_use` blocks; tool input arrives as `input_json_delta` fragments
//! - `message_delta` carries the stop reason and output tokens
//! - `message_stop` ends the stream

use std::collections::HashMap;

use futures::stream::StreamExt;
use reqwest_eventsource::{Event, EventSource};
use tracing::debug;

use super::convert::parse_stop_reason;
use super::types::{BlockDelta, ResponseBlock, StreamPayload};
use crate::error::{Error, Result};
use crate::types::{GenerateStream, StreamEvent, Usage};

#[derive(Debug, Clone)]
struct AccumulatedToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Per-stream accumulation of tool input, usage and stop reason.
#[derive(Debug, Default)]
pub(crate) struct StreamState {
    message_id: String,
    tool_calls: HashMap<u32, AccumulatedToolCall>,
    input_tokens: u32,
    output_tokens: u32,
    stop_reason: Option<String>,
    finished: bool,
}

impl StreamState {
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn process(&mut self, payload: StreamPayload) -> Vec<StreamEvent> {
        let mut events = Vec::new();

        match payload {
            StreamPayload::MessageStart { message } => {
                self.input_tokens = message.usage.input_tokens;
                self.output_tokens = message.usage.output_tokens;
                self.message_id = message.id.clone();
                events.push(StreamEvent::start(message.id));
            }
            StreamPayload::ContentBlockStart {
                index,
                content_block,
            } => match content_block {
                ResponseBlock::ToolUse { id, name, .. } => {
                    events.push(StreamEvent::tool_call_start(id.clone(), name.clone()));
                    self.tool_calls.insert(
                        index,
                        AccumulatedToolCall {
                            id,
                            name,
                            arguments: String::new(),
                        },
                    );
                }
                ResponseBlock::Text { text } if !text.is_empty() => {
                    events.push(StreamEvent::text_delta(self.message_id.clone(), text));
                }
                _ => {}
            },
            StreamPayload::ContentBlockDelta { index, delta } => match delta {
                BlockDelta::TextDelta { text } => {
                    if !text.is_empty() {
                        events.push(StreamEvent::text_delta(self.message_id.clone(), text));
                    }
                }
                BlockDelta::InputJsonDelta { partial_json } => {
                    if let Some(call) = self.tool_calls.get_mut(&index)
                        && !partial_json.is_empty()
                    {
                        call.arguments.push_str(&partial_json);
                        events.push(StreamEvent::tool_call_delta(call.id.clone(), partial_json));
                    }
                }
                BlockDelta::Other => {}
            },
            StreamPayload::ContentBlockStop { index } => {
                if let Some(call) = self.tool_calls.remove(&index) {
                    let arguments = if call.arguments.trim().is_empty() {
                        serde_json::json!({})
                    } else {
                        match serde_json::from_str(&call.arguments) {
                            Ok(value) => value,
                            Err(e) => {
                                debug!(tool = %call.name, error = %e, "Unparseable tool input");
                                serde_json::json!({})
                            }
                        }
                    };
                    events.push(StreamEvent::tool_call_end(call.id, call.name, arguments));
                }
            }
            StreamPayload::MessageDelta { delta, usage } => {
                if delta.stop_reason.is_some() {
                    self.stop_reason = delta.stop_reason;
                }
                if let Some(usage) = usage {
                    self.output_tokens = usage.output_tokens;
                    if usage.input_tokens > 0 {
                        self.input_tokens = usage.input_tokens;
                    }
                }
            }
            StreamPayload::MessageStop => {
                self.finished = true;
                events.push(StreamEvent::finish(
                    Usage::new(self.input_tokens, self.output_tokens),
                    parse_stop_reason(self.stop_reason.as_deref()),
                ));
            }
            StreamPayload::Ping => {}
            StreamPayload::Error { error } => {
                events.push(StreamEvent::error(format!(
                    "{}: {}",
                    error.error_type, error.message
                )));
            }
        }

        events
    }
}

/// Create a stream from an Anthropic EventSource
pub async fn create_stream(mut event_source: EventSource) -> Result<GenerateStream> {
    let stream = async_stream::stream! {
        let mut state = StreamState::default();

        while let Some(event) = event_source.next().await {
            match event {
                Ok(Event::Open) => continue,
                Ok(Event::Message(message)) => {
                    match serde_json::from_str::<StreamPayload>(&message.data) {
                        Ok(payload) => {
                            for stream_event in state.process(payload) {
                                yield Ok(stream_event);
                            }
                            if state.is_finished() {
                                break;
                            }
                        }
                        Err(e) => {
                            yield Err(Error::stream_error(format!(
                                "Failed to parse Anthropic event {}: {}", message.event, e
                            )));
                            break;
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => break,
                Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    yield Err(Error::provider_error(format!(
                        "Anthropic API error {}: {}", status, error_body
                    )));
                    break;
                }
                Err(e) => {
                    yield Err(Error::stream_error(format!("Stream error: {}", e)));
                    break;
                }
            }
        }

        event_source.close();
    };

    Ok(GenerateStream::new(Box::pin(stream)))
}

//! Conversion between unified types and Anthropic types

use serde_json::json;

use super::types::{
    AnthropicContent, AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicTool,
    ImageSource, ResponseBlock, ToolResultBlock,
};
use crate::error::{Error, Result};
use crate::types::{
    ContentPart, FinishReason, FinishReasonKind, GenerateRequest, GenerateResponse, Message,
    ResponseContent, Role, ToolCall, ToolChoice, ToolResultPart, Usage,
};

/// The Messages API requires `max_tokens`.
const FALLBACK_MAX_TOKENS: u32 = 4096;

pub fn to_anthropic_request(req: &GenerateRequest, stream: bool) -> Result<AnthropicRequest> {
    let mut system_parts = Vec::new();
    let mut messages = Vec::new();

    for msg in &req.messages {
        match msg.role {
            Role::System => system_parts.push(msg.text()),
            Role::User | Role::Assistant => messages.push(to_anthropic_message(msg)?),
        }
    }

    if messages.is_empty() {
        return Err(Error::Other(
            "Anthropic request needs at least one user or assistant message".to_string(),
        ));
    }

    let tools = req
        .options
        .tools
        .iter()
        .map(|tool| AnthropicTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            input_schema: tool.parameters.clone(),
        })
        .collect();

    let tool_choice = req.options.tool_choice.as_ref().map(|choice| match choice {
        ToolChoice::Auto => json!({ "type": "auto" }),
        ToolChoice::None => json!({ "type": "none" }),
        ToolChoice::Required { name } => json!({ "type": "tool", "name": name }),
    });

    let system = if system_parts.is_empty() {
        None
    } else {
        Some(system_parts.join("\n\n"))
    };

    Ok(AnthropicRequest {
        model: req.model.clone(),
        max_tokens: req.options.max_tokens.unwrap_or(FALLBACK_MAX_TOKENS),
        messages,
        system,
        tools,
        tool_choice,
        temperature: req.options.temperature,
        stop_sequences: req.options.stop_sequences.clone(),
        stream,
    })
}

fn to_anthropic_message(msg: &Message) -> Result<AnthropicMessage> {
    let role = match msg.role {
        Role::Assistant => "assistant",
        _ => "user",
    };

    let content = msg
        .parts()
        .into_iter()
        .filter_map(|part| match part {
            // Empty text blocks are rejected by the API.
            ContentPart::Text { text } if text.is_empty() => None,
            ContentPart::Text { text } => Some(AnthropicContent::Text { text }),
            ContentPart::Image(image) => Some(AnthropicContent::Image {
                source: ImageSource::base64(image.media_type, image.data),
            }),
            ContentPart::ToolCall(call) => Some(AnthropicContent::ToolUse {
                id: call.id,
                name: call.name,
                input: call.arguments,
            }),
            ContentPart::ToolResult {
                tool_call_id,
                content,
                is_error,
            } => Some(AnthropicContent::ToolResult {
                tool_use_id: tool_call_id,
                content: content.into_iter().map(to_result_block).collect(),
                is_error,
            }),
        })
        .collect::<Vec<_>>();

    if content.is_empty() {
        return Err(Error::Other(format!("Empty {} message", role)));
    }

    Ok(AnthropicMessage { role, content })
}

fn to_result_block(part: ToolResultPart) -> ToolResultBlock {
    match part {
        ToolResultPart::Text { text } => ToolResultBlock::Text { text },
        ToolResultPart::Json { value } => ToolResultBlock::Text {
            text: value.to_string(),
        },
        ToolResultPart::Image(image) => ToolResultBlock::Image {
            source: ImageSource::base64(image.media_type, image.data),
        },
    }
}

pub fn parse_stop_reason(reason: Option<&str>) -> FinishReason {
    let Some(raw) = reason else {
        return FinishReason::other();
    };
    let unified = match raw {
        "end_turn" | "stop_sequence" => FinishReasonKind::Stop,
        "tool_use" => FinishReasonKind::ToolCalls,
        "max_tokens" => FinishReasonKind::Length,
        "refusal" => FinishReasonKind::ContentFilter,
        _ => FinishReasonKind::Other,
    };
    FinishReason::with_raw(unified, raw)
}

pub fn from_anthropic_response(resp: AnthropicResponse) -> Result<GenerateResponse> {
    let content = resp
        .content
        .into_iter()
        .filter_map(|block| match block {
            ResponseBlock::Text { text } => Some(ResponseContent::Text { text }),
            ResponseBlock::ToolUse { id, name, input } => {
                let input = if input.is_null() { json!({}) } else { input };
                Some(ResponseContent::ToolCall(ToolCall::new(id, name, input)))
            }
            ResponseBlock::Unknown => None,
        })
        .collect();

    Ok(GenerateResponse {
        content,
        usage: Usage::new(resp.usage.input_tokens, resp.usage.output_tokens),
        finish_reason: parse_stop_reason(resp.stop_reason.as_deref()),
        metadata: Some(json!({ "id": resp.id, "model": resp.model })),
    })
}

//! Transcript-to-LLM message conversion and request building.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use webpilot_core::{
    ContentItem, ImageData, Role, StopCondition, TokenUsage, ToolResult, ToolResultContent,
    ToolUse, Turn,
};
use webpilot_llms::types::{
    ContentPart, FinishReason, FinishReasonKind, GenerateOptions, GenerateRequest,
    GenerateResponse, ImagePart, Message, ResponseContent, Role as LlmRole, Tool, ToolCall, ToolChoice,
    ToolResultPart, Usage,
};
use webpilot_toolbus::ToolSpec;

/// System message followed by one message per non-empty turn.
pub fn build_messages(system_prompt: &str, turns: &[Turn]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    if !system_prompt.trim().is_empty() {
        messages.push(Message::new(LlmRole::System, system_prompt));
    }
    messages.extend(turns.iter().filter_map(turn_to_message));
    messages
}

/// Creates a complete request ready to send to the provider.
pub fn build_generate_request(
    model: &str,
    messages: Vec<Message>,
    catalog: &[ToolSpec],
    max_tokens: u32,
    temperature: Option<f32>,
) -> GenerateRequest {
    let mut options = GenerateOptions::new().max_tokens(max_tokens);
    if let Some(t) = temperature {
        options = options.temperature(t);
    }

    if !catalog.is_empty() {
        for spec in catalog {
            options = options.add_tool(
                Tool::function(&spec.name, &spec.description).parameters(spec.input_schema.clone()),
            );
        }
        options = options.tool_choice(ToolChoice::Auto);
    }

    GenerateRequest::new(model, messages).with_options(options)
}

/// Returns None if the turn has no content the model can see.
fn turn_to_message(turn: &Turn) -> Option<Message> {
    let role = match turn.role {
        Role::User => LlmRole::User,
        Role::Assistant => LlmRole::Assistant,
    };

    let parts: Vec<ContentPart> = turn
        .content
        .iter()
        .filter_map(|item| match item {
            ContentItem::Text { text } if text.trim().is_empty() => None,
            ContentItem::Text { text } => Some(ContentPart::text(text.clone())),
            ContentItem::ToolUse { tool_use } => Some(ContentPart::ToolCall(ToolCall::new(
                &tool_use.id,
                &tool_use.name,
                tool_use.input.clone(),
            ))),
            ContentItem::ToolResult { tool_result } => Some(tool_result_part(tool_result)),
            ContentItem::Image { image } => Some(ContentPart::Image(encode_image(image))),
            ContentItem::Resource { resource } => {
                let mut text = format!("[RESOURCE {} ({})]", resource.uri, resource.mime_type);
                if let Some(preview) = &resource.text {
                    text.push('\n');
                    text.push_str(preview);
                }
                Some(ContentPart::text(text))
            }
        })
        .collect();

    if parts.is_empty() {
        return None;
    }
    Some(Message::new(role, parts))
}

fn encode_image(image: &ImageData) -> ImagePart {
    ImagePart {
        media_type: image.format.media_type().to_string(),
        data: STANDARD.encode(&image.bytes),
    }
}

fn tool_result_part(result: &ToolResult) -> ContentPart {
    let content = result
        .content
        .iter()
        .map(|c| match c {
            ToolResultContent::Text { text } => ToolResultPart::Text { text: text.clone() },
            ToolResultContent::Json { json } => ToolResultPart::Json {
                value: json.clone(),
            },
            ToolResultContent::Image { image } => ToolResultPart::Image(encode_image(image)),
        })
        .collect();

    ContentPart::ToolResult {
        tool_call_id: result.tool_use_id.clone(),
        content,
        is_error: result.is_error,
    }
}

/// Maps the provider's finish reason onto the loop's stop condition.
pub fn stop_condition(reason: &FinishReason) -> StopCondition {
    match reason.unified {
        FinishReasonKind::ToolCalls => StopCondition::ToolPending,
        FinishReasonKind::Stop => StopCondition::Done,
        FinishReasonKind::Length => StopCondition::Continue,
        FinishReasonKind::ContentFilter | FinishReasonKind::Other => StopCondition::Error,
    }
}

pub fn token_usage(usage: &Usage) -> TokenUsage {
    TokenUsage::new(usage.prompt_tokens as u64, usage.completion_tokens as u64)
}

/// Assistant turn in the order the provider returned its content.
pub fn turn_from_response(response: &GenerateResponse) -> (Turn, StopCondition, TokenUsage) {
    let usage = token_usage(&response.usage);
    let mut turn = Turn::assistant().with_token_usage(usage.clone());
    for content in &response.content {
        match content {
            ResponseContent::Text { text } => turn.push(ContentItem::text(text.clone())),
            ResponseContent::ToolCall(call) => turn.push(ContentItem::tool_use(ToolUse::new(
                &call.id,
                &call.name,
                call.arguments.clone(),
            ))),
        }
    }
    (turn, stop_condition(&response.finish_reason), usage)
}

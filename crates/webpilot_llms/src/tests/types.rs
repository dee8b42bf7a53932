use futures::StreamExt;
use serde_json::json;

use crate::types::{
    ContentPart, FinishReason, FinishReasonKind, GenerateResponse, GenerateStream, Headers,
    Message, ResponseContent, Role, StreamEvent, ToolCall, Usage,
};

#[test]
fn test_message_text_joins_text_parts_only() {
    let msg = Message::new(
        Role::Assistant,
        vec![
            ContentPart::text("Opening "),
            ContentPart::ToolCall(ToolCall::new("t1", "navigate", json!({}))),
            ContentPart::text("the page"),
        ],
    );
    assert_eq!(msg.text(), "Opening the page");
    assert_eq!(msg.parts().len(), 3);
    assert_eq!(Message::new(Role::User, "hi").parts(), vec![ContentPart::text("hi")]);
}

#[test]
fn test_headers_merge_overrides() {
    let mut base = Headers::new();
    base.insert("x-api-key", "a");
    base.insert("anthropic-version", "v1");

    let mut custom = Headers::new();
    custom.insert("x-api-key", "b");
    base.merge_with(&custom);

    assert_eq!(base.get("x-api-key"), Some("b"));
    assert_eq!(base.len(), 2);
    assert_eq!(base.to_reqwest_headers().len(), 2);
}

#[test]
fn test_headers_skip_invalid_names() {
    let mut headers = Headers::new();
    headers.insert("bad header", "x");
    headers.insert("good", "y");
    assert_eq!(headers.to_reqwest_headers().len(), 1);
}

#[test]
fn test_usage_total() {
    let usage = Usage::new(10, 5);
    assert_eq!(usage.total_tokens, 15);
}

#[test]
fn test_response_accessors() {
    let response = GenerateResponse {
        content: vec![
            ResponseContent::Text {
                text: "Done".to_string(),
            },
            ResponseContent::ToolCall(ToolCall::new("t1", "scroll", json!({"direction": "down"}))),
        ],
        usage: Usage::default(),
        finish_reason: FinishReason::new(FinishReasonKind::ToolCalls),
        metadata: None,
    };
    assert_eq!(response.text(), "Done");
    assert_eq!(response.tool_calls()[0].name, "scroll");
}

#[tokio::test]
async fn test_generate_stream_from_events() {
    let stream = GenerateStream::from_events(vec![
        Ok(StreamEvent::start("m")),
        Ok(StreamEvent::text_delta("m", "hi")),
    ]);
    let events: Vec<_> = stream.collect().await;
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[1], Ok(StreamEvent::TextDelta { delta, .. }) if delta == "hi"));
}

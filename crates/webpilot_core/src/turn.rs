use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tool_call::{ToolResult, ToolUse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// Raw image bytes. Serialized as base64 so transcripts stay printable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub format: ImageFormat,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            format: ImageFormat::Jpeg,
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub uri: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ResourceRef {
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Text { text: String },
    ToolUse { tool_use: ToolUse },
    ToolResult { tool_result: ToolResult },
    Image { image: ImageData },
    Resource { resource: ResourceRef },
}

impl ContentItem {
    pub fn text(content: impl Into<String>) -> Self {
        ContentItem::Text {
            text: content.into(),
        }
    }

    pub fn tool_use(tool: ToolUse) -> Self {
        ContentItem::ToolUse { tool_use: tool }
    }

    pub fn tool_result(result: ToolResult) -> Self {
        ContentItem::ToolResult {
            tool_result: result,
        }
    }

    pub fn image(image: ImageData) -> Self {
        ContentItem::Image { image }
    }

    pub fn resource(resource: ResourceRef) -> Self {
        ContentItem::Resource { resource }
    }

    /// Text that carries nothing once trimmed.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, ContentItem::Text { text } if text.trim().is_empty())
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCondition {
    /// Output was cut short (token limit); the model could keep going.
    Continue,
    ToolPending,
    Done,
    Error,
}

impl StopCondition {
    pub fn is_tool_pending(&self) -> bool {
        matches!(self, StopCondition::ToolPending)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: Vec<ContentItem>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

impl PartialEq for Turn {
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role && self.content == other.content
    }
}

impl Turn {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            content: Vec::new(),
            timestamp: Utc::now(),
            token_usage: None,
        }
    }

    pub fn user() -> Self {
        Self::new(Role::User)
    }

    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.content.push(item);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_item(ContentItem::text(text))
    }

    pub fn with_token_usage(mut self, usage: TokenUsage) -> Self {
        self.token_usage = Some(usage);
        self
    }

    pub fn push(&mut self, item: ContentItem) {
        self.content.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Drops text items that are empty or whitespace only.
    pub fn without_blank_text(mut self) -> Self {
        self.content.retain(|item| !item.is_blank_text());
        self
    }

    pub fn tool_uses(&self) -> impl Iterator<Item = &ToolUse> {
        self.content.iter().filter_map(|item| match item {
            ContentItem::ToolUse { tool_use } => Some(tool_use),
            _ => None,
        })
    }

    pub fn tool_results(&self) -> impl Iterator<Item = &ToolResult> {
        self.content.iter().filter_map(|item| match item {
            ContentItem::ToolResult { tool_result } => Some(tool_result),
            _ => None,
        })
    }

    pub fn has_tool_uses(&self) -> bool {
        self.tool_uses().next().is_some()
    }

    /// Concatenated text items, space separated.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|item| match item {
                ContentItem::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool_call::ToolResultContent;

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");

        let decoded: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Role::Assistant);
    }

    #[test]
    fn test_content_item_text() {
        let item = ContentItem::text("hello world");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""type":"text"#));
        assert!(json.contains("hello world"));
    }

    #[test]
    fn test_image_bytes_are_base64() {
        let item = ContentItem::image(ImageData::jpeg(vec![0xff, 0xd8, 0xff]));
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""bytes":"/9j/""#));
        assert!(json.contains(r#""format":"jpeg""#));

        let decoded: ContentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, item);
    }

    #[test]
    fn test_image_format_media_type() {
        assert_eq!(ImageFormat::Jpeg.media_type(), "image/jpeg");
        assert_eq!(ImageFormat::from_media_type("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_media_type("image/gif"), None);
    }

    #[test]
    fn test_blank_text() {
        assert!(ContentItem::text("").is_blank_text());
        assert!(ContentItem::text("  \n").is_blank_text());
        assert!(!ContentItem::text("ok").is_blank_text());
        assert!(!ContentItem::image(ImageData::jpeg(vec![])).is_blank_text());
    }

    #[test]
    fn test_without_blank_text() {
        let turn = Turn::assistant()
            .with_text("")
            .with_item(ContentItem::tool_use(ToolUse::new(
                "t1",
                "screenshot",
                serde_json::json!({}),
            )))
            .with_text("   ");
        let turn = turn.without_blank_text();
        assert_eq!(turn.content.len(), 1);
        assert!(turn.has_tool_uses());
    }

    #[test]
    fn test_tool_iterators() {
        let turn = Turn::user()
            .with_item(ContentItem::tool_result(ToolResult::success(
                "t1",
                vec![ToolResultContent::json(serde_json::json!({"ok": true}))],
            )))
            .with_text("Current page: Title: 'x', URL: 'y'");
        assert_eq!(turn.tool_results().count(), 1);
        assert_eq!(turn.tool_uses().count(), 0);
        assert_eq!(turn.text(), "Current page: Title: 'x', URL: 'y'");
    }

    #[test]
    fn test_stop_condition() {
        assert!(StopCondition::ToolPending.is_tool_pending());
        assert!(!StopCondition::Done.is_tool_pending());
        let json = serde_json::to_string(&StopCondition::ToolPending).unwrap();
        assert_eq!(json, "\"tool_pending\"");
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage::new(6000, 120);
        assert_eq!(usage.total(), 6120);
    }

    #[test]
    fn test_turn_equality_ignores_timestamp() {
        let a = Turn::user().with_text("go");
        let b = Turn::user().with_text("go");
        assert_eq!(a, b);
    }
}

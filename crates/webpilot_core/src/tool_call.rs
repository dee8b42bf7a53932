use serde::{Deserialize, Serialize};

use crate::turn::ImageData;

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
}

impl ToolUse {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolResultContent {
    Text { text: String },
    Image { image: ImageData },
    Json { json: serde_json::Value },
}

impl ToolResultContent {
    pub fn text(text: impl Into<String>) -> Self {
        ToolResultContent::Text { text: text.into() }
    }

    pub fn image(image: ImageData) -> Self {
        ToolResultContent::Image { image }
    }

    pub fn json(json: serde_json::Value) -> Self {
        ToolResultContent::Json { json }
    }

    /// Images and structured payloads; the parts media stripping removes.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            ToolResultContent::Image { .. } | ToolResultContent::Json { .. }
        )
    }
}

/// The answer to one [`ToolUse`], matched by `tool_use_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: Vec<ToolResultContent>,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(tool_use_id: impl Into<String>, content: Vec<ToolResultContent>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content,
            is_error: false,
        }
    }

    /// A failed invocation, reported to the model as `{"error": message}`.
    pub fn error(tool_use_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: vec![ToolResultContent::json(
                serde_json::json!({ "error": message.into() }),
            )],
            is_error: true,
        }
    }
}

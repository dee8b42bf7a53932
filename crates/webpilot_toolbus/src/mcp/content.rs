//! Mapping between effector output and MCP content items.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;
use webpilot_core::{ImageData, ImageFormat, ResourceRef};

use super::protocol::{Content, ResourceContents};
use crate::tools::ToolContent;

/// Structured output is sent as JSON-encoded text, images as base64.
pub fn to_mcp(content: ToolContent) -> Content {
    match content {
        ToolContent::Text { text } => Content::text(text),
        ToolContent::Json { json } => Content::text(json.to_string()),
        ToolContent::Image { image } => {
            Content::image(BASE64.encode(&image.bytes), image.format.media_type())
        }
        ToolContent::Resource { resource } => Content::resource(ResourceContents {
            uri: resource.uri,
            mime_type: Some(resource.mime_type),
            text: resource.text,
        }),
    }
}

/// Text that parses as JSON becomes structured output again. Items of an
/// unknown type or with undecodable data are dropped.
pub fn from_mcp(content: Content) -> Option<ToolContent> {
    match content.content_type.as_str() {
        "text" => {
            let text = content.text?;
            match serde_json::from_str(&text) {
                Ok(json) => Some(ToolContent::json(json)),
                Err(_) => Some(ToolContent::text(text)),
            }
        }
        "image" => {
            let data = content.data?;
            let format = content
                .mime_type
                .as_deref()
                .and_then(ImageFormat::from_media_type)
                .unwrap_or(ImageFormat::Jpeg);
            match BASE64.decode(data.as_bytes()) {
                Ok(bytes) => Some(ToolContent::image(ImageData { format, bytes })),
                Err(e) => {
                    debug!(error = %e, "Dropping undecodable image content");
                    None
                }
            }
        }
        "resource" => {
            let resource = content.resource?;
            let mime_type = resource
                .mime_type
                .unwrap_or_else(|| "text/plain".to_string());
            let mut reference = ResourceRef::new(resource.uri, mime_type);
            reference.text = resource.text;
            Some(ToolContent::resource(reference))
        }
        other => {
            debug!(content_type = other, "Dropping unsupported content type");
            None
        }
    }
}

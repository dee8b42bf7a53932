mod error;

pub use error::ScreenshotError;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;
use webpilot_constant::defaults;
use webpilot_core::ImageData;

use crate::browser::SharedPage;
use crate::tools::{Tool, ToolContent, ToolResult};
use crate::workspace::SessionLayout;

/// Captures the viewport as JPEG, keeps a copy under the session's
/// screenshot directory and hands the image to the model.
pub struct Screenshot {
    page: SharedPage,
    layout: SessionLayout,
    quality: i64,
}

impl Screenshot {
    pub fn new(page: SharedPage, layout: SessionLayout) -> Self {
        Self {
            page,
            layout,
            quality: defaults::SCREENSHOT_JPEG_QUALITY,
        }
    }

    pub fn with_quality(mut self, quality: i64) -> Self {
        self.quality = quality.clamp(0, 100);
        self
    }

    async fn capture(&self) -> Result<(String, Vec<u8>), ScreenshotError> {
        let bytes = self.page.screenshot_jpeg(self.quality).await?;

        let path = self.layout.screenshot_path(&uuid::Uuid::new_v4().to_string());
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;

        let filename = path.to_string_lossy().to_string();
        info!(filename = %filename, bytes = bytes.len(), "Took screenshot");
        Ok((filename, bytes))
    }
}

#[async_trait]
impl Tool for Screenshot {
    fn name(&self) -> &'static str {
        "screenshot"
    }

    fn description(&self) -> &'static str {
        "Take a screenshot of the current page"
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _args: JsonValue) -> ToolResult {
        let (filename, bytes) = self.capture().await?;
        Ok(vec![
            ToolContent::json(serde_json::json!({ "filename": filename })),
            ToolContent::image(ImageData::jpeg(bytes)),
        ])
    }
}

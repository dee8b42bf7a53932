pub mod ask_user;
pub mod click;
pub mod navigate;
pub mod page_info;
pub mod screenshot;
pub mod scroll;
pub mod type_text;
pub mod write_file;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use webpilot_constant::defaults;
use webpilot_core::{ImageData, ResourceRef};

pub use ask_user::{AskUser, AskUserArgs, AskUserError};
pub use click::{Click, ClickArgs, ClickError};
pub use navigate::{Navigate, NavigateArgs, NavigateError};
pub use page_info::GetPageInfo;
pub use screenshot::{Screenshot, ScreenshotError};
pub use scroll::{Scroll, ScrollArgs, ScrollDirection, ScrollError};
pub use type_text::{TypeText, TypeTextArgs};
pub use write_file::{WriteFile, WriteFileArgs, WriteFileError};

/// One typed item of effector output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
    Json { json: JsonValue },
    Image { image: ImageData },
    Resource { resource: ResourceRef },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        ToolContent::Text { text: text.into() }
    }

    pub fn json(json: JsonValue) -> Self {
        ToolContent::Json { json }
    }

    pub fn image(image: ImageData) -> Self {
        ToolContent::Image { image }
    }

    pub fn resource(resource: ResourceRef) -> Self {
        ToolContent::Resource { resource }
    }

    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            ToolContent::Json { json } => Some(json),
            _ => None,
        }
    }
}

pub type ToolOutput = Vec<ToolContent>;

pub type ToolResult = anyhow::Result<ToolOutput>;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn parameters_schema(&self) -> JsonValue;
    async fn execute(&self, args: JsonValue) -> ToolResult;
}

/// Knobs shared by the browser effectors.
#[derive(Debug, Clone)]
pub struct EffectorOptions {
    /// Pause after navigate/click/scroll so the page can settle.
    pub settle_delay: Duration,
    pub jpeg_quality: i64,
    /// `None` waits for the human forever.
    pub ask_timeout: Option<Duration>,
}

impl Default for EffectorOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(defaults::SETTLE_DELAY_MS),
            jpeg_quality: defaults::SCREENSHOT_JPEG_QUALITY,
            ask_timeout: None,
        }
    }
}

impl EffectorOptions {
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_ask_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ask_timeout = timeout;
        self
    }
}

/// Sleeps unless the delay is zero.
pub(crate) async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

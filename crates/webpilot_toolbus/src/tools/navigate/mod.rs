mod args;
mod error;

pub use args::NavigateArgs;
pub use error::NavigateError;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::browser::SharedPage;
use crate::tools::{Tool, ToolContent, ToolResult, settle};

pub struct Navigate {
    page: SharedPage,
    settle_delay: Duration,
}

impl Navigate {
    pub fn new(page: SharedPage) -> Self {
        Self {
            page,
            settle_delay: Duration::ZERO,
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    async fn navigate(&self, url: &str) -> Result<JsonValue, NavigateError> {
        if url.trim().is_empty() {
            return Err(NavigateError::InvalidUrl("URL cannot be empty".to_string()));
        }

        info!(url, "Navigating");
        self.page.goto(url).await?;
        settle(self.settle_delay).await;

        let title = self.page.title().await?;
        let current_url = self.page.url().await?;
        Ok(serde_json::json!({ "title": title, "url": current_url }))
    }
}

#[async_trait]
impl Tool for Navigate {
    fn name(&self) -> &'static str {
        "navigate"
    }

    fn description(&self) -> &'static str {
        "Navigate to a specified URL"
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to navigate to"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolResult {
        let args: NavigateArgs = serde_json::from_value(args)?;
        let page = self.navigate(&args.url).await?;
        Ok(vec![ToolContent::json(page)])
    }
}

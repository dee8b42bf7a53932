use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::browser::SharedPage;
use crate::tools::{Tool, ToolContent, ToolResult};

const UNKNOWN: &str = "Unknown";

/// Title and URL of the current page. Never fails; unreadable fields
/// are reported as "Unknown".
pub struct GetPageInfo {
    page: SharedPage,
}

impl GetPageInfo {
    pub fn new(page: SharedPage) -> Self {
        Self { page }
    }
}

#[async_trait]
impl Tool for GetPageInfo {
    fn name(&self) -> &'static str {
        "get_page_info"
    }

    fn description(&self) -> &'static str {
        "Get information about the current page"
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _args: JsonValue) -> ToolResult {
        let title = self.page.title().await.unwrap_or_else(|e| {
            debug!(error = %e, "Page title unavailable");
            UNKNOWN.to_string()
        });
        let url = self.page.url().await.unwrap_or_else(|e| {
            debug!(error = %e, "Page url unavailable");
            UNKNOWN.to_string()
        });

        Ok(vec![ToolContent::json(serde_json::json!({
            "title": title,
            "url": url,
        }))])
    }
}

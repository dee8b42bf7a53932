mod args;
mod error;

pub use args::ClickArgs;
pub use error::ClickError;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::browser::SharedPage;
use crate::tools::{Tool, ToolContent, ToolResult, settle};

pub struct Click {
    page: SharedPage,
    settle_delay: Duration,
}

impl Click {
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

    fn validate(args: &ClickArgs) -> Result<(), ClickError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(args.x) || !valid(args.y) {
            return Err(ClickError::InvalidCoordinates {
                x: args.x,
                y: args.y,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Tool for Click {
    fn name(&self) -> &'static str {
        "click"
    }

    fn description(&self) -> &'static str {
        "Click at specific coordinates on the page"
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "x": {
                    "type": "number",
                    "description": "X coordinate for the click"
                },
                "y": {
                    "type": "number",
                    "description": "Y coordinate for the click"
                }
            },
            "required": ["x", "y"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolResult {
        let args: ClickArgs = serde_json::from_value(args)?;
        Self::validate(&args)?;

        info!(x = args.x, y = args.y, "Clicking");
        self.page.click(args.x, args.y).await.map_err(ClickError::from)?;
        settle(self.settle_delay).await;

        Ok(vec![ToolContent::json(serde_json::json!({
            "clicked_at": { "x": args.x, "y": args.y }
        }))])
    }
}

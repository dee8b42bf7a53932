mod args;
mod error;

pub use args::{ScrollArgs, ScrollDirection};
pub use error::ScrollError;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::browser::SharedPage;
use crate::tools::{Tool, ToolContent, ToolResult, settle};

pub struct Scroll {
    page: SharedPage,
    settle_delay: Duration,
}

impl Scroll {
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
}

#[async_trait]
impl Tool for Scroll {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn description(&self) -> &'static str {
        "Scroll the page up or down"
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "direction": {
                    "type": "string",
                    "enum": ["up", "down"],
                    "description": "Direction to scroll"
                },
                "amount": {
                    "type": "integer",
                    "description": "Number of pixels to scroll (default: 500)"
                }
            },
            "required": ["direction"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolResult {
        let args: ScrollArgs = serde_json::from_value(args)?;

        // An unknown direction is reported to the model, not raised.
        let Some(direction) = ScrollDirection::parse(&args.direction) else {
            warn!(direction = %args.direction, "Rejected scroll direction");
            return Ok(vec![ToolContent::json(serde_json::json!({
                "scrolled": false,
                "error": format!("Invalid direction: {}", args.direction),
            }))]);
        };

        info!(%direction, amount = args.amount, "Scrolling");
        self.page
            .scroll_by(direction.offset(args.amount))
            .await
            .map_err(ScrollError::from)?;
        settle(self.settle_delay).await;

        Ok(vec![ToolContent::json(serde_json::json!({
            "scrolled": true,
            "direction": direction.to_string(),
            "amount": args.amount,
        }))])
    }
}

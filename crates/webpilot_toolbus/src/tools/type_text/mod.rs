mod args;

pub use args::TypeTextArgs;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::browser::{BrowserError, SharedPage};
use crate::tools::{Tool, ToolContent, ToolResult};

/// Types into the focused element. Browser failures come back as a
/// `{"typed": false}` payload so the model can pick another element.
pub struct TypeText {
    page: SharedPage,
}

impl TypeText {
    pub fn new(page: SharedPage) -> Self {
        Self { page }
    }

    async fn type_into_focus(&self, args: &TypeTextArgs) -> Result<(), BrowserError> {
        self.page.type_text(&args.text).await?;
        if args.submit {
            self.page.press_enter().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Tool for TypeText {
    fn name(&self) -> &'static str {
        "type"
    }

    fn description(&self) -> &'static str {
        "Type text into the currently focused element"
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text to type"
                },
                "submit": {
                    "type": "boolean",
                    "description": "Whether to press Enter after typing"
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolResult {
        let args: TypeTextArgs = serde_json::from_value(args)?;

        let payload = match self.type_into_focus(&args).await {
            Ok(()) => {
                info!(chars = args.text.chars().count(), submit = args.submit, "Typed text");
                serde_json::json!({
                    "typed": true,
                    "text": args.text,
                    "submitted": args.submit,
                })
            }
            Err(e) => {
                warn!(error = %e, "Typing failed");
                serde_json::json!({ "typed": false, "error": e.to_string() })
            }
        };

        Ok(vec![ToolContent::json(payload)])
    }
}

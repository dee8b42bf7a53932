mod args;
mod error;

pub use args::AskUserArgs;
pub use error::AskUserError;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::prompt::Prompter;
use crate::tools::{Tool, ToolContent, ToolResult};

pub struct AskUser {
    prompter: Arc<dyn Prompter>,
    timeout: Option<Duration>,
}

impl AskUser {
    pub fn new(prompter: Arc<dyn Prompter>) -> Self {
        Self {
            prompter,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn ask(&self, question: &str) -> Result<String, AskUserError> {
        let answer = self.prompter.ask(question);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, answer)
                .await
                .map_err(|_| AskUserError::TimedOut(limit))?
                .map_err(AskUserError::Prompt),
            None => answer.await.map_err(AskUserError::Prompt),
        }
    }
}

#[async_trait]
impl Tool for AskUser {
    fn name(&self) -> &'static str {
        "ask_user"
    }

    fn description(&self) -> &'static str {
        "Ask the user a question and wait for their response"
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The question to ask the user"
                }
            },
            "required": ["question"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolResult {
        let args: AskUserArgs = serde_json::from_value(args)?;
        info!(question = %args.question, "Asking user");

        let response = self.ask(&args.question).await?;
        Ok(vec![ToolContent::json(serde_json::json!({ "response": response }))])
    }
}

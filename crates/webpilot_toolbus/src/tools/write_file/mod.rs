mod args;
mod error;

pub use args::WriteFileArgs;
pub use error::WriteFileError;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::artifacts::ArtifactStore;
use crate::tools::{Tool, ToolContent, ToolResult};

/// Persists model-authored text as a session artifact and returns the
/// resource reference. Recording the artifact is left to the caller.
pub struct WriteFile {
    store: ArtifactStore,
}

impl WriteFile {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for WriteFile {
    fn name(&self) -> &'static str {
        "write_file"
    }

    fn description(&self) -> &'static str {
        "Write content to a file and make it available as a resource"
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "filename": {
                    "type": "string",
                    "description": "Name of the file to write"
                },
                "content": {
                    "type": "string",
                    "description": "Content to write to the file"
                }
            },
            "required": ["filename", "content"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolResult {
        let args: WriteFileArgs = serde_json::from_value(args)?;

        let resource = self
            .store
            .write(&args.filename, &args.content)
            .await
            .map_err(WriteFileError::from)?;
        info!(uri = %resource.uri, "Artifact written");

        Ok(vec![ToolContent::resource(resource)])
    }
}

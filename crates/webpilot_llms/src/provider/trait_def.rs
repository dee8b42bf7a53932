use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, GenerateStream, Headers};

/// A model backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, e.g. `"anthropic"`.
    fn provider_id(&self) -> &str;

    /// Auth and protocol headers, with `custom_headers` merged on top.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// One complete (non-streaming) generation.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Streaming generation.
    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream>;

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

//! webpilot_llms: provider-agnostic model calls with streaming support.
//!
//! ```text
//! ProviderRegistry ── HashMap<String, Arc<dyn Provider>>
//!                          │
//!                          ▼
//!                   AnthropicProvider   (Messages API, SSE)
//! ```
//!
//! ```rust,no_run
//! use webpilot_llms::{AnthropicProvider, ProviderRegistry};
//!
//! let provider = AnthropicProvider::from_env().unwrap();
//! let registry = ProviderRegistry::new().register("anthropic", provider);
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};
pub use providers::AnthropicProvider;
pub use types::{
    ContentPart, FinishReason, FinishReasonKind, GenerateOptions, GenerateRequest,
    GenerateResponse, GenerateStream, Headers, ImagePart, Message, ResponseContent, Role,
    StreamEvent, Tool, ToolCall, ToolChoice, ToolResultPart, Usage,
};

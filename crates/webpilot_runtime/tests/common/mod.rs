//! Common test utilities: an in-memory page, a scripted model and a runtime
//! wired to both.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use webpilot_core::{SessionEvent, SessionId};
use webpilot_llms::types::{
    FinishReason, FinishReasonKind, GenerateRequest, GenerateResponse, GenerateStream, Headers,
    ResponseContent, StreamEvent, ToolCall, Usage,
};
use webpilot_llms::{Error as LlmError, Provider};
use webpilot_runtime::{Runtime, RuntimeConfig};
use webpilot_toolbus::{
    BrowserError, BrowserPage, EffectorHost, EffectorOptions, LocalHost, Prompter, SessionLayout,
    SharedPage, ToolBus,
};

pub const SESSION: &str = "sess-1";

/// A page that remembers the last url it was sent to.
pub struct FakePage {
    url: Mutex<String>,
}

impl FakePage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            url: Mutex::new("about:blank".to_string()),
        })
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn title(&self) -> Result<String, BrowserError> {
        let url = self.url.lock().unwrap().clone();
        Ok(if url == "https://x" { "X".to_string() } else { "Blank".to_string() })
    }

    async fn url(&self) -> Result<String, BrowserError> {
        Ok(self.url.lock().unwrap().clone())
    }

    async fn screenshot_jpeg(&self, _quality: i64) -> Result<Vec<u8>, BrowserError> {
        Ok(vec![0xff, 0xd8, 0xff, 0xe0])
    }

    async fn click(&self, _x: f64, _y: f64) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn scroll_by(&self, _dy: i64) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn type_text(&self, _text: &str) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn press_enter(&self) -> Result<(), BrowserError> {
        Ok(())
    }
}

pub struct FakePrompter;

#[async_trait]
impl Prompter for FakePrompter {
    async fn ask(&self, _question: &str) -> anyhow::Result<String> {
        Ok("yes".to_string())
    }
}

/// Replays queued responses for browsing calls and answers summary calls
/// (requests without tools) with a fixed summary.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<GenerateResponse>>,
    summary: Option<String>,
    pub requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<GenerateResponse>) -> Arc<Self> {
        Self::with_summary(responses, None)
    }

    pub fn with_summary(responses: Vec<GenerateResponse>, summary: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            summary: summary.map(str::to_string),
            requests: Mutex::new(Vec::new()),
        })
    }

    #[allow(dead_code)]
    pub fn summary_requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.options.tools.is_empty())
            .cloned()
            .collect()
    }

    fn next(&self, request: GenerateRequest) -> webpilot_llms::Result<GenerateResponse> {
        let is_summary = request.options.tools.is_empty();
        self.requests.lock().unwrap().push(request);

        if is_summary {
            return match &self.summary {
                Some(text) => Ok(text_response(text, 10)),
                None => Err(LlmError::provider_error("summary model unavailable")),
            };
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::Other("script exhausted".to_string()))
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, request: GenerateRequest) -> webpilot_llms::Result<GenerateResponse> {
        self.next(request)
    }

    async fn stream(&self, request: GenerateRequest) -> webpilot_llms::Result<GenerateStream> {
        let response = self.next(request)?;
        let mut events = vec![Ok(StreamEvent::start("msg_1"))];
        for content in response.content {
            match content {
                ResponseContent::Text { text } => {
                    // Two deltas per block to exercise reassembly.
                    let mid = text.len() / 2;
                    events.push(Ok(StreamEvent::text_delta("msg_1", &text[..mid])));
                    events.push(Ok(StreamEvent::text_delta("msg_1", &text[mid..])));
                }
                ResponseContent::ToolCall(call) => {
                    events.push(Ok(StreamEvent::tool_call_start(&call.id, &call.name)));
                    events.push(Ok(StreamEvent::tool_call_end(call.id, call.name, call.arguments)));
                }
            }
        }
        events.push(Ok(StreamEvent::finish(response.usage, response.finish_reason)));
        Ok(GenerateStream::from_events(events))
    }
}

pub fn text_response(text: &str, input_tokens: u32) -> GenerateResponse {
    GenerateResponse {
        content: vec![ResponseContent::Text {
            text: text.to_string(),
        }],
        usage: Usage::new(input_tokens, 5),
        finish_reason: FinishReason::new(FinishReasonKind::Stop),
        metadata: None,
    }
}

pub fn tool_response(id: &str, name: &str, args: Value, input_tokens: u32) -> GenerateResponse {
    GenerateResponse {
        content: vec![
            ResponseContent::Text {
                text: format!("Calling {}", name),
            },
            ResponseContent::ToolCall(ToolCall::new(id, name, args)),
        ],
        usage: Usage::new(input_tokens, 12),
        finish_reason: FinishReason::new(FinishReasonKind::ToolCalls),
        metadata: None,
    }
}

pub fn host(root: &Path) -> Arc<dyn EffectorHost> {
    let page: SharedPage = FakePage::new();
    let bus = ToolBus::with_options(
        SessionLayout::new(root, SessionId::from(SESSION.to_string())),
        page,
        Arc::new(FakePrompter),
        EffectorOptions::default().with_settle_delay(Duration::ZERO),
    );
    Arc::new(LocalHost::new(Arc::new(bus)))
}

pub fn config(root: &Path) -> RuntimeConfig {
    RuntimeConfig::new(root.to_path_buf()).with_system_prompt("You browse the web.")
}

pub async fn runtime(
    config: RuntimeConfig,
    provider: Arc<ScriptedProvider>,
) -> (Runtime, mpsc::Receiver<SessionEvent>) {
    let (tx, rx) = mpsc::channel(1024);
    let host = host(&config.workdir);
    let runtime = Runtime::new(
        config,
        SessionId::from(SESSION.to_string()),
        host,
        provider,
        tx,
    )
    .await
    .expect("runtime should start");
    (runtime, rx)
}

#[allow(dead_code)]
pub fn drain(rx: &mut mpsc::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

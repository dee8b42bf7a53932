use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use webpilot_core::SessionId;

use crate::browser::{BrowserError, BrowserPage, SharedPage};
use crate::prompt::Prompter;
use crate::tools::EffectorOptions;
use crate::workspace::SessionLayout;
use crate::ToolBus;

pub const SESSION: &str = "test-session";

pub const JPEG_BYTES: [u8; 4] = [0xff, 0xd8, 0xff, 0xe0];

/// Records every call; `failing()` makes every browser call error.
pub struct FakePage {
    calls: Mutex<Vec<String>>,
    url: Mutex<String>,
    failing: AtomicBool,
}

impl FakePage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            url: Mutex::new("about:blank".to_string()),
            failing: AtomicBool::new(false),
        })
    }

    pub fn failing() -> Arc<Self> {
        let page = Self::new();
        page.failing.store(true, Ordering::SeqCst);
        page
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), BrowserError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(BrowserError::Command("page crashed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.record(format!("goto {}", url))?;
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn title(&self) -> Result<String, BrowserError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BrowserError::Closed);
        }
        let url = self.url.lock().unwrap().clone();
        Ok(format!("Title of {}", url))
    }

    async fn url(&self) -> Result<String, BrowserError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BrowserError::Closed);
        }
        Ok(self.url.lock().unwrap().clone())
    }

    async fn screenshot_jpeg(&self, quality: i64) -> Result<Vec<u8>, BrowserError> {
        self.record(format!("screenshot q{}", quality))?;
        Ok(JPEG_BYTES.to_vec())
    }

    async fn click(&self, x: f64, y: f64) -> Result<(), BrowserError> {
        self.record(format!("click {},{}", x, y))
    }

    async fn scroll_by(&self, dy: i64) -> Result<(), BrowserError> {
        self.record(format!("scroll {}", dy))
    }

    async fn type_text(&self, text: &str) -> Result<(), BrowserError> {
        self.record(format!("type {}", text))
    }

    async fn press_enter(&self) -> Result<(), BrowserError> {
        self.record("enter".to_string())
    }
}

/// Answers every question with a fixed reply after an optional delay.
pub struct FakePrompter {
    answer: String,
    delay: Duration,
    pub questions: Mutex<Vec<String>>,
}

impl FakePrompter {
    pub fn new(answer: &str) -> Arc<Self> {
        Self::slow(answer, Duration::ZERO)
    }

    pub fn slow(answer: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_string(),
            delay,
            questions: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Prompter for FakePrompter {
    async fn ask(&self, question: &str) -> anyhow::Result<String> {
        self.questions.lock().unwrap().push(question.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.answer.clone())
    }
}

pub fn layout(root: &Path) -> SessionLayout {
    SessionLayout::new(root, SessionId::from(SESSION.to_string()))
}

/// A bus over fakes with no settle delay.
pub fn test_bus(root: &Path, page: Arc<FakePage>) -> ToolBus {
    let page: SharedPage = page;
    ToolBus::with_options(
        layout(root),
        page,
        FakePrompter::new("yes"),
        EffectorOptions::default().with_settle_delay(Duration::ZERO),
    )
}

pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

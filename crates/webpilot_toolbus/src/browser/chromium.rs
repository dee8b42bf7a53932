use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, InsertTextParams,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::layout::Point;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures_util::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{BrowserError, BrowserPage, BrowserSettings, SharedPage};

fn command_error(err: impl std::fmt::Display) -> BrowserError {
    BrowserError::Command(err.to_string())
}

/// A launched Chromium process with one open page.
pub struct ChromiumBrowser {
    browser: Mutex<Option<Browser>>,
    handler: JoinHandle<()>,
    page: Arc<ChromiumPage>,
}

impl ChromiumBrowser {
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, BrowserError> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.viewport_width, settings.viewport_height);
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &settings.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        info!(headless = settings.headless, "Launching Chromium");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // The CDP connection is only driven while the handler stream is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser handler stopped");
                    break;
                }
            }
        });

        let page = browser
            .new_page(settings.start_url.as_str())
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            handler,
            page: Arc::new(ChromiumPage { page }),
        })
    }

    pub fn page(&self) -> SharedPage {
        self.page.clone()
    }

    pub async fn close(&self) -> Result<(), BrowserError> {
        let Some(mut browser) = self.browser.lock().await.take() else {
            return Ok(());
        };
        browser.close().await.map_err(command_error)?;
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "Chromium did not exit cleanly");
        }
        self.handler.abort();
        info!("Chromium closed");
        Ok(())
    }
}

pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    async fn key_event(&self, kind: DispatchKeyEventType) -> Result<(), BrowserError> {
        let mut builder = DispatchKeyEventParams::builder()
            .r#type(kind.clone())
            .key("Enter")
            .code("Enter")
            .windows_virtual_key_code(13)
            .native_virtual_key_code(13);
        if kind == DispatchKeyEventType::KeyDown {
            builder = builder.text("\r");
        }
        let params = builder.build().map_err(BrowserError::Command)?;
        self.page.execute(params).await.map_err(command_error)?;
        Ok(())
    }
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.page.goto(url).await.map_err(command_error)?;
        self.page.wait_for_navigation().await.map_err(command_error)?;
        Ok(())
    }

    async fn title(&self) -> Result<String, BrowserError> {
        let title = self.page.get_title().await.map_err(command_error)?;
        Ok(title.unwrap_or_default())
    }

    async fn url(&self) -> Result<String, BrowserError> {
        let url = self.page.url().await.map_err(command_error)?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn screenshot_jpeg(&self, quality: i64) -> Result<Vec<u8>, BrowserError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Jpeg)
            .quality(quality)
            .build();
        self.page.screenshot(params).await.map_err(command_error)
    }

    async fn click(&self, x: f64, y: f64) -> Result<(), BrowserError> {
        self.page
            .click(Point::new(x, y))
            .await
            .map_err(command_error)?;
        Ok(())
    }

    async fn scroll_by(&self, dy: i64) -> Result<(), BrowserError> {
        self.page
            .evaluate(format!("window.scrollBy(0, {})", dy))
            .await
            .map_err(command_error)?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), BrowserError> {
        self.page
            .execute(InsertTextParams::new(text))
            .await
            .map_err(command_error)?;
        Ok(())
    }

    async fn press_enter(&self) -> Result<(), BrowserError> {
        self.key_event(DispatchKeyEventType::KeyDown).await?;
        self.key_event(DispatchKeyEventType::KeyUp).await
    }
}

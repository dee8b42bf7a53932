use std::path::PathBuf;

use webpilot_constant::defaults;

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Page loaded right after launch
    pub start_url: String,
    /// Chrome binary; auto-detected when unset
    pub executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: defaults::VIEWPORT_WIDTH,
            viewport_height: defaults::VIEWPORT_HEIGHT,
            start_url: "about:blank".to_string(),
            executable: None,
        }
    }
}

impl BrowserSettings {
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = url.into();
        self
    }

    /// Reads `WEBPILOT_HEADLESS`, `WEBPILOT_VIEWPORT` (`WIDTHxHEIGHT`),
    /// `WEBPILOT_START_URL` and `WEBPILOT_CHROME_PATH`. Unparseable values keep
    /// the default.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(value) = std::env::var("WEBPILOT_HEADLESS") {
            settings.headless = !matches!(value.to_lowercase().as_str(), "0" | "false" | "no");
        }

        if let Some((width, height)) = std::env::var("WEBPILOT_VIEWPORT")
            .ok()
            .and_then(|v| parse_viewport(&v))
        {
            settings.viewport_width = width;
            settings.viewport_height = height;
        }

        if let Ok(url) = std::env::var("WEBPILOT_START_URL") {
            settings.start_url = url;
        }

        settings.executable = std::env::var("WEBPILOT_CHROME_PATH").ok().map(PathBuf::from);
        settings
    }
}

fn parse_viewport(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.split_once('x')?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

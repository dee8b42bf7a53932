//! Session-scoped directory layout.
//!
//! ```text
//! {root}/screenshot/{session}/screenshot_{uuid}.jpeg
//! {root}/artefacts/{session}/{filename}
//! {root}/downloads/{uri host}/{filename}
//! ```
//!
//! Directories are created on demand by whoever writes into them.

use std::path::{Path, PathBuf};

use webpilot_constant::app;
use webpilot_core::SessionId;

#[derive(Debug, Clone)]
pub struct SessionLayout {
    root: PathBuf,
    session: SessionId,
}

impl SessionLayout {
    pub fn new(root: impl Into<PathBuf>, session: SessionId) -> Self {
        Self {
            root: root.into(),
            session,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn screenshot_dir(&self) -> PathBuf {
        self.root.join(app::SCREENSHOT_DIR).join(self.session.as_str())
    }

    pub fn screenshot_path(&self, shot_id: &str) -> PathBuf {
        self.screenshot_dir()
            .join(format!("screenshot_{}.jpeg", shot_id))
    }

    /// Parent of every session's artifact directory.
    pub fn artifacts_root(&self) -> PathBuf {
        self.root.join(app::ARTIFACTS_DIR)
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.artifacts_root().join(self.session.as_str())
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join(app::DOWNLOADS_DIR)
    }
}

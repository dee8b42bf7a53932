//! Files written by `write_file`, addressable as `artifact://{session}/{filename}`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use webpilot_constant::defaults;
use webpilot_core::{ArtifactUri, CoreError, ResourceRef, mime_type_for};

use crate::workspace::SessionLayout;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Invalid artifact filename: {0}")]
    InvalidFilename(String),

    #[error("Invalid artifact uri: {0}")]
    InvalidUri(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text content of one artifact plus its inferred mime type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    layout: SessionLayout,
}

impl ArtifactStore {
    pub fn new(layout: SessionLayout) -> Self {
        Self { layout }
    }

    pub fn uri_for(&self, filename: &str) -> ArtifactUri {
        ArtifactUri::new(self.layout.session().as_str(), filename)
    }

    fn validate_filename(filename: &str) -> Result<(), ArtifactError> {
        let invalid = filename.trim().is_empty()
            || filename.contains(['/', '\\'])
            || filename == "."
            || filename == "..";
        if invalid {
            return Err(ArtifactError::InvalidFilename(filename.to_string()));
        }
        Ok(())
    }

    fn path_for(&self, uri: &ArtifactUri) -> PathBuf {
        self.layout
            .artifacts_root()
            .join(uri.session())
            .join(uri.filename())
    }

    /// Writes `content` into this session's artifact directory and returns the
    /// resource reference with a short inline preview.
    pub async fn write(&self, filename: &str, content: &str) -> Result<ResourceRef, ArtifactError> {
        Self::validate_filename(filename)?;

        let dir = self.layout.artifacts_dir();
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(filename), content).await?;

        let uri = self.uri_for(filename);
        debug!(uri = %uri, bytes = content.len(), "Wrote artifact");

        let preview: String = content.chars().take(defaults::RESOURCE_PREVIEW_CHARS).collect();
        Ok(ResourceRef::new(uri.to_string(), mime_type_for(filename)).with_text(preview))
    }

    /// Resolves any session's artifact uri to its file content.
    pub async fn read(&self, uri: &str) -> Result<ArtifactContents, ArtifactError> {
        let parsed = ArtifactUri::parse(uri)?;
        let path = self.path_for(&parsed);

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ArtifactError::NotFound(parsed.filename().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(ArtifactContents {
            uri: parsed.to_string(),
            mime_type: parsed.mime_type().to_string(),
            text,
        })
    }

    /// Filenames in this session's artifact directory, sorted.
    pub async fn list(&self) -> Result<Vec<String>, ArtifactError> {
        let dir = self.layout.artifacts_dir();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Human-readable listing served as `artifact://list`.
    pub async fn listing(&self) -> Result<String, ArtifactError> {
        let names = self.list().await?;
        if names.is_empty() {
            return Ok("No artifacts found for this session".to_string());
        }

        let mut lines = vec!["Available artifacts:".to_string()];
        for name in names {
            lines.push(format!("- {}: {}", name, self.uri_for(&name)));
        }
        Ok(lines.join("\n"))
    }
}

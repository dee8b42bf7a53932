//! Artifact addressing and per-session tracking.
//!
//! Files written by effectors are exposed as `artifact://{session}/{filename}`.
//! The tracker remembers every such uri seen during a run so the driver can
//! download them all once the session ends.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CoreError, Result};

pub const ARTIFACT_SCHEME: &str = "artifact";

/// Uri of the listing resource, `artifact://list`.
pub const ARTIFACT_LIST_URI: &str = "artifact://list";

/// Mime type inferred from a filename extension.
pub fn mime_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".md") {
        "text/markdown"
    } else if filename.ends_with(".html") {
        "text/html"
    } else if filename.ends_with(".json") {
        "application/json"
    } else {
        "text/plain"
    }
}

/// A parsed `artifact://{session}/{filename}` uri.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactUri {
    session: String,
    filename: String,
}

impl ArtifactUri {
    pub fn new(session: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            filename: filename.into(),
        }
    }

    pub fn parse(uri: &str) -> Result<Self> {
        let url = Url::parse(uri)?;
        if url.scheme() != ARTIFACT_SCHEME {
            return Err(CoreError::Artifact(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                uri
            )));
        }

        let session = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| CoreError::Artifact(format!("missing session in {}", uri)))?;

        let filename = url.path().trim_start_matches('/');
        if filename.is_empty() {
            return Err(CoreError::Artifact(format!("missing filename in {}", uri)));
        }
        if filename.contains('/') || filename == ".." {
            return Err(CoreError::Artifact(format!(
                "nested artifact paths are not allowed: {}",
                uri
            )));
        }

        Ok(Self::new(session, filename))
    }

    /// Session segment of the uri; also the download directory name.
    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &'static str {
        mime_type_for(&self.filename)
    }
}

impl fmt::Display for ArtifactUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", ARTIFACT_SCHEME, self.session, self.filename)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub uri: String,
    pub first_seen_at_turn: usize,
}

/// Append-only set of artifact records keyed by uri, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ArtifactTracker {
    records: Vec<ArtifactRecord>,
    seen: HashSet<String>,
}

impl ArtifactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `uri`; returns false when it was already tracked.
    pub fn record(&mut self, uri: impl Into<String>, turn: usize) -> bool {
        let uri = uri.into();
        if !self.seen.insert(uri.clone()) {
            return false;
        }
        self.records.push(ArtifactRecord {
            uri,
            first_seen_at_turn: turn,
        });
        true
    }

    pub fn records(&self) -> &[ArtifactRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

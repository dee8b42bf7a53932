//! Session-end artifact retrieval.
//!
//! Every uri the tracker saw is fetched from the effector host and written to
//! `{downloads}/{uri host}/{filename}`. A failed artifact is logged and
//! skipped; the rest still download.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{info, warn};
use webpilot_core::{ArtifactTracker, ArtifactUri, SessionEvent};
use webpilot_toolbus::EffectorHost;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArtifact {
    pub uri: String,
    pub path: PathBuf,
    pub mime_type: String,
}

pub async fn download_artifacts(
    host: &dyn EffectorHost,
    tracker: &ArtifactTracker,
    downloads_dir: &Path,
    event_tx: &mpsc::Sender<SessionEvent>,
) -> Vec<DownloadedArtifact> {
    let mut downloaded = Vec::with_capacity(tracker.len());

    for record in tracker.records() {
        let uri = match ArtifactUri::parse(&record.uri) {
            Ok(uri) => uri,
            Err(e) => {
                warn!(uri = %record.uri, error = %e, "Skipping malformed artifact uri");
                continue;
            }
        };

        let contents = match host.read_artifact(&record.uri).await {
            Ok(contents) => contents,
            Err(e) => {
                warn!(uri = %record.uri, error = %e, "Failed to read artifact");
                continue;
            }
        };

        let dir = downloads_dir.join(uri.session());
        let path = dir.join(uri.filename());
        let written = match tokio::fs::create_dir_all(&dir).await {
            Ok(()) => tokio::fs::write(&path, contents.text.as_bytes()).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "Failed to save artifact");
            continue;
        }

        info!(uri = %record.uri, path = %path.display(), "Downloaded artifact");
        let _ = event_tx
            .send(SessionEvent::artifact_downloaded(
                &record.uri,
                path.display().to_string(),
            ))
            .await;

        downloaded.push(DownloadedArtifact {
            uri: record.uri.clone(),
            path,
            mime_type: contents.mime_type,
        });
    }

    downloaded
}

use serde_json::json;
use tempfile::TempDir;

use crate::artifacts::ArtifactStore;
use crate::tests::fakes::{SESSION, layout, runtime};
use crate::tools::{Tool, ToolContent, WriteFile};

#[test]
fn test_write_file_returns_markdown_resource() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let tool = WriteFile::new(ArtifactStore::new(layout(dir.path())));

        let output = tool
            .execute(json!({"filename": "r.md", "content": "# Title"}))
            .await
            .unwrap();

        let [ToolContent::Resource { resource }] = output.as_slice() else {
            panic!("expected a single resource");
        };
        assert_eq!(resource.uri, format!("artifact://{}/r.md", SESSION));
        assert_eq!(resource.mime_type, "text/markdown");
        assert_eq!(resource.text.as_deref(), Some("# Title"));

        let written = dir.path().join("artefacts").join(SESSION).join("r.md");
        assert_eq!(std::fs::read_to_string(written).unwrap(), "# Title");
    });
}

#[test]
fn test_write_file_preview_is_truncated() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let tool = WriteFile::new(ArtifactStore::new(layout(dir.path())));
        let content = "x".repeat(250);

        let output = tool
            .execute(json!({"filename": "long.txt", "content": content}))
            .await
            .unwrap();
        let ToolContent::Resource { resource } = &output[0] else {
            panic!("expected resource");
        };
        assert_eq!(resource.text.as_ref().unwrap().len(), 100);
        assert_eq!(resource.mime_type, "text/plain");
    });
}

#[test]
fn test_write_file_rejects_paths() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let tool = WriteFile::new(ArtifactStore::new(layout(dir.path())));

        let err = tool
            .execute(json!({"filename": "../escape.md", "content": "x"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid artifact filename"));
    });
}

#[test]
fn test_artifact_listing() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(layout(dir.path()));
        assert_eq!(store.listing().await.unwrap(), "No artifacts found for this session");

        store.write("b.txt", "b").await.unwrap();
        store.write("a.md", "a").await.unwrap();
        assert_eq!(
            store.listing().await.unwrap(),
            format!(
                "Available artifacts:\n- a.md: artifact://{s}/a.md\n- b.txt: artifact://{s}/b.txt",
                s = SESSION
            )
        );
    });
}

#[test]
fn test_artifact_read_missing() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(layout(dir.path()));

        let err = store
            .read(&format!("artifact://{}/nope.md", SESSION))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Artifact not found: nope.md");
    });
}

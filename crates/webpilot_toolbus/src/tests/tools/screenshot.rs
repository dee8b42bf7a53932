use serde_json::json;
use tempfile::TempDir;

use crate::tests::fakes::{FakePage, JPEG_BYTES, SESSION, layout, runtime};
use crate::tools::{Screenshot, Tool, ToolContent};

#[test]
fn test_screenshot_saves_and_returns_image() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let page = FakePage::new();
        let tool = Screenshot::new(page.clone(), layout(dir.path()));

        let output = tool.execute(json!({})).await.unwrap();
        assert_eq!(output.len(), 2);

        let filename = output[0].as_json().unwrap()["filename"].as_str().unwrap().to_string();
        assert!(filename.contains(&format!("screenshot/{}/screenshot_", SESSION)));
        assert!(filename.ends_with(".jpeg"));
        assert_eq!(std::fs::read(&filename).unwrap(), JPEG_BYTES.to_vec());

        let ToolContent::Image { image } = &output[1] else {
            panic!("expected image content");
        };
        assert_eq!(image.bytes, JPEG_BYTES.to_vec());
        assert_eq!(page.calls(), vec!["screenshot q80"]);
    });
}

#[test]
fn test_screenshot_quality_is_clamped() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let page = FakePage::new();
        let tool = Screenshot::new(page.clone(), layout(dir.path())).with_quality(250);

        tool.execute(json!({})).await.unwrap();
        assert_eq!(page.calls(), vec!["screenshot q100"]);
    });
}

#[test]
fn test_screenshot_failure() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let tool = Screenshot::new(FakePage::failing(), layout(dir.path()));
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("Capture failed"));
    });
}

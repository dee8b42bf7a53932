use serde_json::json;

use crate::tests::fakes::{FakePage, runtime};
use crate::tools::{Navigate, NavigateArgs, Tool, ToolContent};

#[test]
fn test_navigate_tool_name() {
    let tool = Navigate::new(FakePage::new());
    assert_eq!(tool.name(), "navigate");
    assert_eq!(tool.parameters_schema()["required"], json!(["url"]));
}

#[test]
fn test_navigate_args_parsing() {
    let args: NavigateArgs = serde_json::from_value(json!({"url": "https://example.com"})).unwrap();
    assert_eq!(args.url, "https://example.com");
}

#[test]
fn test_navigate_returns_title_and_url() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = Navigate::new(page.clone());

        let output = tool.execute(json!({"url": "https://x"})).await.unwrap();
        assert_eq!(
            output,
            vec![ToolContent::json(json!({"title": "Title of https://x", "url": "https://x"}))]
        );
        assert_eq!(page.calls(), vec!["goto https://x"]);
    });
}

#[test]
fn test_navigate_empty_url() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = Navigate::new(page.clone());

        let err = tool.execute(json!({"url": "  "})).await.unwrap_err();
        assert!(err.to_string().contains("URL cannot be empty"));
        assert!(page.calls().is_empty());
    });
}

#[test]
fn test_navigate_browser_failure() {
    let rt = runtime();
    rt.block_on(async {
        let tool = Navigate::new(FakePage::failing());
        let err = tool.execute(json!({"url": "https://x"})).await.unwrap_err();
        assert!(err.to_string().contains("Navigation failed"));
    });
}

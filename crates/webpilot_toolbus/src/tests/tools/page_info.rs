use serde_json::json;

use crate::tests::fakes::{FakePage, runtime};
use crate::browser::BrowserPage;
use crate::tools::{GetPageInfo, Tool, ToolContent};

#[test]
fn test_page_info_reports_current_page() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        page.goto("https://example.com").await.unwrap();
        let tool = GetPageInfo::new(page);

        let output = tool.execute(json!({})).await.unwrap();
        assert_eq!(
            output,
            vec![ToolContent::json(json!({
                "title": "Title of https://example.com",
                "url": "https://example.com"
            }))]
        );
    });
}

#[test]
fn test_page_info_unknown_on_failure() {
    let rt = runtime();
    rt.block_on(async {
        let tool = GetPageInfo::new(FakePage::failing());
        let output = tool.execute(json!({})).await.unwrap();
        assert_eq!(output, vec![ToolContent::json(json!({"title": "Unknown", "url": "Unknown"}))]);
    });
}

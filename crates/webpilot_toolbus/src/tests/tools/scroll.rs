use serde_json::json;

use crate::tests::fakes::{FakePage, runtime};
use crate::tools::{Scroll, ScrollArgs, Tool, ToolContent};

#[test]
fn test_scroll_default_amount() {
    let args: ScrollArgs = serde_json::from_value(json!({"direction": "down"})).unwrap();
    assert_eq!(args.amount, 500);
}

#[test]
fn test_scroll_down() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = Scroll::new(page.clone());

        let output = tool.execute(json!({"direction": "down"})).await.unwrap();
        assert_eq!(
            output,
            vec![ToolContent::json(json!({"scrolled": true, "direction": "down", "amount": 500}))]
        );
        assert_eq!(page.calls(), vec!["scroll 500"]);
    });
}

#[test]
fn test_scroll_up_is_case_insensitive() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = Scroll::new(page.clone());

        tool.execute(json!({"direction": "Up", "amount": 200})).await.unwrap();
        assert_eq!(page.calls(), vec!["scroll -200"]);
    });
}

#[test]
fn test_scroll_sideways_is_reported_not_raised() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = Scroll::new(page.clone());

        let output = tool.execute(json!({"direction": "sideways"})).await.unwrap();
        assert_eq!(
            output,
            vec![ToolContent::json(json!({
                "scrolled": false,
                "error": "Invalid direction: sideways"
            }))]
        );
        assert!(page.calls().is_empty());
    });
}

#[test]
fn test_scroll_extreme_amount_does_not_panic() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = Scroll::new(page.clone());

        let output = tool
            .execute(json!({"direction": "down", "amount": i64::MIN}))
            .await
            .unwrap();
        assert_eq!(output[0].as_json().unwrap()["scrolled"], true);
        assert_eq!(page.calls(), vec![format!("scroll {}", i64::MAX)]);
    });
}

#[test]
fn test_scroll_browser_failure() {
    let rt = runtime();
    rt.block_on(async {
        let tool = Scroll::new(FakePage::failing());
        let err = tool.execute(json!({"direction": "down"})).await.unwrap_err();
        assert!(err.to_string().contains("Scroll failed"));
    });
}

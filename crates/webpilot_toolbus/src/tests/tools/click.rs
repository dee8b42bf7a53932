use serde_json::json;

use crate::tests::fakes::{FakePage, runtime};
use crate::tools::{Click, ClickArgs, Tool, ToolContent};

#[test]
fn test_click_args_parsing() {
    let args: ClickArgs = serde_json::from_value(json!({"x": 10, "y": 20.5})).unwrap();
    assert_eq!(args.x, 10.0);
    assert_eq!(args.y, 20.5);
}

#[test]
fn test_click_reports_coordinates() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = Click::new(page.clone());

        let output = tool.execute(json!({"x": 100, "y": 200})).await.unwrap();
        assert_eq!(
            output,
            vec![ToolContent::json(json!({"clicked_at": {"x": 100.0, "y": 200.0}}))]
        );
        assert_eq!(page.calls(), vec!["click 100,200"]);
    });
}

#[test]
fn test_click_rejects_negative_coordinates() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = Click::new(page.clone());

        let err = tool.execute(json!({"x": -1, "y": 5})).await.unwrap_err();
        assert!(err.to_string().contains("non-negative"));
        assert!(page.calls().is_empty());
    });
}

#[test]
fn test_click_missing_coordinate() {
    let rt = runtime();
    rt.block_on(async {
        let tool = Click::new(FakePage::new());
        assert!(tool.execute(json!({"x": 5})).await.is_err());
    });
}

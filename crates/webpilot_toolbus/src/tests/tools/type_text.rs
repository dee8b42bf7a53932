use serde_json::json;

use crate::tests::fakes::{FakePage, runtime};
use crate::tools::{Tool, ToolContent, TypeText, TypeTextArgs};

#[test]
fn test_type_tool_name() {
    let tool = TypeText::new(FakePage::new());
    assert_eq!(tool.name(), "type");
}

#[test]
fn test_type_args_submit_defaults_false() {
    let args: TypeTextArgs = serde_json::from_value(json!({"text": "batteries"})).unwrap();
    assert!(!args.submit);
}

#[test]
fn test_type_and_submit() {
    let rt = runtime();
    rt.block_on(async {
        let page = FakePage::new();
        let tool = TypeText::new(page.clone());

        let output = tool
            .execute(json!({"text": "AAA batteries", "submit": true}))
            .await
            .unwrap();
        assert_eq!(
            output,
            vec![ToolContent::json(json!({
                "typed": true,
                "text": "AAA batteries",
                "submitted": true
            }))]
        );
        assert_eq!(page.calls(), vec!["type AAA batteries", "enter"]);
    });
}

#[test]
fn test_type_failure_is_reported() {
    let rt = runtime();
    rt.block_on(async {
        let tool = TypeText::new(FakePage::failing());
        let output = tool.execute(json!({"text": "hello"})).await.unwrap();

        let payload = output[0].as_json().unwrap();
        assert_eq!(payload["typed"], false);
        assert!(payload["error"].as_str().unwrap().contains("page crashed"));
    });
}

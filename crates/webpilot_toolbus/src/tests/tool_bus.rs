use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use tempfile::TempDir;

use super::fakes::{FakePage, runtime, test_bus};
use crate::{Tool, ToolBus, ToolBusError, ToolContent};

#[test]
fn test_default_catalog_order() {
    let dir = TempDir::new().unwrap();
    let bus = test_bus(dir.path(), FakePage::new());

    let names: Vec<String> = bus.list_tools().into_iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        vec![
            "navigate",
            "screenshot",
            "click",
            "scroll",
            "type",
            "ask_user",
            "write_file",
            "get_page_info"
        ]
    );
}

#[test]
fn test_catalog_entries_have_object_schemas() {
    let dir = TempDir::new().unwrap();
    let bus = test_bus(dir.path(), FakePage::new());

    for spec in bus.list_tools() {
        assert!(!spec.description.is_empty(), "{} has no description", spec.name);
        assert_eq!(spec.input_schema["type"], "object");
    }
}

#[test]
fn test_call_unknown_tool() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let bus = test_bus(dir.path(), FakePage::new());

        let err = bus.call("unknown_tool", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolBusError::NotFound(ref name) if name == "unknown_tool"));
        assert_eq!(err.to_string(), "Tool not found: unknown_tool");
    });
}

#[test]
fn test_call_with_bad_arguments_fails() {
    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let bus = test_bus(dir.path(), FakePage::new());

        let err = bus.call("click", json!({"x": "left"})).await.unwrap_err();
        assert!(matches!(err, ToolBusError::Failed { ref tool, .. } if tool == "click"));
    });
}

#[test]
fn test_register_overwrites_without_reordering() {
    struct QuietNavigate;

    #[async_trait]
    impl Tool for QuietNavigate {
        fn name(&self) -> &'static str {
            "navigate"
        }

        fn description(&self) -> &'static str {
            "Pretends to navigate"
        }

        fn parameters_schema(&self) -> JsonValue {
            json!({"type": "object", "properties": {}})
        }

        async fn execute(&self, _args: JsonValue) -> crate::ToolResult {
            Ok(vec![ToolContent::text("stayed put")])
        }
    }

    let rt = runtime();
    rt.block_on(async {
        let dir = TempDir::new().unwrap();
        let mut bus = test_bus(dir.path(), FakePage::new());
        bus.register(QuietNavigate);

        let tools = bus.list_tools();
        assert_eq!(tools.len(), 8);
        assert_eq!(tools[0].description, "Pretends to navigate");

        let (output, _) = bus.call("navigate", json!({})).await.unwrap();
        assert_eq!(output, vec![ToolContent::text("stayed put")]);
    });
}

#[test]
fn test_empty_bus() {
    let dir = TempDir::new().unwrap();
    let bus = ToolBus::empty(super::fakes::layout(dir.path()));
    assert!(bus.list_tools().is_empty());
    assert!(!bus.contains("navigate"));

    let shared = Arc::new(bus);
    assert_eq!(shared.layout().session().as_str(), super::fakes::SESSION);
}

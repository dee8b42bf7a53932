use std::time::Duration;

use serde_json::json;

use crate::tests::fakes::{FakePrompter, runtime};
use crate::tools::{AskUser, AskUserArgs, Tool, ToolContent};

#[test]
fn test_ask_user_default_question() {
    let args: AskUserArgs = serde_json::from_value(json!({})).unwrap();
    assert_eq!(args.question, "What would you like to do next?");
}

#[test]
fn test_ask_user_returns_response() {
    let rt = runtime();
    rt.block_on(async {
        let prompter = FakePrompter::new("Amazon please");
        let tool = AskUser::new(prompter.clone());

        let output = tool.execute(json!({"question": "Which store?"})).await.unwrap();
        assert_eq!(output, vec![ToolContent::json(json!({"response": "Amazon please"}))]);
        assert_eq!(*prompter.questions.lock().unwrap(), vec!["Which store?"]);
    });
}

#[test]
fn test_ask_user_waits_without_timeout() {
    let rt = runtime();
    rt.block_on(async {
        let tool = AskUser::new(FakePrompter::slow("late", Duration::from_millis(50)));
        let output = tool.execute(json!({"question": "?"})).await.unwrap();
        assert_eq!(output[0].as_json().unwrap()["response"], "late");
    });
}

#[test]
fn test_ask_user_timeout() {
    let rt = runtime();
    rt.block_on(async {
        let tool = AskUser::new(FakePrompter::slow("late", Duration::from_secs(5)))
            .with_timeout(Some(Duration::from_millis(20)));
        let err = tool.execute(json!({"question": "?"})).await.unwrap_err();
        assert!(err.to_string().contains("No answer within"));
    });
}

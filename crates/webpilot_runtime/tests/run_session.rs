//! End-to-end runs of the browsing loop against an in-process host and a
//! scripted model.

mod common;

use common::{config, drain, runtime, text_response, tool_response, ScriptedProvider, SESSION};
use serde_json::json;
use webpilot_core::{ContentItem, Role, SessionEvent, SessionStatus, ToolResultContent};
use webpilot_runtime::RuntimeError;

fn json_part(content: &[ToolResultContent]) -> &serde_json::Value {
    content
        .iter()
        .find_map(|c| match c {
            ToolResultContent::Json { json } => Some(json),
            _ => None,
        })
        .expect("tool result should carry JSON")
}

#[tokio::test]
async fn test_navigate_then_done_yields_four_turns() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider::new(vec![
        tool_response("t1", "navigate", json!({"url": "https://x"}), 100),
        text_response("I am on X.", 200),
    ]);
    let (mut rt, mut rx) = runtime(config(dir.path()), provider.clone()).await;

    let transcript = rt.run_session("go to X").await.unwrap();
    let turns = transcript.turns();

    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[0].text(), "go to X");

    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[1].content[0], ContentItem::text("Calling navigate"));
    assert_eq!(turns[1].tool_uses().next().unwrap().name, "navigate");

    assert_eq!(turns[2].role, Role::User);
    let result = turns[2].tool_results().next().unwrap();
    assert_eq!(result.tool_use_id, "t1");
    assert!(!result.is_error);
    assert_eq!(json_part(&result.content)["url"], "https://x");
    assert_eq!(turns[2].text(), "Current page: Title: 'X', URL: 'https://x'");

    assert_eq!(turns[3].text(), "I am on X.");
    assert!(transcript.tool_counts_balanced());
    assert_eq!(rt.session.status, SessionStatus::Completed);

    let events = drain(&mut rx);
    assert!(matches!(
        events.last(),
        Some(SessionEvent::SessionEnd {
            status: SessionStatus::Completed
        })
    ));
    assert!(events.iter().any(|e| matches!(e, SessionEvent::ToolDone { tool_use_id, .. } if tool_use_id == "t1")));

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].options.tools.len(), 8);
}

#[tokio::test]
async fn test_non_streaming_matches_streaming() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider::new(vec![
        tool_response("t1", "navigate", json!({"url": "https://x"}), 100),
        text_response("I am on X.", 200),
    ]);
    let (mut rt, _rx) = runtime(config(dir.path()).with_stream(false), provider).await;

    let transcript = rt.run_session("go to X").await.unwrap();
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript.turns()[1].content[0], ContentItem::text("Calling navigate"));
}

#[tokio::test]
async fn test_unknown_tool_becomes_error_result() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider::new(vec![
        tool_response("t1", "fly", json!({}), 100),
        text_response("Cannot fly.", 100),
    ]);
    let (mut rt, _rx) = runtime(config(dir.path()), provider).await;

    let transcript = rt.run_session("fly away").await.unwrap();
    let result = transcript.turns()[2].tool_results().next().unwrap();

    assert!(result.is_error);
    assert_eq!(
        result.content,
        vec![ToolResultContent::json(json!({"error": "Tool not found: fly"}))]
    );
    assert_eq!(transcript.len(), 4);
    assert_eq!(rt.session.status, SessionStatus::Completed);
}

#[tokio::test]
async fn test_sideways_scroll_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider::new(vec![
        tool_response("t1", "scroll", json!({"direction": "sideways"}), 100),
        text_response("ok", 100),
    ]);
    let (mut rt, _rx) = runtime(config(dir.path()), provider).await;

    let transcript = rt.run_session("scroll").await.unwrap();
    let result = transcript.turns()[2].tool_results().next().unwrap();

    assert!(!result.is_error);
    let payload = json_part(&result.content);
    assert_eq!(payload["scrolled"], false);
    assert!(payload["error"].as_str().unwrap().contains("sideways"));
}

#[tokio::test]
async fn test_write_file_registers_and_downloads_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider::new(vec![
        tool_response(
            "t1",
            "write_file",
            json!({"filename": "r.md", "content": "# Title"}),
            100,
        ),
        text_response("Saved.", 100),
    ]);
    let (mut rt, mut rx) = runtime(config(dir.path()), provider).await;

    let transcript = rt.run_session("write it down").await.unwrap();

    let uri = format!("artifact://{}/r.md", SESSION);
    let records = rt.session.artifacts.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].uri, uri);
    assert_eq!(records[0].first_seen_at_turn, 2);

    let result = transcript.turns()[2].tool_results().next().unwrap();
    let resource = &json_part(&result.content)["resource"];
    assert_eq!(resource["uri"], uri.as_str());

    let downloaded = dir.path().join("downloads").join(SESSION).join("r.md");
    assert_eq!(std::fs::read_to_string(downloaded).unwrap(), "# Title");

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(e, SessionEvent::ArtifactRecorded { uri: u } if *u == uri)));
    assert!(events.iter().any(|e| matches!(e, SessionEvent::ArtifactDownloaded { .. })));
}

#[tokio::test]
async fn test_earlier_screenshots_are_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider::new(vec![
        tool_response("t1", "screenshot", json!({}), 100),
        tool_response("t2", "screenshot", json!({}), 100),
        text_response("Seen.", 100),
    ]);
    let (mut rt, _rx) = runtime(config(dir.path()), provider).await;

    let transcript = rt.run_session("look twice").await.unwrap();
    let turns = transcript.turns();
    assert_eq!(turns.len(), 6);

    let first = turns[2].tool_results().next().unwrap();
    assert_eq!(first.content, vec![ToolResultContent::text("media removed")]);

    let latest = turns[4].tool_results().next().unwrap();
    assert!(latest
        .content
        .iter()
        .any(|c| matches!(c, ToolResultContent::Image { .. })));
    assert!(turns.iter().all(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_max_turns_stops_after_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider::new(vec![tool_response(
        "t1",
        "navigate",
        json!({"url": "https://x"}),
        100,
    )]);
    let (mut rt, _rx) = runtime(config(dir.path()).with_max_turns(1), provider).await;

    let transcript = rt.run_session("go to X").await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(rt.session.status, SessionStatus::Completed);
}

#[tokio::test]
async fn test_model_failure_ends_session() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider::new(Vec::new());
    let (mut rt, mut rx) = runtime(config(dir.path()), provider).await;

    let err = rt.run_session("go to X").await.unwrap_err();
    assert!(matches!(err, RuntimeError::LlmFailed(_)));
    assert!(err.is_connectivity());
    assert!(matches!(rt.session.status, SessionStatus::Failed { .. }));

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(e, SessionEvent::Error { .. })));
}

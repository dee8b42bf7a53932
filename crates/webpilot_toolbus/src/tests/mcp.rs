use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use super::fakes::{FakePage, SESSION, test_bus};
use crate::mcp::{McpClient, McpResult, McpServer, StdioTransport};

fn connect(dir: &TempDir) -> (McpClient, JoinHandle<McpResult<()>>) {
    let bus = Arc::new(test_bus(dir.path(), FakePage::new()));
    let (client_side, server_side) = tokio::io::duplex(64 * 1024);

    let server = McpServer::new(bus);
    let handle = tokio::spawn(async move {
        let (read, write) = tokio::io::split(server_side);
        server.serve(read, write).await
    });

    let (read, write) = tokio::io::split(client_side);
    let client = McpClient::with_transport(StdioTransport::from_streams(read, write, "browser"));
    (client, handle)
}

#[tokio::test]
async fn test_initialize_and_list_tools() {
    let dir = TempDir::new().unwrap();
    let (mut client, server) = connect(&dir);

    let init = client.initialize().await.unwrap();
    assert_eq!(init.protocol_version, "2024-11-05");
    assert_eq!(init.server_info.name, "webpilot");
    assert!(init.capabilities.resources.is_some());

    let tools = client.list_tools().await.unwrap();
    assert_eq!(tools.len(), 8);
    assert_eq!(tools[0].name, "navigate");
    assert_eq!(tools[0].input_schema["required"], json!(["url"]));

    client.shutdown().await.unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_call_tool_json_output_is_text() {
    let dir = TempDir::new().unwrap();
    let (mut client, _server) = connect(&dir);
    client.initialize().await.unwrap();

    let result = client
        .call_tool("navigate", json!({"url": "https://x"}))
        .await
        .unwrap();
    assert!(!result.is_error);
    assert_eq!(result.content[0].content_type, "text");

    let parsed: serde_json::Value = serde_json::from_str(&result.text()).unwrap();
    assert_eq!(parsed, json!({"title": "Title of https://x", "url": "https://x"}));
}

#[tokio::test]
async fn test_call_unknown_tool_is_tool_error() {
    let dir = TempDir::new().unwrap();
    let (mut client, _server) = connect(&dir);
    client.initialize().await.unwrap();

    let result = client.call_tool("fly", json!({})).await.unwrap();
    assert!(result.is_error);
    assert_eq!(result.text(), "Error: Tool not found: fly");
}

#[tokio::test]
async fn test_resources() {
    let dir = TempDir::new().unwrap();
    let (mut client, _server) = connect(&dir);
    client.initialize().await.unwrap();

    let listing = client.read_resource("artifact://list").await.unwrap();
    assert_eq!(
        listing.contents[0].text.as_deref(),
        Some("No artifacts found for this session")
    );

    client
        .call_tool("write_file", json!({"filename": "notes.md", "content": "# Notes"}))
        .await
        .unwrap();

    let resources = client.list_resources().await.unwrap();
    let uris: Vec<&str> = resources.iter().map(|r| r.uri.as_str()).collect();
    let artifact_uri = format!("artifact://{}/notes.md", SESSION);
    assert_eq!(uris, vec!["artifact://list", artifact_uri.as_str()]);

    let read = client.read_resource(&artifact_uri).await.unwrap();
    assert_eq!(read.contents[0].text.as_deref(), Some("# Notes"));
    assert_eq!(read.contents[0].mime_type.as_deref(), Some("text/markdown"));

    let missing = client
        .read_resource(&format!("artifact://{}/gone.txt", SESSION))
        .await
        .unwrap();
    assert_eq!(
        missing.contents[0].text.as_deref(),
        Some("Error: Artifact not found: gone.txt")
    );
    assert_eq!(missing.contents[0].mime_type.as_deref(), Some("text/plain"));

    let templates = client.list_resource_templates().await.unwrap();
    assert_eq!(templates[0].uri_template, "artifact://{session_id}/{filename}");
}

#[tokio::test]
async fn test_invalid_resource_uri_is_rpc_error() {
    let dir = TempDir::new().unwrap();
    let (mut client, _server) = connect(&dir);
    client.initialize().await.unwrap();

    let err = client.read_resource("https://example.com/x").await.unwrap_err();
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_ping() {
    let dir = TempDir::new().unwrap();
    let (mut client, _server) = connect(&dir);
    client.ping().await.unwrap();
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    let dir = TempDir::new().unwrap();
    let bus = Arc::new(test_bus(dir.path(), FakePage::new()));
    let (client_side, server_side) = tokio::io::duplex(64 * 1024);
    let server = McpServer::new(bus);
    let handle = tokio::spawn(async move {
        let (read, write) = tokio::io::split(server_side);
        server.serve(read, write).await
    });

    let (read, mut write) = tokio::io::split(client_side);
    let frames = [
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 7, "method": "ping"}),
        json!({"jsonrpc": "2.0", "method": "exit"}),
    ];
    for frame in &frames {
        write.write_all(format!("{}\n", frame).as_bytes()).await.unwrap();
    }
    write.flush().await.unwrap();

    handle.await.unwrap().unwrap();

    let mut lines = BufReader::new(read).lines();
    let reply: serde_json::Value =
        serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    assert_eq!(reply["id"], json!(7));
    assert_eq!(reply["result"], json!({}));
    assert!(lines.next_line().await.unwrap().is_none());
}

//! Newline-delimited JSON-RPC framing.
//!
//! Each message is one line of compact JSON. The transport owns either a
//! spawned server process or an arbitrary pair of byte streams.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use super::error::{McpError, McpResult};
use super::protocol::{JsonRpcRequest, JsonRpcResponse};

type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Reads the next non-blank line as JSON. `None` at end of stream.
pub(crate) async fn read_frame<R>(reader: &mut R) -> McpResult<Option<JsonValue>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        return serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| McpError::Protocol(format!("Invalid JSON frame: {}", e)));
    }
}

pub(crate) async fn write_frame<W, T>(writer: &mut W, message: &T) -> McpResult<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Client side of a JSON-RPC connection.
pub struct StdioTransport {
    child: Option<Child>,
    reader: BufReader<BoxedReader>,
    writer: BoxedWriter,
    next_id: u64,
    label: String,
}

impl StdioTransport {
    /// Spawns `command` and talks to it over its stdin/stdout.
    pub fn spawn(
        command: &str,
        args: &[String],
        env: &HashMap<String, String>,
        working_dir: Option<&Path>,
        label: &str,
    ) -> McpResult<Self> {
        info!(command, ?args, "Starting effector host process");

        let mut cmd = Command::new(command);
        cmd.args(args)
            .envs(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| McpError::StartFailed(format!("Failed to start '{}': {}", command, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| McpError::StartFailed("Could not capture stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| McpError::StartFailed("Could not capture stdout".to_string()))?;

        let mut transport = Self::from_streams(stdout, stdin, label);
        transport.child = Some(child);
        Ok(transport)
    }

    pub fn from_streams<R, W>(reader: R, writer: W, label: &str) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            child: None,
            reader: BufReader::new(Box::new(reader)),
            writer: Box::new(writer),
            next_id: 1,
            label: label.to_string(),
        }
    }

    /// Sends a request and waits for the response carrying the same id.
    /// Server-initiated messages that arrive in between are logged and skipped.
    pub async fn send_request<T: DeserializeOwned>(
        &mut self,
        method: &str,
        params: Option<JsonValue>,
    ) -> McpResult<T> {
        let id = self.next_id;
        self.next_id += 1;

        let request = JsonRpcRequest::new(id, method, params);
        debug!(peer = %self.label, id, method, "Sending request");
        write_frame(&mut self.writer, &request).await?;

        loop {
            let frame = read_frame(&mut self.reader).await?.ok_or(McpError::Closed)?;

            let is_response = frame.get("result").is_some() || frame.get("error").is_some();
            if !is_response || frame.get("id").and_then(JsonValue::as_u64) != Some(id) {
                debug!(peer = %self.label, ?frame, "Skipping unrelated message");
                continue;
            }

            let response: JsonRpcResponse = serde_json::from_value(frame)?;
            let result = response.into_result().map_err(|e| McpError::JsonRpc {
                code: e.code,
                message: e.message,
            })?;
            return Ok(serde_json::from_value(result)?);
        }
    }

    pub async fn send_notification(&mut self, method: &str, params: Option<JsonValue>) -> McpResult<()> {
        let notification = JsonRpcRequest::notification(method, params);
        debug!(peer = %self.label, method, "Sending notification");
        write_frame(&mut self.writer, &notification).await
    }

    /// Closes stdin and reaps the process, if there is one.
    pub async fn close(&mut self) -> McpResult<()> {
        self.writer.shutdown().await.ok();
        if let Some(mut child) = self.child.take() {
            match tokio::time::timeout(std::time::Duration::from_secs(2), child.wait()).await {
                Ok(status) => {
                    let status = status?;
                    debug!(peer = %self.label, %status, "Process exited");
                }
                Err(_) => {
                    warn!(peer = %self.label, "Process did not exit, killing");
                    child.kill().await?;
                }
            }
        }
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

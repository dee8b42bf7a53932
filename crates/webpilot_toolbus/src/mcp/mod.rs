//! Model Context Protocol plumbing for running the effectors out of process.
//!
//! - **protocol**: JSON-RPC 2.0 and MCP message types
//! - **transport**: newline-delimited JSON over a child process or any byte stream
//! - **config**: TOML description of the effector server process
//! - **client**: [`McpClient`], the caller side
//! - **server**: [`McpServer`], exposes a [`crate::ToolBus`] and its artifacts
//! - **content**: conversion between MCP content items and [`crate::ToolContent`]

pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

pub use client::McpClient;
pub use config::{ConfigError, McpServerConfig, McpServersConfig};
pub use error::{McpError, McpResult};
pub use protocol::{
    CallToolRequest, CallToolResult, ClientCapabilities, Content, Implementation,
    InitializeParams, InitializeResult, JsonRpcErrorObject, JsonRpcRequest, JsonRpcResponse,
    ListResourceTemplatesResult, ListResourcesResult, ListToolsResult, ReadResourceRequest,
    ReadResourceResult, Resource, ResourceContents, ResourceTemplate, ServerCapabilities, Tool,
};
pub use server::McpServer;
pub use transport::StdioTransport;

mod fakes;
mod mcp;
mod tool_bus;
mod tools;

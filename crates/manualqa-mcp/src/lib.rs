//! Manualqa MCP Server
//!
//! Model Context Protocol server that lets AI assistants ask questions
//! against equipment manuals.

pub mod protocol;
mod server;
pub mod tools;

pub use server::{start_server, McpServer};

//! Model Context Protocol (MCP) server implementation
//!
//! This module provides an MCP server using the Streamable HTTP transport.
//! The server exposes the same operations as the REST API as MCP tools.
//!
//! # Architecture
//!
//! - **server**: `McpServer`, the `ServerHandler` hosting all tools
//! - **tools**: One module per concern, each contributing a tool router
//!   - projects: projects, statuses, issue types, users, priorities
//!   - issues: issue CRUD and comments
//!   - bulk: bulk status/assignee/priority/milestone/category/delete
//! - **service**: Streamable HTTP service for mounting under Axum
//!
//! Generic over `B: IssueBackend` (no dynamic dispatch).

pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod server_test;

pub use server::McpServer;
pub use service::create_mcp_service;

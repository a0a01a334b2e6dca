//! MCP server implementation
//!
//! Hosts every tool on one server type. Each tools module contributes its
//! own router; they are summed here.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use super::tools::read_only_error;
use crate::backend::IssueBackend;

/// Main MCP server coordinator
///
/// Generic over `B: IssueBackend` for zero-cost abstraction (no dynamic dispatch).
pub struct McpServer<B: IssueBackend> {
    backend: Arc<B>,
    read_only: bool,
    tool_router: ToolRouter<Self>,
}

// Manual Clone impl - only the Arc needs to be cloneable, not B
impl<B: IssueBackend> Clone for McpServer<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            read_only: self.read_only,
            tool_router: self.tool_router.clone(),
        }
    }
}

impl<B: IssueBackend + 'static> McpServer<B> {
    /// Create a new MCP server over `backend`.
    ///
    /// With `read_only` set, every mutating tool fails before touching the backend.
    pub fn new(backend: Arc<B>, read_only: bool) -> Self {
        Self {
            backend,
            read_only,
            tool_router: Self::project_tools() + Self::issue_tools() + Self::bulk_tools(),
        }
    }

    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn ensure_writable(&self) -> Result<(), McpError> {
        if self.read_only {
            Err(read_only_error())
        } else {
            Ok(())
        }
    }

    /// Names of every registered tool.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }
}

#[tool_handler(router = self.tool_router)]
impl<B: IssueBackend + 'static> ServerHandler for McpServer<B> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(
            "BacklogMCP - Manage Backlog projects and issues, with bulk status, assignee, \
             priority, milestone, category and delete operations. Names such as \
             \"In Progress\" or \"中\" are resolved to IDs within the issue's project."
                .to_string(),
        );
        info
    }
}

//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::backend::IssueBackend;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// Every session gets its own [`McpServer`] over the shared backend.
///
/// # Example
/// ```no_run
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use backlog_mcp::backend::{BacklogClient, BacklogConfig};
/// # use std::sync::Arc;
/// # use backlog_mcp::mcp::create_mcp_service;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let client = BacklogClient::new(BacklogConfig::for_space("key", "myteam", "backlog.com"))?;
///
/// let ct = CancellationToken::new();
/// let mcp_service = create_mcp_service(Arc::new(client), false, ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<B: IssueBackend + 'static>(
    backend: Arc<B>,
    read_only: bool,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<B>, LocalSessionManager> {
    // Returns io::Error to match rmcp's expected factory signature
    let service_factory = move || -> Result<McpServer<B>, std::io::Error> {
        Ok(McpServer::new(Arc::clone(&backend), read_only))
    };

    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}

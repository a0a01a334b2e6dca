//! Backlog MCP server binary.
//!
//! Serves the REST API, its OpenAPI docs and the MCP endpoint over one
//! Backlog client.

#[tokio::main]
async fn main() -> miette::Result<()> {
    backlog_mcp::cli::run().await?;
    Ok(())
}

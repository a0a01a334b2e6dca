//! HTTP server: REST routes, OpenAPI docs and the mounted MCP endpoint.

mod read_only;
mod routes;
mod state;
mod v1;


use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::backend::IssueBackend;
use crate::mcp::create_mcp_service;

pub use read_only::READ_ONLY_MESSAGE;
pub use routes::{ApiDoc, create_router};
pub use state::AppState;

pub const DEFAULT_PORT: u16 = 8000;

/// API server errors
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind to {addr}: {source}")]
    #[diagnostic(
        code(backlog_mcp::api::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(backlog_mcp::api::serve))]
    Serve(#[from] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Reject every write operation on both surfaces
    pub read_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            read_only: false,
        }
    }
}

impl Config {
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backlog_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the API server with the given configuration and backend.
///
/// The REST routes and the MCP endpoint share one backend instance and its
/// lookup cache. Ctrl-C triggers a graceful shutdown of both.
pub async fn run<B: IssueBackend + 'static>(config: Config, backend: B) -> Result<(), ApiError> {
    init_tracing();

    let backend = Arc::new(backend);
    let ct = CancellationToken::new();

    let mcp_service =
        create_mcp_service(Arc::clone(&backend), config.read_only, ct.child_token());
    let state = AppState::new(backend, config.read_only);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .nest_service("/mcp", mcp_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(
        read_only = config.read_only,
        "API server listening on http://{}", addr
    );
    info!("MCP endpoint at http://{}/mcp, docs at http://{}/docs", addr, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
            ct.cancel();
        })
        .await?;

    Ok(())
}

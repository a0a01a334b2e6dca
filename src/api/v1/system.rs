//! System health and status handlers.

use axum::Json;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
}

/// Service entry point response
#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Welcome to BacklogMCP API")]
    pub message: String,
    /// API documentation path
    #[schema(example = "/docs")]
    pub docs: String,
    /// MCP endpoint path
    #[schema(example = "/mcp")]
    pub mcp: String,
}

/// Service info
///
/// Returns links to the API documentation and the MCP endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service info", body = RootResponse)
    )
)]
#[instrument]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to BacklogMCP API".to_string(),
        docs: "/docs".to_string(),
        mcp: "/mcp".to_string(),
    })
}

/// Health check endpoint
///
/// Returns the current health status of the API
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

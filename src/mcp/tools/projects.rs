//! Project and lookup tools
//!
//! Read-only tools for projects, their statuses and issue types, and the
//! space-wide user and priority listings.

use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::CallToolResult,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::backend::{EntityKind, IssueBackend};
use crate::mcp::McpServer;
use crate::mcp::tools::{json_result, map_backend_error};
use crate::service;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProjectKeyParams {
    #[schemars(description = "Project key (e.g. TEST) or numeric project ID")]
    pub project_key: String,
}

impl<B: IssueBackend + 'static> McpServer<B> {
    pub(crate) fn project_tools() -> ToolRouter<Self> {
        Self::project_tool_router()
    }
}

#[tool_router(router = project_tool_router)]
impl<B: IssueBackend + 'static> McpServer<B> {
    #[tool(description = "List all projects visible to the configured API key")]
    pub async fn get_projects(&self) -> Result<CallToolResult, McpError> {
        let projects = service::list_projects(self.backend())
            .await
            .map_err(map_backend_error)?;
        json_result(&projects)
    }

    #[tool(description = "Get a project by key or ID")]
    pub async fn get_project(
        &self,
        params: Parameters<ProjectKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = service::get_project(self.backend(), &params.0.project_key)
            .await
            .map_err(map_backend_error)?;
        json_result(&project)
    }

    #[tool(description = "List the statuses of a project (id and name)")]
    pub async fn get_project_statuses(
        &self,
        params: Parameters<ProjectKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let statuses =
            service::list_project_lookup(self.backend(), EntityKind::Status, &params.0.project_key)
                .await
                .map_err(map_backend_error)?;
        json_result(&statuses)
    }

    #[tool(description = "List the issue types of a project (id and name)")]
    pub async fn get_issue_types(
        &self,
        params: Parameters<ProjectKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let issue_types = service::list_project_lookup(
            self.backend(),
            EntityKind::IssueType,
            &params.0.project_key,
        )
        .await
        .map_err(map_backend_error)?;
        json_result(&issue_types)
    }

    #[tool(description = "List the users of the space")]
    pub async fn get_users(&self) -> Result<CallToolResult, McpError> {
        let users = service::list_users(self.backend())
            .await
            .map_err(map_backend_error)?;
        json_result(&users)
    }

    #[tool(description = "List issue priorities (id and name)")]
    pub async fn get_priorities(&self) -> Result<CallToolResult, McpError> {
        let priorities = service::list_priorities(self.backend())
            .await
            .map_err(map_backend_error)?;
        json_result(&priorities)
    }
}

//! Bulk operation tools
//!
//! Each tool applies one change to a list of issues and reports per-item
//! success and failure. A failing item never aborts the rest.

use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::CallToolResult,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::backend::IssueBackend;
use crate::mcp::McpServer;
use crate::mcp::tools::json_result;
use crate::service::{self, Mutation};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkStatusParams {
    #[schemars(description = "Issue IDs or keys (e.g. [\"TEST-1\", \"TEST-2\"])")]
    pub issue_ids: Vec<String>,
    #[schemars(description = "Status ID to set")]
    pub status_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkAssigneeParams {
    #[schemars(description = "Issue IDs or keys")]
    pub issue_ids: Vec<String>,
    #[schemars(description = "Assignee user ID to set")]
    pub assignee_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkPriorityParams {
    #[schemars(description = "Issue IDs or keys")]
    pub issue_ids: Vec<String>,
    #[schemars(description = "Priority ID to set")]
    pub priority_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkMilestoneParams {
    #[schemars(description = "Issue IDs or keys")]
    pub issue_ids: Vec<String>,
    #[schemars(description = "Milestone ID to set")]
    pub milestone_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkCategoryParams {
    #[schemars(description = "Issue IDs or keys")]
    pub issue_ids: Vec<String>,
    #[schemars(description = "Category ID to set")]
    pub category_id: i64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BulkDeleteParams {
    #[schemars(description = "Issue IDs or keys to delete")]
    pub issue_ids: Vec<String>,
}

impl<B: IssueBackend + 'static> McpServer<B> {
    pub(crate) fn bulk_tools() -> ToolRouter<Self> {
        Self::bulk_tool_router()
    }

    async fn run_bulk(
        &self,
        issue_ids: &[String],
        mutation: Mutation,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_writable()?;
        let result = service::apply_bulk(self.backend(), issue_ids, mutation).await;
        json_result(&result)
    }
}

#[tool_router(router = bulk_tool_router)]
impl<B: IssueBackend + 'static> McpServer<B> {
    #[tool(description = "Set the status of many issues. Returns total, success, failed and failed_issues.")]
    pub async fn bulk_update_status(
        &self,
        params: Parameters<BulkStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_bulk(&params.0.issue_ids, Mutation::Status(params.0.status_id))
            .await
    }

    #[tool(description = "Set the assignee of many issues. Returns total, success, failed and failed_issues.")]
    pub async fn bulk_update_assignee(
        &self,
        params: Parameters<BulkAssigneeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_bulk(&params.0.issue_ids, Mutation::Assignee(params.0.assignee_id))
            .await
    }

    #[tool(description = "Set the priority of many issues. Returns total, success, failed and failed_issues.")]
    pub async fn bulk_update_priority(
        &self,
        params: Parameters<BulkPriorityParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_bulk(&params.0.issue_ids, Mutation::Priority(params.0.priority_id))
            .await
    }

    #[tool(description = "Set the milestone of many issues. Returns total, success, failed and failed_issues.")]
    pub async fn bulk_update_milestone(
        &self,
        params: Parameters<BulkMilestoneParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_bulk(&params.0.issue_ids, Mutation::Milestone(params.0.milestone_id))
            .await
    }

    #[tool(description = "Set the category of many issues. Returns total, success, failed and failed_issues.")]
    pub async fn bulk_update_category(
        &self,
        params: Parameters<BulkCategoryParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_bulk(&params.0.issue_ids, Mutation::Category(params.0.category_id))
            .await
    }

    #[tool(description = "Delete many issues. Returns total, success, failed and failed_issues.")]
    pub async fn bulk_delete_issues(
        &self,
        params: Parameters<BulkDeleteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_bulk(&params.0.issue_ids, Mutation::Delete).await
    }
}

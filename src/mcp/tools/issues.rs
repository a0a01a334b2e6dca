//! Issue tool implementations
//!
//! Create and update accept display names in place of IDs. Names that do not
//! match anything in the issue's project are ignored.

use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::CallToolResult,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::backend::{IssueBackend, IssueQuery};
use crate::mcp::McpServer;
use crate::mcp::tools::{json_result, map_backend_error};
use crate::service::{self, CreateIssueInput, UpdateIssueInput, clamp_count};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetIssuesParams {
    #[schemars(description = "Filter by project ID")]
    pub project_id: Option<i64>,
    #[schemars(description = "Filter by status IDs")]
    pub status_id: Option<Vec<i64>>,
    #[schemars(description = "Filter by assignee user ID")]
    pub assignee_id: Option<i64>,
    #[schemars(description = "Keyword search over summary and description")]
    pub keyword: Option<String>,
    #[schemars(description = "Number of issues to return (1-100, default 20)")]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IssueKeyParams {
    #[schemars(description = "Issue ID or key (e.g. TEST-1)")]
    pub issue_id_or_key: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueParams {
    #[schemars(description = "Project ID")]
    pub project_id: Option<i64>,
    #[schemars(description = "Project key, used when project_id is not given")]
    pub project_key: Option<String>,
    #[schemars(description = "Issue summary (title)")]
    pub summary: String,
    pub description: Option<String>,
    pub issue_type_id: Option<i64>,
    #[schemars(description = "Issue type name, used when issue_type_id is not given")]
    pub issue_type_name: Option<String>,
    pub priority_id: Option<i64>,
    #[schemars(description = "Priority name, used when priority_id is not given. Defaults to normal (3)")]
    pub priority_name: Option<String>,
    pub assignee_id: Option<i64>,
    #[schemars(description = "Assignee display name, used when assignee_id is not given")]
    pub assignee_name: Option<String>,
    pub category_id: Option<Vec<i64>>,
    pub category_name: Option<Vec<String>>,
    pub milestone_id: Option<Vec<i64>>,
    pub milestone_name: Option<Vec<String>>,
    pub version_id: Option<Vec<i64>>,
    pub version_name: Option<Vec<String>>,
    #[schemars(description = "Start date (yyyy-MM-dd)")]
    pub start_date: Option<String>,
    #[schemars(description = "Due date (yyyy-MM-dd)")]
    pub due_date: Option<String>,
}

impl From<CreateIssueParams> for CreateIssueInput {
    fn from(p: CreateIssueParams) -> Self {
        Self {
            project_id: p.project_id,
            project_key: p.project_key,
            summary: p.summary,
            description: p.description,
            issue_type_id: p.issue_type_id,
            issue_type_name: p.issue_type_name,
            priority_id: p.priority_id,
            priority_name: p.priority_name,
            assignee_id: p.assignee_id,
            assignee_name: p.assignee_name,
            category_id: p.category_id,
            category_name: p.category_name,
            milestone_id: p.milestone_id,
            milestone_name: p.milestone_name,
            version_id: p.version_id,
            version_name: p.version_name,
            start_date: p.start_date,
            due_date: p.due_date,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIssueParams {
    #[schemars(description = "Issue ID or key (e.g. TEST-1)")]
    pub issue_id_or_key: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<i64>,
    #[schemars(description = "Status name, used when status_id is not given")]
    pub status_name: Option<String>,
    pub priority_id: Option<i64>,
    pub priority_name: Option<String>,
    pub assignee_id: Option<i64>,
    pub assignee_name: Option<String>,
    pub category_id: Option<Vec<i64>>,
    pub category_name: Option<Vec<String>>,
    pub milestone_id: Option<Vec<i64>>,
    pub milestone_name: Option<Vec<String>>,
    pub version_id: Option<Vec<i64>>,
    pub version_name: Option<Vec<String>>,
    #[schemars(description = "Start date (yyyy-MM-dd)")]
    pub start_date: Option<String>,
    #[schemars(description = "Due date (yyyy-MM-dd)")]
    pub due_date: Option<String>,
}

impl UpdateIssueParams {
    fn into_parts(self) -> (String, UpdateIssueInput) {
        let input = UpdateIssueInput {
            summary: self.summary,
            description: self.description,
            status_id: self.status_id,
            status_name: self.status_name,
            priority_id: self.priority_id,
            priority_name: self.priority_name,
            assignee_id: self.assignee_id,
            assignee_name: self.assignee_name,
            category_id: self.category_id,
            category_name: self.category_name,
            milestone_id: self.milestone_id,
            milestone_name: self.milestone_name,
            version_id: self.version_id,
            version_name: self.version_name,
            start_date: self.start_date,
            due_date: self.due_date,
        };
        (self.issue_id_or_key, input)
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddCommentParams {
    #[schemars(description = "Issue ID or key (e.g. TEST-1)")]
    pub issue_id_or_key: String,
    #[schemars(description = "Comment body")]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetCommentsParams {
    #[schemars(description = "Issue ID or key (e.g. TEST-1)")]
    pub issue_id_or_key: String,
    #[schemars(description = "Number of comments to return (1-100, default 20)")]
    pub count: Option<usize>,
}

impl<B: IssueBackend + 'static> McpServer<B> {
    pub(crate) fn issue_tools() -> ToolRouter<Self> {
        Self::issue_tool_router()
    }
}

#[tool_router(router = issue_tool_router)]
impl<B: IssueBackend + 'static> McpServer<B> {
    #[tool(description = "List issues, optionally filtered by project, statuses, assignee or keyword. Default count: 20, max: 100.")]
    pub async fn get_issues(
        &self,
        params: Parameters<GetIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = IssueQuery {
            project_id: params.0.project_id,
            status_ids: params.0.status_id.unwrap_or_default(),
            assignee_id: params.0.assignee_id,
            keyword: params.0.keyword,
            count: clamp_count(params.0.count),
        };

        let issues = service::list_issues(self.backend(), query)
            .await
            .map_err(map_backend_error)?;
        json_result(&issues)
    }

    #[tool(description = "Get an issue by ID or key")]
    pub async fn get_issue(
        &self,
        params: Parameters<IssueKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let issue = service::get_issue(self.backend(), &params.0.issue_id_or_key)
            .await
            .map_err(map_backend_error)?;
        json_result(&issue)
    }

    #[tool(description = "Create an issue. Give project_id or project_key. Names (issue type, priority, assignee, categories, milestones, versions) are resolved to IDs; unknown names are ignored.")]
    pub async fn create_issue(
        &self,
        params: Parameters<CreateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_writable()?;

        let issue = service::create_issue(self.backend(), params.0.into())
            .await
            .map_err(map_backend_error)?;
        json_result(&issue)
    }

    #[tool(description = "Update an issue. Only the given fields change. Names are resolved within the issue's project; unknown names are ignored.")]
    pub async fn update_issue(
        &self,
        params: Parameters<UpdateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_writable()?;

        let (id_or_key, input) = params.0.into_parts();
        let issue = service::update_issue(self.backend(), &id_or_key, input)
            .await
            .map_err(map_backend_error)?;
        json_result(&issue)
    }

    #[tool(description = "Delete an issue by ID or key")]
    pub async fn delete_issue(
        &self,
        params: Parameters<IssueKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_writable()?;

        service::delete_issue(self.backend(), &params.0.issue_id_or_key)
            .await
            .map_err(map_backend_error)?;
        json_result(&json!({
            "deleted": true,
            "issue_id_or_key": params.0.issue_id_or_key,
        }))
    }

    #[tool(description = "Add a comment to an issue")]
    pub async fn add_comment(
        &self,
        params: Parameters<AddCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_writable()?;

        let comment =
            service::add_comment(self.backend(), &params.0.issue_id_or_key, &params.0.content)
                .await
                .map_err(map_backend_error)?;
        json_result(&comment)
    }

    #[tool(description = "List comments on an issue. Default count: 20, max: 100.")]
    pub async fn get_issue_comments(
        &self,
        params: Parameters<GetCommentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let comments =
            service::list_comments(self.backend(), &params.0.issue_id_or_key, params.0.count)
                .await
                .map_err(map_backend_error)?;
        json_result(&comments)
    }
}

//! API route configuration.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::read_only::reject_writes;
use super::state::AppState;
use super::v1::{
    self, BulkAssigneeRequest, BulkCategoryRequest, BulkDeleteRequest, BulkMilestoneRequest,
    BulkPriorityRequest, BulkStatusRequest, CommentRequest, CreateIssueRequest, ErrorResponse,
    HealthResponse, RootResponse, UpdateIssueRequest,
};
use crate::backend::{Comment, Issue, IssueBackend, NamedEntity, Project, User};
use crate::service::BulkResult;

/// Build routes with generic backend type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the IssueBackend trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($B:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$B>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BacklogMCP API",
        version = "0.1.0",
        description = "REST and MCP façade over the Backlog issue tracker",
        license(name = "MIT")
    ),
    paths(
        v1::root,
        v1::health,
        v1::list_projects,
        v1::get_project,
        v1::list_project_statuses,
        v1::list_project_issue_types,
        v1::list_project_categories,
        v1::list_project_milestones,
        v1::list_project_versions,
        v1::list_users,
        v1::list_priorities,
        v1::list_issues,
        v1::get_issue,
        v1::create_issue,
        v1::update_issue,
        v1::delete_issue,
        v1::list_issue_comments,
        v1::add_issue_comment,
        v1::bulk_update_status,
        v1::bulk_update_assignee,
        v1::bulk_update_priority,
        v1::bulk_update_milestone,
        v1::bulk_update_category,
        v1::bulk_delete_issues,
    ),
    components(
        schemas(
            HealthResponse,
            RootResponse,
            Project,
            User,
            Issue,
            Comment,
            NamedEntity,
            CreateIssueRequest,
            UpdateIssueRequest,
            CommentRequest,
            BulkStatusRequest,
            BulkAssigneeRequest,
            BulkPriorityRequest,
            BulkMilestoneRequest,
            BulkCategoryRequest,
            BulkDeleteRequest,
            BulkResult,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "projects", description = "Projects and their lookups"),
        (name = "lookups", description = "Space-wide users and priorities"),
        (name = "issues", description = "Issue and comment endpoints"),
        (name = "bulk", description = "Bulk issue operations")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation.
///
/// Write methods under `/api/v1` are rejected with 403 when the state is
/// read-only. The MCP service is mounted separately by the caller.
pub fn create_router<B: IssueBackend + 'static>(state: AppState<B>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(v1::root))
        .route("/health", get(v1::health));

    let project_routes = routes!(B => {
        get "/projects" => v1::list_projects,
        get "/projects/{key}" => v1::get_project,
        get "/projects/{key}/statuses" => v1::list_project_statuses,
        get "/projects/{key}/issue-types" => v1::list_project_issue_types,
        get "/projects/{key}/categories" => v1::list_project_categories,
        get "/projects/{key}/milestones" => v1::list_project_milestones,
        get "/projects/{key}/versions" => v1::list_project_versions,
        get "/users" => v1::list_users,
        get "/priorities" => v1::list_priorities,
    });

    // Method routers for one path are merged by `route`
    let issue_routes = routes!(B => {
        get "/issues" => v1::list_issues,
        post "/issues" => v1::create_issue,
        get "/issues/{id_or_key}" => v1::get_issue,
        patch "/issues/{id_or_key}" => v1::update_issue,
        delete "/issues/{id_or_key}" => v1::delete_issue,
        get "/issues/{id_or_key}/comments" => v1::list_issue_comments,
        post "/issues/{id_or_key}/comments" => v1::add_issue_comment,
    });

    let bulk_routes = routes!(B => {
        post "/bulk/status" => v1::bulk_update_status,
        post "/bulk/assignee" => v1::bulk_update_assignee,
        post "/bulk/priority" => v1::bulk_update_priority,
        post "/bulk/milestone" => v1::bulk_update_milestone,
        post "/bulk/category" => v1::bulk_update_category,
        post "/bulk/delete" => v1::bulk_delete_issues,
    });

    let api_routes = project_routes
        .merge(issue_routes)
        .merge(bulk_routes)
        .layer(from_fn_with_state(state.read_only(), reject_writes));

    system_routes
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}

//! Integration tests for Project API endpoints.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::test_support::{get, json_body, test_app};
use crate::backend::testing::{ScriptedBackend, project};
use crate::backend::{EntityKind, NamedEntity};

// =============================================================================
// GET /api/v1/projects
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_projects_returns_all() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .with_project(project(1, "TEST"))
            .with_project(project(2, "DEMO")),
    );
    let app = test_app(&backend, false);

    let response = app.oneshot(get("/api/v1/projects")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let keys: Vec<&str> = body
        .as_array()
        .expect("Expected array")
        .iter()
        .map(|p| p["projectKey"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["TEST", "DEMO"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_project_found_and_missing() {
    let backend = Arc::new(ScriptedBackend::new().with_project(project(1, "TEST")));
    let app = test_app(&backend, true);

    let response = app.clone().oneshot(get("/api/v1/projects/TEST")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Project TEST");

    let response = app.oneshot(get("/api/v1/projects/NOPE")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Project lookups
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn project_lookups_are_scoped_by_key() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .with_candidates(
                EntityKind::Status,
                Some("TEST"),
                vec![NamedEntity::new(1, "Open"), NamedEntity::new(2, "In Progress")],
            )
            .with_candidates(
                EntityKind::Milestone,
                Some("TEST"),
                vec![NamedEntity::new(5, "v1.0")],
            ),
    );
    let app = test_app(&backend, false);

    let response = app
        .clone()
        .oneshot(get("/api/v1/projects/TEST/statuses"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{"id": 1, "name": "Open"}, {"id": 2, "name": "In Progress"}])
    );

    let response = app
        .clone()
        .oneshot(get("/api/v1/projects/TEST/milestones"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!([{"id": 5, "name": "v1.0"}]));

    // Nothing scripted for another project
    let response = app
        .oneshot(get("/api/v1/projects/DEMO/categories"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn project_lookup_for_unknown_project_is_not_found() {
    let backend =
        Arc::new(ScriptedBackend::new().with_listing_status(EntityKind::IssueType, 404));
    let app = test_app(&backend, false);

    let response = app
        .oneshot(get("/api/v1/projects/NOPE/issue-types"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(
        json_body(response).await["error"]
            .as_str()
            .unwrap()
            .contains("NOPE")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn project_lookup_upstream_failure_is_internal_error() {
    let backend = Arc::new(ScriptedBackend::new().with_failing_listing(EntityKind::Version));
    let app = test_app(&backend, false);

    let response = app
        .oneshot(get("/api/v1/projects/TEST/versions"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

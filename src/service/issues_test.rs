//! Tests for single-issue operations.

use crate::backend::testing::{Call, Outcome, ScriptedBackend, issue, project, user};
use crate::backend::{
    BackendError, EntityKind, FieldValue, IssueField, IssueFields, IssueQuery, NamedEntity,
};
use crate::service::{
    CreateIssueInput, DEFAULT_PRIORITY_ID, UpdateIssueInput, add_comment, clamp_count,
    create_issue, delete_issue, get_issue, list_comments, list_issues, update_issue,
};

fn priorities() -> Vec<NamedEntity> {
    vec![
        NamedEntity::new(2, "高"),
        NamedEntity::new(3, "中"),
        NamedEntity::new(4, "低"),
    ]
}

fn created_fields(backend: &ScriptedBackend) -> IssueFields {
    backend
        .mutation_calls()
        .into_iter()
        .find_map(|call| match call {
            Call::CreateIssue(fields) => Some(fields),
            _ => None,
        })
        .expect("create_issue was not called")
}

fn updated_fields(backend: &ScriptedBackend) -> IssueFields {
    backend
        .mutation_calls()
        .into_iter()
        .find_map(|call| match call {
            Call::UpdateIssue(_, fields) => Some(fields),
            _ => None,
        })
        .expect("update_issue was not called")
}

#[test]
fn clamp_count_defaults_and_bounds() {
    assert_eq!(clamp_count(None), 20);
    assert_eq!(clamp_count(Some(0)), 1);
    assert_eq!(clamp_count(Some(50)), 50);
    assert_eq!(clamp_count(Some(500)), 100);
}

#[tokio::test]
async fn create_resolves_priority_and_drops_unknown_assignee() {
    let backend = ScriptedBackend::new()
        .with_candidates(EntityKind::Priority, None, priorities())
        .with_candidates(EntityKind::Assignee, None, vec![NamedEntity::new(7, "Taro")]);

    let input = CreateIssueInput {
        project_id: Some(1),
        summary: "Login fails".to_string(),
        issue_type_id: Some(10),
        priority_name: Some("中".to_string()),
        assignee_name: Some("Nobody".to_string()),
        ..Default::default()
    };
    let created = create_issue(&backend, input).await.unwrap();

    assert_eq!(created.summary, "Login fails");
    let fields = created_fields(&backend);
    assert_eq!(fields.get(IssueField::PriorityId), Some(&FieldValue::Id(3)));
    assert!(!fields.contains(IssueField::AssigneeId));
    assert_eq!(fields.get(IssueField::ProjectId), Some(&FieldValue::Id(1)));
}

#[tokio::test]
async fn create_defaults_priority_when_absent_or_unresolved() {
    let backend = ScriptedBackend::new().with_candidates(EntityKind::Priority, None, priorities());

    let input = CreateIssueInput {
        project_id: Some(1),
        summary: "Defaults".to_string(),
        priority_name: Some("Urgent".to_string()),
        ..Default::default()
    };
    create_issue(&backend, input).await.unwrap();

    let fields = created_fields(&backend);
    assert_eq!(
        fields.get(IssueField::PriorityId),
        Some(&FieldValue::Id(DEFAULT_PRIORITY_ID))
    );
}

#[tokio::test]
async fn create_explicit_id_wins_over_name() {
    let backend = ScriptedBackend::new().with_candidates(EntityKind::Priority, None, priorities());

    let input = CreateIssueInput {
        project_id: Some(1),
        summary: "Explicit".to_string(),
        priority_id: Some(2),
        priority_name: Some("低".to_string()),
        ..Default::default()
    };
    create_issue(&backend, input).await.unwrap();

    assert_eq!(
        created_fields(&backend).get(IssueField::PriorityId),
        Some(&FieldValue::Id(2))
    );
    assert!(
        !backend
            .calls()
            .contains(&Call::ListCandidates(EntityKind::Priority, Some("1".into())))
    );
}

#[tokio::test]
async fn create_resolves_project_key_and_scoped_names() {
    let backend = ScriptedBackend::new()
        .with_project(project(42, "TEST"))
        .with_candidates(
            EntityKind::IssueType,
            Some("42"),
            vec![NamedEntity::new(100, "Bug"), NamedEntity::new(101, "Task")],
        )
        .with_candidates(
            EntityKind::Category,
            Some("42"),
            vec![NamedEntity::new(7, "Backend"), NamedEntity::new(8, "Frontend")],
        );

    let input = CreateIssueInput {
        project_key: Some("TEST".to_string()),
        summary: "Scoped".to_string(),
        issue_type_name: Some("Task".to_string()),
        category_name: Some(vec!["Frontend".to_string(), "Docs".to_string()]),
        ..Default::default()
    };
    let created = create_issue(&backend, input).await.unwrap();

    assert_eq!(created.project_id, 42);
    let fields = created_fields(&backend);
    assert_eq!(fields.get(IssueField::IssueTypeId), Some(&FieldValue::Id(101)));
    assert_eq!(
        fields.get(IssueField::CategoryId),
        Some(&FieldValue::Ids(vec![8]))
    );
}

#[tokio::test]
async fn create_without_project_is_rejected_before_any_call() {
    let backend = ScriptedBackend::new();

    let input = CreateIssueInput {
        summary: "Orphan".to_string(),
        ..Default::default()
    };
    let result = create_issue(&backend, input).await;

    assert!(matches!(result, Err(BackendError::Validation { .. })));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn create_with_unknown_project_key_is_not_found() {
    let backend = ScriptedBackend::new();

    let input = CreateIssueInput {
        project_key: Some("NOPE".to_string()),
        summary: "Lost".to_string(),
        ..Default::default()
    };
    let result = create_issue(&backend, input).await;

    assert!(matches!(result, Err(BackendError::NotFound { .. })));
    assert!(backend.mutation_calls().is_empty());
}

#[tokio::test]
async fn create_rejects_malformed_dates() {
    let backend = ScriptedBackend::new();

    let input = CreateIssueInput {
        project_id: Some(1),
        summary: "Dated".to_string(),
        due_date: Some("31/01/2025".to_string()),
        ..Default::default()
    };
    let result = create_issue(&backend, input).await;

    assert!(matches!(result, Err(BackendError::Validation { .. })));
    assert!(backend.mutation_calls().is_empty());
}

#[tokio::test]
async fn create_propagates_backend_failure() {
    let backend = ScriptedBackend::new().with_failing_create();

    let input = CreateIssueInput {
        project_id: Some(1),
        summary: "Doomed".to_string(),
        ..Default::default()
    };
    let result = create_issue(&backend, input).await;

    assert!(matches!(result, Err(BackendError::Http { status: 500, .. })));
}

#[tokio::test]
async fn update_resolves_names_in_the_issue_project() {
    let backend = ScriptedBackend::new()
        .with_issue(issue(10, "TEST-1", 42))
        .with_candidates(
            EntityKind::Status,
            Some("42"),
            vec![NamedEntity::new(1, "Open"), NamedEntity::new(2, "In Progress")],
        )
        .with_candidates(
            EntityKind::Milestone,
            Some("42"),
            vec![NamedEntity::new(5, "Sprint 1")],
        );

    let input = UpdateIssueInput {
        status_name: Some("In Progress".to_string()),
        milestone_name: Some(vec!["Sprint 1".to_string()]),
        due_date: Some("2025-01-31".to_string()),
        ..Default::default()
    };
    update_issue(&backend, "TEST-1", input).await.unwrap();

    let fields = updated_fields(&backend);
    assert_eq!(fields.len(), 3);
    assert_eq!(fields.get(IssueField::StatusId), Some(&FieldValue::Id(2)));
    assert_eq!(
        fields.get(IssueField::MilestoneId),
        Some(&FieldValue::Ids(vec![5]))
    );
    assert_eq!(
        fields.get(IssueField::DueDate),
        Some(&FieldValue::Text("2025-01-31".to_string()))
    );
}

#[tokio::test]
async fn update_drops_unresolved_names() {
    let backend = ScriptedBackend::new()
        .with_issue(issue(10, "TEST-1", 42))
        .with_user(user(7, "Taro"));

    let input = UpdateIssueInput {
        summary: Some("Renamed".to_string()),
        status_name: Some("Nonexistent".to_string()),
        ..Default::default()
    };
    let updated = update_issue(&backend, "TEST-1", input).await.unwrap();

    assert_eq!(updated.summary, "Renamed");
    assert_eq!(
        updated_fields(&backend),
        IssueFields::new().text(IssueField::Summary, "Renamed")
    );
}

#[tokio::test]
async fn update_of_missing_issue_is_not_found() {
    let backend = ScriptedBackend::new();

    let result = update_issue(&backend, "TEST-404", UpdateIssueInput::default()).await;

    assert!(matches!(result, Err(BackendError::NotFound { .. })));
    assert!(backend.mutation_calls().is_empty());
}

#[tokio::test]
async fn get_missing_issue_is_not_found() {
    let backend = ScriptedBackend::new().with_issue(issue(10, "TEST-1", 1));

    assert_eq!(get_issue(&backend, "TEST-1").await.unwrap().id, 10);
    assert!(matches!(
        get_issue(&backend, "TEST-2").await,
        Err(BackendError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_refusal_is_an_error_for_single_issue() {
    let backend = ScriptedBackend::new()
        .with_outcome("TEST-1", Outcome::Succeed)
        .with_outcome("TEST-2", Outcome::Refuse);

    assert!(delete_issue(&backend, "TEST-1").await.is_ok());
    assert!(matches!(
        delete_issue(&backend, "TEST-2").await,
        Err(BackendError::NotFound { .. })
    ));
}

#[tokio::test]
async fn list_issues_clamps_count() {
    let backend = ScriptedBackend::new();

    let query = IssueQuery {
        project_id: Some(1),
        count: 1000,
        ..Default::default()
    };
    list_issues(&backend, query).await.unwrap();

    match backend.calls().as_slice() {
        [Call::ListIssues(sent)] => {
            assert_eq!(sent.count, 100);
            assert_eq!(sent.project_id, Some(1));
        }
        other => panic!("unexpected calls: {:?}", other),
    }
}

#[tokio::test]
async fn comments_use_clamped_count_and_reject_blank_content() {
    let backend = ScriptedBackend::new();

    list_comments(&backend, "TEST-1", None).await.unwrap();
    assert_eq!(
        backend.calls(),
        vec![Call::ListComments("TEST-1".into(), 20)]
    );

    let result = add_comment(&backend, "TEST-1", "   ").await;
    assert!(matches!(result, Err(BackendError::Validation { .. })));
    assert!(backend.mutation_calls().is_empty());

    let comment = add_comment(&backend, "TEST-1", "Looks good").await.unwrap();
    assert_eq!(comment.content.as_deref(), Some("Looks good"));
}

//! Tests for MCP server initialization

use std::sync::Arc;

use rmcp::ServerHandler;

use super::server::McpServer;
use crate::backend::testing::ScriptedBackend;

#[test]
fn test_server_info() {
    let server = McpServer::new(Arc::new(ScriptedBackend::new()), false);

    let info = server.get_info();

    assert!(
        info.capabilities.tools.is_some(),
        "Server should support tools"
    );
    assert!(
        info.instructions.is_some(),
        "Server should provide instructions"
    );
}

#[test]
fn test_all_tools_registered() {
    let server = McpServer::new(Arc::new(ScriptedBackend::new()), false);

    let mut names = server.tool_names();
    names.sort();

    let mut expected = vec![
        "get_projects",
        "get_project",
        "get_project_statuses",
        "get_issue_types",
        "get_issues",
        "get_issue",
        "create_issue",
        "update_issue",
        "delete_issue",
        "add_comment",
        "get_issue_comments",
        "get_users",
        "get_priorities",
        "bulk_update_status",
        "bulk_update_assignee",
        "bulk_update_priority",
        "bulk_update_milestone",
        "bulk_update_category",
        "bulk_delete_issues",
    ];
    expected.sort();

    assert_eq!(names, expected);
}

#[test]
fn test_clone_shares_backend() {
    let backend = Arc::new(ScriptedBackend::new());
    let server = McpServer::new(Arc::clone(&backend), true);

    let cloned = server.clone();

    assert!(std::ptr::eq(server.backend(), cloned.backend()));
    assert!(cloned.ensure_writable().is_err());
}

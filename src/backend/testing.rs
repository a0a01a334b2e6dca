//! Scripted in-memory backend used by tests.
//!
//! Every call is recorded so tests can assert on exactly what reached the
//! tracker. Per-issue outcomes script update/delete/comment behaviour.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::backend::{
    BackendError, BackendResult, Comment, EntityKind, FieldValue, Issue, IssueBackend, IssueField,
    IssueFields, IssueQuery, NamedEntity, Project, User,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCandidates(EntityKind, Option<String>),
    ListProjects,
    GetProject(String),
    ListUsers,
    ListIssues(IssueQuery),
    GetIssue(String),
    CreateIssue(IssueFields),
    UpdateIssue(String, IssueFields),
    DeleteIssue(String),
    AddComment(String, String),
    ListComments(String, usize),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateIssue(_) | Call::UpdateIssue(..) | Call::DeleteIssue(_) | Call::AddComment(..)
        )
    }
}

/// Scripted result of a mutating call against one issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    /// Delete reports `false` without an error.
    Refuse,
    Fail,
}

#[derive(Default)]
struct State {
    candidates: HashMap<(EntityKind, Option<String>), Vec<NamedEntity>>,
    failing_listings: HashSet<EntityKind>,
    listing_statuses: HashMap<EntityKind, u16>,
    projects: Vec<Project>,
    users: Vec<User>,
    issues: Vec<Issue>,
    comments: HashMap<String, Vec<Comment>>,
    outcomes: HashMap<String, Outcome>,
    fail_create: bool,
    next_id: i64,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct ScriptedBackend {
    state: Mutex<State>,
}

pub fn issue(id: i64, key: &str, project_id: i64) -> Issue {
    Issue {
        id,
        project_id,
        issue_key: key.to_string(),
        summary: format!("Issue {}", key),
        description: None,
        issue_type: None,
        status: None,
        priority: None,
        assignee: None,
        category: vec![],
        versions: vec![],
        milestone: vec![],
        start_date: None,
        due_date: None,
        created: None,
        updated: None,
    }
}

pub fn project(id: i64, key: &str) -> Project {
    Project {
        id,
        project_key: key.to_string(),
        name: format!("Project {}", key),
        archived: false,
    }
}

pub fn user(id: i64, name: &str) -> User {
    User {
        id,
        user_id: Some(name.to_lowercase()),
        name: name.to_string(),
        mail_address: None,
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(self, kind: EntityKind, scope: Option<&str>, items: Vec<NamedEntity>) -> Self {
        let scope = scope.filter(|_| kind.is_scoped()).map(str::to_string);
        self.state.lock().unwrap().candidates.insert((kind, scope), items);
        self
    }

    pub fn with_failing_listing(self, kind: EntityKind) -> Self {
        self.state.lock().unwrap().failing_listings.insert(kind);
        self
    }

    /// Make listings of `kind` fail with an HTTP error carrying `status`.
    pub fn with_listing_status(self, kind: EntityKind, status: u16) -> Self {
        self.state.lock().unwrap().listing_statuses.insert(kind, status);
        self
    }

    pub fn with_project(self, project: Project) -> Self {
        self.state.lock().unwrap().projects.push(project);
        self
    }

    pub fn with_user(self, user: User) -> Self {
        self.state.lock().unwrap().users.push(user);
        self
    }

    pub fn with_issue(self, issue: Issue) -> Self {
        self.state.lock().unwrap().issues.push(issue);
        self
    }

    pub fn with_comment(self, id_or_key: &str, comment: Comment) -> Self {
        self.state
            .lock()
            .unwrap()
            .comments
            .entry(id_or_key.to_string())
            .or_default()
            .push(comment);
        self
    }

    pub fn with_outcome(self, id_or_key: &str, outcome: Outcome) -> Self {
        self.state
            .lock()
            .unwrap()
            .outcomes
            .insert(id_or_key.to_string(), outcome);
        self
    }

    pub fn with_failing_create(self) -> Self {
        self.state.lock().unwrap().fail_create = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn outcome(&self, id_or_key: &str) -> Outcome {
        self.state
            .lock()
            .unwrap()
            .outcomes
            .get(id_or_key)
            .copied()
            .unwrap_or(Outcome::Succeed)
    }

    fn find_issue(&self, id_or_key: &str) -> Option<Issue> {
        self.state
            .lock()
            .unwrap()
            .issues
            .iter()
            .find(|i| i.issue_key == id_or_key || i.id.to_string() == id_or_key)
            .cloned()
    }

    fn scripted_failure(id_or_key: &str) -> BackendError {
        BackendError::Http {
            status: 500,
            message: format!("scripted failure for {}", id_or_key),
        }
    }
}

fn text_field(fields: &IssueFields, field: IssueField) -> Option<String> {
    match fields.get(field) {
        Some(FieldValue::Text(text)) => Some(text.clone()),
        _ => None,
    }
}

impl IssueBackend for ScriptedBackend {
    async fn list_candidates(
        &self,
        kind: EntityKind,
        scope: Option<&str>,
    ) -> BackendResult<Vec<NamedEntity>> {
        self.record(Call::ListCandidates(kind, scope.map(str::to_string)));
        let state = self.state.lock().unwrap();
        if state.failing_listings.contains(&kind) {
            return Err(BackendError::Transport {
                message: format!("scripted listing failure for {}", kind),
            });
        }
        if let Some(status) = state.listing_statuses.get(&kind) {
            return Err(BackendError::Http {
                status: *status,
                message: format!("scripted {} listing", kind),
            });
        }
        let scope = scope.filter(|_| kind.is_scoped()).map(str::to_string);
        Ok(state
            .candidates
            .get(&(kind, scope))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_projects(&self) -> BackendResult<Vec<Project>> {
        self.record(Call::ListProjects);
        Ok(self.state.lock().unwrap().projects.clone())
    }

    async fn get_project(&self, id_or_key: &str) -> BackendResult<Option<Project>> {
        self.record(Call::GetProject(id_or_key.to_string()));
        Ok(self
            .state
            .lock()
            .unwrap()
            .projects
            .iter()
            .find(|p| p.project_key == id_or_key || p.id.to_string() == id_or_key)
            .cloned())
    }

    async fn list_users(&self) -> BackendResult<Vec<User>> {
        self.record(Call::ListUsers);
        Ok(self.state.lock().unwrap().users.clone())
    }

    async fn list_issues(&self, query: &IssueQuery) -> BackendResult<Vec<Issue>> {
        self.record(Call::ListIssues(query.clone()));
        let state = self.state.lock().unwrap();
        Ok(state
            .issues
            .iter()
            .filter(|i| query.project_id.is_none_or(|p| i.project_id == p))
            .take(query.count)
            .cloned()
            .collect())
    }

    async fn get_issue(&self, id_or_key: &str) -> BackendResult<Option<Issue>> {
        self.record(Call::GetIssue(id_or_key.to_string()));
        Ok(self.find_issue(id_or_key))
    }

    async fn create_issue(&self, fields: &IssueFields) -> BackendResult<Issue> {
        self.record(Call::CreateIssue(fields.clone()));
        let mut state = self.state.lock().unwrap();
        if state.fail_create {
            return Err(Self::scripted_failure("create"));
        }

        state.next_id += 1;
        let id = 1000 + state.next_id;
        let project_id = match fields.get(IssueField::ProjectId) {
            Some(FieldValue::Id(id)) => *id,
            _ => 0,
        };
        let mut created = issue(id, &format!("NEW-{}", state.next_id), project_id);
        if let Some(summary) = text_field(fields, IssueField::Summary) {
            created.summary = summary;
        }
        created.description = text_field(fields, IssueField::Description);
        state.issues.push(created.clone());
        Ok(created)
    }

    async fn update_issue(&self, id_or_key: &str, fields: &IssueFields) -> BackendResult<Issue> {
        self.record(Call::UpdateIssue(id_or_key.to_string(), fields.clone()));
        match self.outcome(id_or_key) {
            Outcome::Fail => Err(Self::scripted_failure(id_or_key)),
            Outcome::Succeed | Outcome::Refuse => {
                let mut updated = self
                    .find_issue(id_or_key)
                    .unwrap_or_else(|| issue(1, id_or_key, 1));
                if let Some(summary) = text_field(fields, IssueField::Summary) {
                    updated.summary = summary;
                }
                Ok(updated)
            }
        }
    }

    async fn delete_issue(&self, id_or_key: &str) -> BackendResult<bool> {
        self.record(Call::DeleteIssue(id_or_key.to_string()));
        match self.outcome(id_or_key) {
            Outcome::Succeed => Ok(true),
            Outcome::Refuse => Ok(false),
            Outcome::Fail => Err(Self::scripted_failure(id_or_key)),
        }
    }

    async fn add_comment(&self, id_or_key: &str, content: &str) -> BackendResult<Comment> {
        self.record(Call::AddComment(id_or_key.to_string(), content.to_string()));
        match self.outcome(id_or_key) {
            Outcome::Fail => Err(Self::scripted_failure(id_or_key)),
            _ => Ok(Comment {
                id: 1,
                content: Some(content.to_string()),
                created_user: None,
                created: None,
            }),
        }
    }

    async fn list_comments(&self, id_or_key: &str, count: usize) -> BackendResult<Vec<Comment>> {
        self.record(Call::ListComments(id_or_key.to_string(), count));
        Ok(self
            .state
            .lock()
            .unwrap()
            .comments
            .get(id_or_key)
            .map(|c| c.iter().take(count).cloned().collect())
            .unwrap_or_default())
    }
}

//! HTTP client for the Backlog API.

use std::time::Duration;

use dashmap::DashMap;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::config::BacklogConfig;
use crate::backend::{
    BackendError, BackendResult, Comment, EntityKind, Issue, IssueBackend, IssueFields,
    IssueQuery, NamedEntity, Project, User,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Backlog API client.
///
/// The space-wide priority and user listings are memoized on first
/// successful read and never invalidated. Callers must not assume they are
/// fresh.
pub struct BacklogClient {
    config: BacklogConfig,
    http: Client,
    lookup_cache: DashMap<EntityKind, Vec<NamedEntity>>,
}

impl BacklogClient {
    pub fn new(config: BacklogConfig) -> BackendResult<Self> {
        super::install_crypto_provider();

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Transport {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            config,
            http,
            lookup_cache: DashMap::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        self.http
            .request(method, &url)
            .query(&[("apiKey", self.config.api_key.as_str())])
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    /// Send a request and decode a successful JSON body.
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> BackendResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Send a request, mapping 404 to `Ok(None)`.
    async fn send_optional<T: DeserializeOwned>(request: RequestBuilder) -> BackendResult<Option<T>> {
        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::handle_response(response).await.map(Some)
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| BackendError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(BackendError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Serve a space-wide listing from the cache, fetching it on a miss.
    async fn cached_listing<F>(&self, kind: EntityKind, fetch: F) -> BackendResult<Vec<NamedEntity>>
    where
        F: Future<Output = BackendResult<Vec<NamedEntity>>>,
    {
        if let Some(hit) = self.lookup_cache.get(&kind) {
            return Ok(hit.value().clone());
        }

        let fresh = fetch.await?;
        debug!(%kind, count = fresh.len(), "caching lookup listing");
        self.lookup_cache.insert(kind, fresh.clone());
        Ok(fresh)
    }
}

impl IssueBackend for BacklogClient {
    #[instrument(skip(self))]
    async fn list_candidates(
        &self,
        kind: EntityKind,
        scope: Option<&str>,
    ) -> BackendResult<Vec<NamedEntity>> {
        let resource = match kind {
            EntityKind::Priority => {
                return self
                    .cached_listing(kind, Self::send(self.get("/priorities")))
                    .await;
            }
            EntityKind::Assignee => {
                return self
                    .cached_listing(kind, async {
                        let users = self.list_users().await?;
                        Ok(users
                            .into_iter()
                            .map(|u| NamedEntity::new(u.id, u.name))
                            .collect())
                    })
                    .await;
            }
            EntityKind::Status => "statuses",
            EntityKind::Category => "categories",
            // Backlog serves milestones and versions from the same listing.
            EntityKind::Milestone | EntityKind::Version => "versions",
            EntityKind::IssueType => "issueTypes",
        };

        let project = scope.ok_or_else(|| {
            BackendError::validation(format!("listing {} requires a project", kind))
        })?;
        Self::send(self.get(&format!("/projects/{}/{}", project, resource))).await
    }

    #[instrument(skip(self))]
    async fn list_projects(&self) -> BackendResult<Vec<Project>> {
        Self::send(self.get("/projects")).await
    }

    #[instrument(skip(self))]
    async fn get_project(&self, id_or_key: &str) -> BackendResult<Option<Project>> {
        Self::send_optional(self.get(&format!("/projects/{}", id_or_key))).await
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> BackendResult<Vec<User>> {
        Self::send(self.get("/users")).await
    }

    #[instrument(skip(self))]
    async fn list_issues(&self, query: &IssueQuery) -> BackendResult<Vec<Issue>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(project_id) = query.project_id {
            params.push(("projectId[]", project_id.to_string()));
        }
        for status_id in &query.status_ids {
            params.push(("statusId[]", status_id.to_string()));
        }
        if let Some(assignee_id) = query.assignee_id {
            params.push(("assigneeId[]", assignee_id.to_string()));
        }
        if let Some(keyword) = &query.keyword {
            params.push(("keyword", keyword.clone()));
        }
        params.push(("count", query.count.to_string()));

        Self::send(self.get("/issues").query(&params)).await
    }

    #[instrument(skip(self))]
    async fn get_issue(&self, id_or_key: &str) -> BackendResult<Option<Issue>> {
        Self::send_optional(self.get(&format!("/issues/{}", id_or_key))).await
    }

    #[instrument(skip(self))]
    async fn create_issue(&self, fields: &IssueFields) -> BackendResult<Issue> {
        let request = self
            .request(reqwest::Method::POST, "/issues")
            .form(&fields.to_form());
        Self::send(request).await
    }

    #[instrument(skip(self))]
    async fn update_issue(&self, id_or_key: &str, fields: &IssueFields) -> BackendResult<Issue> {
        let request = self
            .request(reqwest::Method::PATCH, &format!("/issues/{}", id_or_key))
            .form(&fields.to_form());
        match Self::send_optional(request).await? {
            Some(issue) => Ok(issue),
            None => Err(BackendError::not_found("issue", id_or_key)),
        }
    }

    #[instrument(skip(self))]
    async fn delete_issue(&self, id_or_key: &str) -> BackendResult<bool> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/issues/{}", id_or_key))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(BackendError::Http {
                status: status.as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            })
        }
    }

    #[instrument(skip(self, content))]
    async fn add_comment(&self, id_or_key: &str, content: &str) -> BackendResult<Comment> {
        let request = self
            .request(
                reqwest::Method::POST,
                &format!("/issues/{}/comments", id_or_key),
            )
            .form(&[("content", content)]);
        Self::send(request).await
    }

    #[instrument(skip(self))]
    async fn list_comments(&self, id_or_key: &str, count: usize) -> BackendResult<Vec<Comment>> {
        let request = self
            .get(&format!("/issues/{}/comments", id_or_key))
            .query(&[("count", count.to_string())]);
        Self::send(request).await
    }
}

//! Connection settings for the Backlog API.

/// Default Backlog domain. Spaces hosted in Japan use `backlog.jp`.
pub const DEFAULT_DOMAIN: &str = "backlog.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogConfig {
    /// API key sent as the `apiKey` query parameter.
    pub api_key: String,
    /// Base URL up to and including `/api/v2`, without a trailing slash.
    pub base_url: String,
}

impl BacklogConfig {
    /// Settings for a hosted space, e.g. `myteam` on `backlog.com`.
    pub fn for_space(api_key: impl Into<String>, space: &str, domain: &str) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: format!("https://{}.{}/api/v2", space, domain),
        }
    }

    /// Settings for an explicit base URL (self-hosted instance or test server).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

//! Backlog API v2 implementation of [`IssueBackend`](crate::backend::IssueBackend).

mod client;
mod config;


pub use client::BacklogClient;
pub use config::{BacklogConfig, DEFAULT_DOMAIN};

/// Install the process-wide rustls crypto provider.
///
/// reqwest is built without a bundled provider, so one must be installed
/// before the first client is created. Repeated calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

//! Application state for the API server.

use std::sync::Arc;

use crate::backend::IssueBackend;

/// Shared application state.
///
/// Generic over `B: IssueBackend` so handlers can be exercised against a
/// scripted backend in tests. The backend is shared with the MCP service.
pub struct AppState<B: IssueBackend> {
    backend: Arc<B>,
    read_only: bool,
}

// Manual Clone impl - only the Arc needs to be cloneable, not B
impl<B: IssueBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            read_only: self.read_only,
        }
    }
}

impl<B: IssueBackend> AppState<B> {
    pub fn new(backend: Arc<B>, read_only: bool) -> Self {
        Self {
            backend,
            read_only,
        }
    }

    /// Get a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a cloned Arc to the backend.
    pub fn backend_arc(&self) -> Arc<B> {
        Arc::clone(&self.backend)
    }

    /// Whether write operations are rejected.
    pub fn read_only(&self) -> bool {
        self.read_only
    }
}

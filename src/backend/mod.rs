//! Issue tracker abstraction layer.
//!
//! # Architecture
//!
//! - `error`: Backend error types
//! - `models`: Records returned by the tracker (Project, Issue, Comment, User)
//! - `fields`: Sparse create/update payload builder
//! - `interface`: The `IssueBackend` trait
//! - `backlog`: Backlog API v2 implementation over HTTP

pub mod backlog;
mod error;
mod fields;
mod interface;
mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use backlog::{BacklogClient, BacklogConfig};
pub use error::{BackendError, BackendResult};
pub use fields::{FieldValue, IssueField, IssueFields};
pub use interface::IssueBackend;
pub use models::*;

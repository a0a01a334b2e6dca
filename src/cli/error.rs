use miette::Diagnostic;
use thiserror::Error;

use crate::api::ApiError;
use crate::backend::BackendError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("No Backlog space configured")]
    #[diagnostic(
        code(backlog_mcp::cli::missing_space),
        help("Pass --space (or set BACKLOG_SPACE), or point --base-url at a Backlog API.")
    )]
    MissingSpace,

    #[error("Failed to create Backlog client: {0}")]
    #[diagnostic(code(backlog_mcp::cli::backend))]
    Backend(#[from] BackendError),

    #[error("API server error: {0}")]
    #[diagnostic(code(backlog_mcp::cli::api))]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, CliError>;

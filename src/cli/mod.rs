//! Command-line entry point for the server binary.

pub mod error;


use std::net::IpAddr;

use clap::Parser;

use crate::api::{self, Config, DEFAULT_PORT};
use crate::backend::backlog::DEFAULT_DOMAIN;
use crate::backend::{BacklogClient, BacklogConfig};
use error::{CliError, Result};

#[derive(Parser, Debug)]
#[command(name = "backlog-mcp")]
#[command(author, version, about = "REST and MCP server for the Backlog issue tracker", long_about = None)]
pub struct Cli {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Backlog API key
    #[arg(long, env = "BACKLOG_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Backlog space name, e.g. `myteam` for myteam.backlog.com
    #[arg(long, env = "BACKLOG_SPACE", required_unless_present = "base_url")]
    pub space: Option<String>,

    /// Backlog domain (backlog.com or backlog.jp)
    #[arg(long, env = "BACKLOG_DOMAIN", default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Full API base URL ending in /api/v2; overrides --space and --domain
    #[arg(long, env = "BACKLOG_BASE_URL")]
    pub base_url: Option<String>,

    /// Reject every write operation on the REST and MCP surfaces
    #[arg(long, env = "READ_ONLY_MODE")]
    pub read_only: bool,
}

impl Cli {
    pub fn backlog_config(&self) -> Result<BacklogConfig> {
        match (&self.base_url, &self.space) {
            (Some(base_url), _) => Ok(BacklogConfig::with_base_url(&self.api_key, base_url)),
            (None, Some(space)) => Ok(BacklogConfig::for_space(
                &self.api_key,
                space,
                &self.domain,
            )),
            (None, None) => Err(CliError::MissingSpace),
        }
    }

    pub fn server_config(&self) -> Config {
        Config::default()
            .with_host(self.host)
            .with_port(self.port)
            .with_read_only(self.read_only)
    }
}

/// Parse arguments, build the Backlog client and serve until Ctrl-C.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let client = BacklogClient::new(cli.backlog_config()?)?;
    api::run(cli.server_config(), client).await?;

    Ok(())
}

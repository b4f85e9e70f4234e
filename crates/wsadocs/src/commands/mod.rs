//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod nav;
pub(crate) mod render;
pub(crate) mod routes;
pub(crate) mod serve;

use std::path::PathBuf;

use clap::Args;
use wsadocs_config::{CliSettings, Config};
use wsadocs_server::{create_source, site_options};
use wsadocs_site::Site;

pub(crate) use build::BuildArgs;
pub(crate) use nav::NavArgs;
pub(crate) use render::RenderArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use serve::ServeArgs;

use crate::error::CliError;

/// Configuration and source options shared by every command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover wsadocs.toml).
    #[arg(short, long, env = "WSADOCS_CONFIG")]
    config: Option<PathBuf>,

    /// Document source directory (overrides config).
    #[arg(short, long, conflicts_with = "source_url")]
    source_dir: Option<PathBuf>,

    /// Document source URL (overrides config).
    #[arg(long, env = "WSADOCS_SOURCE_URL")]
    source_url: Option<String>,

    /// Base path the viewer is mounted under (overrides config).
    #[arg(long)]
    base_path: Option<String>,
}

impl ConfigArgs {
    /// Load configuration with these overrides plus server overrides.
    pub(crate) fn load(
        self,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host,
            port,
            source_dir: self.source_dir,
            source_url: self.source_url,
            base_path: self.base_path,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Site over the configured document source.
pub(crate) fn open_site(config: &Config) -> Site {
    Site::new(create_source(&config.source_resolved), site_options(config))
}

//! `wsadocs serve` command implementation.

use clap::Args;
use wsadocs_config::SourceLocation;
use wsadocs_server::{run_server, server_config_from_config};

use crate::commands::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Host to bind to (overrides config).
    #[arg(long, env = "WSADOCS_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "WSADOCS_PORT")]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(self.host, self.port)?;

        output.highlight(&format!(
            "Serving {} on http://{}:{}{}",
            config.site.title, config.server.host, config.server.port, config.site.base_path
        ));
        match &config.source_resolved.location {
            SourceLocation::Dir(dir) => output.info(&format!("Source directory: {}", dir.display())),
            SourceLocation::Url(url) => output.info(&format!("Source URL: {url}")),
        }
        output.info(&format!("Highlight theme: {}", config.render.theme));

        let server_config = server_config_from_config(&config, version.to_owned());
        let runtime = tokio::runtime::Runtime::new()?;
        runtime
            .block_on(run_server(server_config))
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

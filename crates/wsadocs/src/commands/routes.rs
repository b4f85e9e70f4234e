//! `wsadocs routes` command implementation.

use clap::Args;
use wsadocs_nav::route_href;

use crate::commands::{ConfigArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl RoutesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(None, None)?;
        let site = open_site(&config);
        let snapshot = site.snapshot();

        if let Some(error) = snapshot.load_error() {
            output.warning(&format!("Manifest could not be loaded: {error}"));
        }
        for warning in snapshot.warnings() {
            output.warning(warning);
        }

        if self.json {
            output.print(&serde_json::to_string_pretty(snapshot.routes().entries())?)?;
            return Ok(());
        }

        for entry in snapshot.routes().entries() {
            output.print(&format!(
                "{:<40} {} {}",
                route_href(&config.site.base_path, &entry.path),
                entry.title,
                output.dim(&format!("(docs/{}.md)", display_page(&entry.page)))
            ))?;
        }
        output.info(&format!(
            "{} routes; other locations show \"{}\"",
            snapshot.routes().len(),
            config.site.welcome
        ));
        Ok(())
    }
}

/// Page id as shown next to its document.
fn display_page(page: &str) -> &str {
    if page.is_empty() { "index" } else { page }
}

//! `wsadocs render` command implementation.
//!
//! Renders one location and prints the result.

use clap::Args;
use wsadocs_server::{MenuLinks, ShellContext, render_shell};
use wsadocs_site::Session;

use crate::commands::{ConfigArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Location to render (default: the landing page).
    #[arg(default_value = "")]
    location: String,

    /// Print the full viewer page instead of the content HTML.
    #[arg(long, conflicts_with = "json")]
    full: bool,

    /// Print the page view as JSON.
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(None, None)?;
        let site = open_site(&config);

        let location = site.normalize(&self.location);
        let page = site.page(&location);

        if !page.found {
            output.warning(&format!("Page not found: {location}"));
        }
        for warning in &page.warnings {
            output.warning(warning);
        }

        if self.json {
            output.print(&serde_json::to_string_pretty(&page)?)?;
        } else if self.full {
            let snapshot = site.snapshot();
            let session = Session::restore(snapshot.forest(), &location, None, None);
            let nav = site.full_navigation(&snapshot, &session);
            let shell = ShellContext {
                base_path: &config.site.base_path,
                site_title: &config.site.title,
                menu_links: MenuLinks::Static,
            };
            output.print(&render_shell(shell, &nav, &page))?;
        } else {
            output.print(&page.html)?;
        }
        Ok(())
    }
}

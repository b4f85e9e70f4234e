//! `wsadocs nav` command implementation.
//!
//! Prints the sidebar as it would appear at a location.

use clap::Args;
use wsadocs_nav::{MenuItem, MenuKind, NodeId};
use wsadocs_site::{NavigationView, Session};

use crate::commands::{ConfigArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Location to resolve (default: the landing page).
    #[arg(default_value = "")]
    location: String,

    /// Expanded group ids, e.g. `0,2.1`.
    #[arg(long)]
    open: Option<String>,

    /// Treat the request as a toggle made from this location.
    #[arg(long)]
    at: Option<String>,

    /// Flip a group open or closed after resolving the location (repeatable).
    #[arg(long = "toggle", value_name = "ID")]
    pub(crate) toggles: Vec<NodeId>,

    /// Print JSON instead of a tree.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(None, None)?;
        let site = open_site(&config);

        let snapshot = site.snapshot();
        if let Some(error) = snapshot.load_error() {
            output.warning(&format!("Manifest could not be loaded: {error}"));
        }

        let location = site.normalize(&self.location);
        let mut session = Session::restore(
            snapshot.forest(),
            &location,
            self.open.as_deref(),
            self.at.as_deref(),
        );
        for id in &self.toggles {
            session.toggle(id);
        }
        let nav = site.navigation(&snapshot, &session);

        if self.json {
            output.print(&serde_json::to_string_pretty(&nav)?)?;
        } else {
            for line in tree_lines(&nav, &output) {
                output.print(&line)?;
            }
        }
        Ok(())
    }
}

/// Indented text rendering of the menu, trail first.
fn tree_lines(nav: &NavigationView, output: &Output) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(trail) = &nav.trail {
        lines.push(output.dim(&format!("Trail: {}", trail.titles().join(" > "))));
    }
    push_items(&nav.items, output, &mut lines);
    lines
}

fn push_items(items: &[MenuItem], output: &Output, lines: &mut Vec<String>) {
    for item in items {
        let indent = "  ".repeat(item.level);
        match &item.kind {
            MenuKind::Group {
                expanded, children, ..
            } => {
                let marker = if *expanded { "▾" } else { "▸" };
                lines.push(format!(
                    "{indent}{marker} {} {}",
                    item.title,
                    output.dim(&format!("[{}]", item.id))
                ));
                push_items(children, output, lines);
            }
            MenuKind::Link { path, active } => {
                let marker = if *active { "●" } else { "•" };
                lines.push(format!(
                    "{indent}{marker} {} {}",
                    item.title,
                    output.dim(&format!("/{path}"))
                ));
            }
            MenuKind::Label => lines.push(format!("{indent}  {}", item.title)),
        }
    }
}

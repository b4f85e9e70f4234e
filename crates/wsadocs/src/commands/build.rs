//! `wsadocs build` command implementation.
//!
//! Writes the viewer as static files: one `index.html` per route, the
//! landing page at the root, `404.html` with the welcome view, and the
//! assets under `assets/`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use wsadocs_renderer::highlight_stylesheet;
use wsadocs_server::{MenuLinks, ShellContext, assets, render_shell};
use wsadocs_site::{PageView, Session, Site, SiteSnapshot};

use crate::commands::{ConfigArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output directory for the generated site.
    #[arg(short, long, default_value = "dist")]
    out: PathBuf,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load(None, None)?;
        let highlight_css = highlight_stylesheet(&config.render.theme)?;
        let site = open_site(&config);

        output.info(&format!("Output: {}", self.out.display()));

        let builder = StaticSiteBuilder {
            site: &site,
            shell: ShellContext {
                base_path: &config.site.base_path,
                site_title: &config.site.title,
                menu_links: MenuLinks::Static,
            },
            highlight_css: &highlight_css,
        };
        let summary = builder.build(&self.out)?;

        if let Some(error) = &summary.load_error {
            output.warning(&format!("Manifest could not be loaded: {error}"));
        }
        for path in &summary.missing {
            output.warning(&format!("Page not found: {path}"));
        }
        for path in &summary.rejected {
            output.warning(&format!("Skipped route with unsafe path: {path}"));
        }
        output.success(&format!(
            "Built {} pages to {}",
            summary.pages,
            self.out.display()
        ));
        Ok(())
    }
}

/// What a build produced.
#[derive(Debug, Default)]
pub(crate) struct BuildSummary {
    /// HTML pages written, `404.html` included.
    pub(crate) pages: usize,
    /// Routes whose document could not be fetched.
    pub(crate) missing: Vec<String>,
    /// Routes not written because their path would leave the output directory.
    pub(crate) rejected: Vec<String>,
    /// Manifest load failure, if any.
    pub(crate) load_error: Option<String>,
}

/// Renders every route of a site into a directory.
pub(crate) struct StaticSiteBuilder<'a> {
    pub(crate) site: &'a Site,
    pub(crate) shell: ShellContext<'a>,
    pub(crate) highlight_css: &'a str,
}

impl StaticSiteBuilder<'_> {
    /// Build the site into `out`.
    pub(crate) fn build(&self, out: &Path) -> std::io::Result<BuildSummary> {
        let snapshot = self.site.snapshot();
        let mut summary = BuildSummary {
            load_error: snapshot.load_error().map(str::to_owned),
            ..BuildSummary::default()
        };
        fs::create_dir_all(out)?;

        let landing = self.render(&snapshot, "");
        write_page(out, "", &landing, &mut summary)?;

        let mut seen = HashSet::from([String::new()]);
        for entry in snapshot.routes().entries() {
            if !seen.insert(entry.path.clone()) {
                continue;
            }
            if !is_safe_path(&entry.path) {
                tracing::warn!(path = %entry.path, "Skipping route with unsafe path");
                summary.rejected.push(entry.path.clone());
                continue;
            }
            let page = self.render(&snapshot, &entry.path);
            write_page(out, &entry.path, &page, &mut summary)?;
        }

        let welcome = self.site.welcome(String::new());
        let session = Session::restore(snapshot.forest(), "", None, None);
        let nav = self.site.full_navigation(&snapshot, &session);
        fs::write(out.join("404.html"), render_shell(self.shell, &nav, &welcome))?;
        summary.pages += 1;

        let assets_dir = out.join("assets");
        fs::create_dir_all(&assets_dir)?;
        for asset in assets::all(self.highlight_css) {
            fs::write(assets_dir.join(asset.name), asset.body)?;
        }

        tracing::info!(pages = summary.pages, out = %out.display(), "Static build complete");
        Ok(summary)
    }

    fn render(&self, snapshot: &SiteSnapshot, location: &str) -> (PageView, String) {
        let session = Session::restore(snapshot.forest(), location, None, None);
        let nav = self.site.full_navigation(snapshot, &session);
        let page = self.site.page(location);
        let html = render_shell(self.shell, &nav, &page);
        (page, html)
    }
}

/// Write `<out>/<path>/index.html`.
fn write_page(
    out: &Path,
    path: &str,
    (page, html): &(PageView, String),
    summary: &mut BuildSummary,
) -> std::io::Result<()> {
    let dir = if path.is_empty() {
        out.to_path_buf()
    } else {
        out.join(path)
    };
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("index.html"), html)?;
    summary.pages += 1;
    if !page.found {
        summary.missing.push(path.to_owned());
    }
    Ok(())
}

/// True if a route path stays inside the output directory.
fn is_safe_path(path: &str) -> bool {
    !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

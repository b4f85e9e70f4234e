//! WSADOCS CLI - Documentation viewer.
//!
//! Provides commands for:
//! - `serve`: Start the viewer server
//! - `build`: Write the viewer as static files
//! - `nav`: Print the sidebar for a location
//! - `routes`: List manifest routes
//! - `render`: Render one location

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, NavArgs, RenderArgs, RoutesArgs, ServeArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WSADOCS - Documentation viewer.
#[derive(Parser)]
#[command(name = "wsadocs", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the viewer server.
    Serve(ServeArgs),
    /// Build the viewer as static files.
    Build(BuildArgs),
    /// Print the sidebar for a location.
    Nav(NavArgs),
    /// List manifest routes.
    Routes(RoutesArgs),
    /// Render one location.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => args.execute(VERSION),
        Commands::Build(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

//! reslib: render and publish a resource library template gallery.
//!
//! # Usage
//!
//! ```text
//! reslib render [--metadata SRC] [--container ID] [--tab SLUG] [--output FILE] [--fragment]
//! reslib publish [--dry-run]
//! reslib diff
//! reslib status [--json]
//! reslib categories [--json]
//! reslib validate
//! ```
//!
//! Global flags: `--config FILE` (default `./reslib.yaml`), `-v` / `-vv`.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::{
    categories::CategoriesArgs, diff::DiffArgs, publish::PublishArgs, render::RenderArgs,
    status::StatusArgs, validate::ValidateArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "reslib",
    version,
    about = "Render a metadata-driven template gallery into a static page",
    long_about = None,
)]
struct Cli {
    /// Config file to read instead of `./reslib.yaml`.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the gallery page to stdout or a file.
    Render(RenderArgs),

    /// Render and write the page to the configured output path.
    Publish(PublishArgs),

    /// Show a unified diff of what publish would write.
    Diff(DiffArgs),

    /// Show whether the published page is current.
    Status(StatusArgs),

    /// List categories (tabs) and their template counts.
    Categories(CategoriesArgs),

    /// Check the metadata document for structural problems.
    Validate(ValidateArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Render(args) => args.run(config),
        Commands::Publish(args) => args.run(config),
        Commands::Diff(args) => args.run(config),
        Commands::Status(args) => args.run(config),
        Commands::Categories(args) => args.run(config),
        Commands::Validate(args) => args.run(config),
    }
}

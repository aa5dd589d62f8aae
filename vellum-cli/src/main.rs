//! vellum - lay out Markdown and render its tables.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vellum_cli::Args;

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with rendered output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(input = %args.input.display(), "starting vellum");
    vellum_cli::run(&args)
}

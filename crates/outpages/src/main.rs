//! outpages CLI - Outline wiki to Cloudflare Pages publisher.
//!
//! Provides commands for:
//! - `publish`: Build the site from an Outline collection and deploy it

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::PublishArgs;
use output::Output;

/// outpages - Outline wiki to Cloudflare Pages publisher.
#[derive(Parser)]
#[command(name = "outpages", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site from Outline and deploy it to Cloudflare Pages.
    Publish(PublishArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Publish(args) if args.verbose);

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Publish(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

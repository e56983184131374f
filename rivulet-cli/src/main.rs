//! Rivulet CLI - Command-line interface
//!
//! Runs the addon HTTP server or performs one-shot stream resolutions.

mod commands;

use clap::Parser;
use rivulet_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "rivulet")]
#[command(about = "A multi-provider stream resolution addon")]
struct Cli {
    /// Console log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), None)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    commands::handle_command(cli.command).await
}

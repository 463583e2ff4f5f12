//! fortdata CLI
//!
//! Parses Fortnite backend documents (profiles, codes, item shop, creative
//! discovery) from JSON files and prints their typed form.

use std::io;

use clap::Parser;
use tracing::debug;

use fortdata_cli::commands::{self, Command};
use fortdata_core::config::load_config;
use fortdata_core::tracing_init::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "fortdata")]
#[command(version, about = "Typed views over Fortnite backend documents", long_about = None)]
struct Cli {
    /// Emit structured JSON log lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Print single-line JSON instead of pretty output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let mut config = load_config(Some(&cwd))?;
    if cli.log_json {
        config.logging.json = true;
    }
    if cli.compact {
        config.output.pretty = false;
    }

    init_tracing(&config.logging.level, config.logging.json);
    debug!(version = env!("CARGO_PKG_VERSION"), ?config, "Starting fortdata");

    let mut out = io::stdout().lock();
    commands::run(cli.command, config.output.pretty, &mut out)
}

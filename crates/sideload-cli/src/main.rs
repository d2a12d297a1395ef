//! Sideload CLI
//!
//! Command-line interface for turning nested record graphs into
//! side-loaded documents

use clap::{Parser, Subcommand};
use sideload_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sideload")]
#[command(about = "Sideload - flatten nested records into side-loaded JSON documents", long_about = None)]
struct Cli {
    /// JSON log lines at info level on stderr (default: human-readable debug logs)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Flatten records into a side-loaded document
    Normalize(commands::normalize::NormalizeArgs),
    /// Wrap records unflattened under the primary type
    Ok(commands::ok::OkArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Normalize(args) => commands::normalize::execute(args),
        Commands::Ok(args) => commands::ok::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

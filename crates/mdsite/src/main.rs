//! mdsite CLI - serve a directory of markdown documents as a website.
//!
//! Provides commands for:
//! - `serve`: Start the web server

mod commands;
mod error;
mod logging;
mod output;

use clap::{Parser, Subcommand};

use commands::ServeArgs;
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// mdsite - Markdown directory website.
#[derive(Parser)]
#[command(name = "mdsite", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(VERSION)),
            Err(err) => Err(CliError::Io(err)),
        },
    };

    if let Err(err) = result {
        output.failure(&err);
        std::process::exit(1);
    }
}

//! pairdebug command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pairdebug - collaborative code debugging server
#[derive(Parser)]
#[command(name = "pairdebug")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "PAIRDEBUG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the server
    Serve(commands::serve::ServeArgs),

    /// Check whether a server is listening
    Status(commands::status::StatusArgs),

    /// Debug a source file once and print the result
    Debug(commands::debug::DebugArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, cli.config.as_deref()).await,
        Commands::Status(args) => commands::status::run(args, cli.config.as_deref()).await,
        Commands::Debug(args) => commands::debug::run(args, cli.config.as_deref()).await,
        Commands::Version => {
            println!("pairdebug {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

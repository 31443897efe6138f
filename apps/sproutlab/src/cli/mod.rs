//! # SproutLab CLI Module
//!
//! This module implements the CLI interface for SproutLab.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `steps` - List the build-guide step catalog
//! - `status` - Show the derived guide status
//! - `walkthrough` - Run the full guide start to finish with real timers

mod commands;

use clap::{Parser, Subcommand};
use sproutlab_core::GuideError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// SproutLab - Build Guide Server
///
/// A sequential, deterministic build-guide progression engine.
/// Steps unlock in order; completing one celebrates, then advances.
#[derive(Parser, Debug)]
#[command(name = "sproutlab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the build-guide step catalog
    Steps,

    /// Show the derived guide status
    Status,

    /// Run the full guide start to finish with real timers
    Walkthrough {
        /// Extra pause between steps, in milliseconds
        #[arg(short, long)]
        delay_ms: Option<u64>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), GuideError> {
    let json_mode = cli.json_mode;
    let config_file = cli.config.as_deref();

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(config_file, host, port).await,
        Some(Commands::Steps) => cmd_steps(json_mode),
        Some(Commands::Status) => cmd_status(json_mode),
        Some(Commands::Walkthrough { delay_ms }) => cmd_walkthrough(json_mode, delay_ms).await,
        None => {
            // No subcommand - show status by default
            cmd_status(json_mode)
        }
    }
}

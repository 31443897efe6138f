//! # SproutLab - Build Guide Server
//!
//! The main binary for the SproutLab build-guide progression engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for guide operations
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                apps/sproutlab (THE BINARY)               │
//! │                                                          │
//! │    ┌─────────────┐           ┌─────────────┐             │
//! │    │   CLI       │           │   HTTP API  │             │
//! │    │  (clap)     │           │   (axum)    │             │
//! │    └──────┬──────┘           └──────┬──────┘             │
//! │           │                         │                    │
//! │           └────────────┬────────────┘                    │
//! │                        ▼                                 │
//! │               ┌─────────────────┐                        │
//! │               │ sproutlab-core  │                        │
//! │               │  (THE LOGIC)    │                        │
//! │               └─────────────────┘                        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! sproutlab server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! sproutlab steps
//! sproutlab status
//! sproutlab walkthrough
//! ```

use clap::Parser;
use sproutlab::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — SPROUTLAB_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SPROUTLAB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sproutlab=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the SproutLab startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗██████╗ ██████╗  ██████╗ ██╗   ██╗████████╗██╗      █████╗ ██████╗
  ██╔════╝██╔══██╗██╔══██╗██╔═══██╗██║   ██║╚══██╔══╝██║     ██╔══██╗██╔══██╗
  ███████╗██████╔╝██████╔╝██║   ██║██║   ██║   ██║   ██║     ███████║██████╔╝
  ╚════██║██╔═══╝ ██╔══██╗██║   ██║██║   ██║   ██║   ██║     ██╔══██║██╔══██╗
  ███████║██║     ██║  ██║╚██████╔╝╚██████╔╝   ██║   ███████╗██║  ██║██████╔╝
  ╚══════╝╚═╝     ╚═╝  ╚═╝ ╚═════╝  ╚═════╝    ╚═╝   ╚══════╝╚═╝  ╚═╝╚═════╝

  Build Guide Server v{}

  Sequential • Deterministic • Celebration-Driven
"#,
        env!("CARGO_PKG_VERSION")
    );
}

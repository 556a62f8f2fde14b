//! Tienda CLI - Collection file management.
//!
//! # Usage
//!
//! ```bash
//! # Create missing collection files as empty arrays
//! tienda init
//!
//! # Reset both collections to empty arrays
//! tienda init --force
//!
//! # Validate both collection files
//! tienda check --data-dir /var/lib/tienda
//! ```
//!
//! File locations come from the same `TIENDA_*` variables the server reads;
//! `--data-dir` overrides `TIENDA_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tienda_server::config::ServerConfig;

mod commands;

#[derive(Parser)]
#[command(name = "tienda")]
#[command(author, version, about = "Tienda CLI tools")]
struct Cli {
    /// Directory holding the collection files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the collection files if they are missing
    Init {
        /// Overwrite existing files with empty collections
        #[arg(long)]
        force: bool,
    },
    /// Load both collections and verify their invariants
    Check,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut config = ServerConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Init { force } => commands::init::run(&config, force).await?,
        Commands::Check => {
            let report = commands::check::run(&config).await?;
            tracing::info!(
                products = report.products,
                carts = report.carts,
                cart_items = report.cart_items,
                "Collections OK"
            );
        }
    }
    Ok(())
}

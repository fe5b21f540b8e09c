mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Chainward -- tamper-evidence verifier for hash-chained audit logs.
#[derive(Parser, Debug)]
#[command(name = "chainward", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify the hash-chain integrity of one or more chains
    Verify {
        /// Path to the SQLite audit database (shortcut for a sqlite store config)
        #[arg(long, conflicts_with = "config")]
        db: Option<PathBuf>,

        /// Path to a chainward.toml configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Chain key to verify (repeatable)
        #[arg(long = "chain", required = true)]
        chains: Vec<String>,

        /// Give up on a walk after this many seconds and report it incomplete
        #[arg(long)]
        deadline_secs: Option<u64>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with env filter (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Verify {
            db,
            config,
            chains,
            deadline_secs,
            format,
        } => commands::verify::run(db, config, &chains, deadline_secs, &format).await,
    }
}

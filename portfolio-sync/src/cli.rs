/// This module implements the CLI interface for portfolio-sync — command
/// parsing, argument validation and the main entrypoint.
///
/// All core business logic (staleness policy, rewriting, assembly, the sync
/// driver) lives in the `portfolio-sync-core` crate. This module is strictly
/// for CLI glue: wiring configuration and the concrete GitHub/OpenAI clients
/// into the driver.
///
/// ## How To Use
/// - For command-line users: run the installed `portfolio-sync` binary with
///   `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed
///   [`Cli`].
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_sync_core::sink::FsSink;
use portfolio_sync_core::store::JsonRecordStore;
use portfolio_sync_core::synchronise::{synchronise, SyncConfig};

use crate::describer::OpenAiDescriber;
use crate::github::GithubProvider;
use crate::load_config::load_config;

/// CLI for portfolio-sync: compile repository READMEs into content documents.
#[derive(Parser)]
#[clap(
    name = "portfolio-sync",
    version,
    about = "Compile a GitHub repository catalogue into portfolio content documents"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synchronise all owned repositories into content documents using the
    /// given config file
    Sync {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sync { config } => {
            let config = load_config(config)?;
            tracing::info!(command = "sync", account = %config.account, "Starting synchronisation");

            let provider = GithubProvider::new_from_env()
                .map_err(|e| anyhow::anyhow!("Failed to construct GitHub client: {e}"))?;
            let describer = OpenAiDescriber::new_from_env()
                .map_err(|e| anyhow::anyhow!("Failed to construct describer: {e}"))?;
            let store = JsonRecordStore::open(&config.store_path)
                .map_err(|e| anyhow::anyhow!("Failed to open record store: {e}"))?;
            let sink = FsSink::new(&config.content_dir);

            let sync_config = SyncConfig {
                account: config.account,
                default_hero_image: config.default_hero_image,
            };
            match synchronise(&sync_config, &provider, &describer, &store, &sink).await {
                Ok(report) => {
                    tracing::info!(
                        command = "sync",
                        synchronised = report.documents.len(),
                        failed = report.failures.len(),
                        skipped = report.skipped,
                        "Synchronisation complete"
                    );
                    if !report.failures.is_empty() {
                        anyhow::bail!(
                            "{} of {} repositories failed to synchronise",
                            report.failures.len(),
                            report.failures.len() + report.documents.len()
                        );
                    }
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Synchronisation aborted");
                    Err(anyhow::Error::msg(e))
                }
            }
        }
    }
}

/// # pbi-push CLI Interface (Module)
///
/// This module implements the full CLI interface for pbi-push: command
/// parsing, argument validation, and the async entrypoint.
///
/// All core business logic (table model, schema mapping, the publish
/// pipeline) lives in the [`pbi-push-core`] crate. This module is strictly
/// CLI glue: it wires the loaded config, env credentials and the real
/// HTTP client into the core pipeline.
///
/// ## How To Use
/// - For command-line users: use the installed `pbi-push` binary with
///   `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed
///   [`Cli`].
///
/// ## Extending
/// When adding subcommands, update [`Commands`] below and keep all
/// non-trivial business logic inside `pbi-push-core`.
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};

use pbi_push_core::config::PublishConfig;
use pbi_push_core::pipeline::{publish, PipelineState};

use crate::client::PowerBiClient;
use crate::credentials::load_credentials;
use crate::load_config::load_config;

/// CLI for pbi-push: publish local CSV tables to a Power BI push dataset.
#[derive(Parser)]
#[clap(
    name = "pbi-push",
    version,
    about = "Provision a Power BI push dataset from local CSV files and clone a report onto it"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Publish every CSV table in the configured directory to a new push dataset
    Publish {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Publish { config } => {
            let config = load_config(config)?;
            tracing::info!(command = "publish", "Starting publish process");

            let credentials = load_credentials()?;
            credentials.trace_loaded();

            // Default names carry a timestamp so repeated runs never collide.
            let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
            let dataset_name = config
                .publish
                .dataset_name
                .clone()
                .unwrap_or_else(|| format!("Dataset_{timestamp}"));
            let report_name = config
                .publish
                .report_name
                .clone()
                .unwrap_or_else(|| format!("Report_{timestamp}"));

            let publish_config =
                PublishConfig::new(config.input.dir.clone(), dataset_name, report_name);
            publish_config.trace_loaded();

            let client = PowerBiClient::new(credentials);
            match publish(&publish_config, &client).await {
                Ok(report) => {
                    for table in &report.tables {
                        if !table.uploaded {
                            tracing::warn!(
                                command = "publish",
                                table = %table.table_name,
                                "Table failed to upload"
                            );
                        }
                    }
                    match report.state {
                        PipelineState::Cloned => tracing::info!(
                            command = "publish",
                            dataset_id = %report.dataset_id,
                            "Publish complete"
                        ),
                        _ => tracing::warn!(
                            command = "publish",
                            dataset_id = %report.dataset_id,
                            clone_error = ?report.clone_error,
                            "Publish finished but the report clone failed"
                        ),
                    }
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "publish", error = %e, "Publish aborted");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}

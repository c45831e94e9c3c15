use anyhow::Result;
use clap::Parser;
use pbi_push::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Tracing is the only console output; components return typed results.
    tracing_subscriber::fmt::init();
    tracing::info!("pbi-push startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    let result = run(cli).await;
    match &result {
        Ok(_) => tracing::info!("pbi-push completed successfully"),
        Err(e) => tracing::error!(error = %e, "pbi-push exited with error"),
    }
    result
}

//! High-level pipeline: orchestrates authenticate → load → map → provision
//! → push → clone for one run.
//!
//! This module provides the top-level orchestration for "publishing" a
//! directory of CSV tables as a new push dataset. It implements a
//! coordinated pipeline that:
//!   - Exchanges client credentials for a bearer token
//!   - Loads every parsable CSV table from the configured directory
//!   - Derives one remote table schema per loaded table
//!   - Creates the push dataset, waits for provisioning to settle, then
//!     pushes each table's rows
//!   - Clones the configured report onto the new dataset
//!   - Aggregates and returns a report of what succeeded and failed.
//!
//! # Error Handling
//! Fatal steps (token, empty load, dataset creation) abort the run with a
//! [`PublishError`]; per-table push failures are recorded in the report and
//! do not stop the remaining tables, and the clone is attempted regardless
//! of upload outcomes.
//!
//! # Callable From
//! - Used by the CLI crate and by integration tests
//! - Expects a concrete (async) [`Publisher`] implementation

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::PublishConfig;
use crate::contract::{AuthError, ClonedReport, DatasetId, ProvisionError, Publisher};
use crate::load;
use crate::schema::{map_schema, TableSchema};

/// Progress of one run through its steps. Completed runs end in `Cloned` or
/// `CloneFailed`; `Aborted` is represented by the error side of
/// [`publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Authenticated,
    Loaded,
    SchemaBuilt,
    Provisioned,
    Uploading,
    Cloned,
    CloneFailed,
    Aborted,
}

/// Outcome of one table's batch push.
#[derive(Debug, Clone)]
pub struct TableUploadReport {
    pub table_name: String,
    pub rows: usize,
    pub uploaded: bool,
}

/// Result of a completed (non-aborted) run, for downstream audit. Callers
/// and tests read this instead of scraping console output.
#[derive(Debug)]
pub struct PublishReport {
    pub state: PipelineState,
    pub dataset_id: DatasetId,
    pub dataset_name: String,
    pub tables: Vec<TableUploadReport>,
    pub cloned_report: Option<ClonedReport>,
    pub clone_error: Option<String>,
}

/// Fatal failures that abort the run before any upload.
#[derive(Debug)]
pub enum PublishError {
    Auth(AuthError),
    NoTables { dir: PathBuf },
    Provision(ProvisionError),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Auth(e) => write!(f, "authentication failed: {e}"),
            PublishError::NoTables { dir } => {
                write!(f, "no tables loaded from {}", dir.display())
            }
            PublishError::Provision(e) => write!(f, "dataset creation failed: {e}"),
        }
    }
}

impl std::error::Error for PublishError {}

fn advance(state: &mut PipelineState, next: PipelineState) {
    debug!(from = ?state, to = ?next, "[PUBLISH] State transition");
    *state = next;
}

/// Entrypoint: publish the configured directory as a new push dataset and
/// clone the report onto it.
pub async fn publish<P>(config: &PublishConfig, api: &P) -> Result<PublishReport, PublishError>
where
    P: Publisher,
{
    let mut state = PipelineState::Init;
    info!("[PUBLISH] Starting publish pipeline");

    // Token failure short-circuits everything, including the local load.
    let token = match api.acquire_token().await {
        Ok(token) => {
            info!("[PUBLISH] Acquired access token");
            token
        }
        Err(e) => {
            error!(error = %e, "[PUBLISH][ERROR] Token acquisition failed");
            advance(&mut state, PipelineState::Aborted);
            return Err(PublishError::Auth(e));
        }
    };
    advance(&mut state, PipelineState::Authenticated);

    info!(dir = %config.data_dir.display(), "[PUBLISH] Loading tables");
    let tables = load::load_tables(&config.data_dir);
    if tables.is_empty() {
        error!(
            dir = %config.data_dir.display(),
            "[PUBLISH][ERROR] No tables loaded, aborting before any dataset call"
        );
        advance(&mut state, PipelineState::Aborted);
        return Err(PublishError::NoTables {
            dir: config.data_dir.clone(),
        });
    }
    info!(count = tables.len(), "[PUBLISH] Tables loaded");
    advance(&mut state, PipelineState::Loaded);

    // Pure step: one schema per loaded table, always succeeds.
    let schemas: Vec<TableSchema> = tables.iter().map(map_schema).collect();
    advance(&mut state, PipelineState::SchemaBuilt);

    info!(
        dataset_name = %config.dataset_name,
        tables = schemas.len(),
        "[PUBLISH] Creating push dataset"
    );
    let dataset_id = match api
        .create_dataset(&token, &config.dataset_name, &schemas)
        .await
    {
        Ok(id) => {
            info!(dataset_id = %id, "[PUBLISH] Dataset created");
            id
        }
        Err(e) => {
            error!(error = %e, "[PUBLISH][ERROR] Dataset creation failed, no uploads attempted");
            advance(&mut state, PipelineState::Aborted);
            return Err(PublishError::Provision(e));
        }
    };
    advance(&mut state, PipelineState::Provisioned);

    // Creation may be queued (202); there is no readiness endpoint, so
    // give provisioning a fixed window to settle.
    if !config.settle_delay.is_zero() {
        info!(
            delay_secs = config.settle_delay.as_secs(),
            "[PUBLISH] Waiting for dataset to settle"
        );
        tokio::time::sleep(config.settle_delay).await;
    }

    // One sub-step per table, in load order. A failed push is recorded and
    // the loop continues.
    advance(&mut state, PipelineState::Uploading);
    let mut upload_reports: Vec<TableUploadReport> = Vec::new();
    for table in &tables {
        info!(table = %table.name, "[PUBLISH][UPLOAD] Pushing rows");
        let rows = table.rows_as_json();
        let row_count = rows.len();
        let uploaded = match api.push_rows(&token, &dataset_id, &table.name, rows).await {
            Ok(()) => {
                info!(table = %table.name, rows = row_count, "[PUBLISH][UPLOAD] Rows pushed");
                true
            }
            Err(e) => {
                error!(
                    table = %table.name,
                    error = %e,
                    "[PUBLISH][ERROR][UPLOAD] Push failed, continuing with remaining tables"
                );
                false
            }
        };
        upload_reports.push(TableUploadReport {
            table_name: table.name.clone(),
            rows: row_count,
            uploaded,
        });
    }

    // The clone is attempted regardless of individual upload outcomes.
    info!(
        report_name = %config.report_name,
        dataset_id = %dataset_id,
        "[PUBLISH] Cloning report onto new dataset"
    );
    let (cloned_report, clone_error) = match api
        .clone_report(&token, &dataset_id, &config.report_name)
        .await
    {
        Ok(report) => {
            info!(
                report_id = %report.id,
                report_name = %report.name,
                "[PUBLISH] Report cloned"
            );
            advance(&mut state, PipelineState::Cloned);
            (Some(report), None)
        }
        Err(e) => {
            error!(error = %e, "[PUBLISH][ERROR] Report clone failed");
            advance(&mut state, PipelineState::CloneFailed);
            (None, Some(e.to_string()))
        }
    };

    Ok(PublishReport {
        state,
        dataset_id,
        dataset_name: config.dataset_name.clone(),
        tables: upload_reports,
        cloned_report,
        clone_error,
    })
}

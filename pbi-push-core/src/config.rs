use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Delay between dataset creation and the first row upload. Creation may be
/// accepted with 202 while provisioning is still in flight; there is no
/// readiness endpoint to poll, so the pipeline waits this long instead.
pub const DATASET_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Service-principal identity and the target workspace/report, read once at
/// startup and passed explicitly to every component that needs them.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub workspace_id: String,
    pub report_id: String,
}

impl Credentials {
    pub fn trace_loaded(&self) {
        info!(
            tenant_id = %self.tenant_id,
            client_id = %self.client_id,
            workspace_id = %self.workspace_id,
            report_id = %self.report_id,
            secret_set = !self.client_secret.is_empty(),
            "Loaded Credentials"
        );
    }
}

// The client secret must never reach logs or error output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("workspace_id", &self.workspace_id)
            .field("report_id", &self.report_id)
            .finish()
    }
}

/// What to publish: where the CSV files live and the names the new dataset
/// and cloned report are created under.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub data_dir: PathBuf,
    pub dataset_name: String,
    pub report_name: String,
    pub settle_delay: Duration,
}

impl PublishConfig {
    pub fn new(data_dir: PathBuf, dataset_name: String, report_name: String) -> Self {
        Self {
            data_dir,
            dataset_name,
            report_name,
            settle_delay: DATASET_SETTLE_DELAY,
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            data_dir = %self.data_dir.display(),
            dataset_name = %self.dataset_name,
            report_name = %self.report_name,
            "Loaded PublishConfig"
        );
        debug!(?self, "PublishConfig loaded (full debug)");
    }
}

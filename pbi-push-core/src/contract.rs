//! # Publisher: interface to the remote analytics service
//!
//! This module defines the single trait ([`Publisher`]) and the concrete
//! supporting types the publish pipeline needs from the remote service:
//! token acquisition, push-dataset creation, per-table row pushes and
//! report cloning.
//!
//! ## Interface & Extensibility
//! - Implement [`Publisher`] to create new service clients (the binary
//!   crate provides the real HTTP implementation).
//! - All methods are async; each returns its own error class so the
//!   orchestrator can decide between aborting and continuing.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use std::fmt;

use crate::schema::TableSchema;

/// Opaque bearer token returned by the identity endpoint. Valid for the
/// lifetime of one run; never persisted or refreshed.
#[derive(Clone)]
pub struct AccessToken(pub String);

// Token material stays out of Debug output.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(<redacted>)")
    }
}

/// Opaque dataset identifier assigned by the service at creation time.
/// Required by every per-table push call and by the report clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetId(pub String);

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata of the clone returned by the report-clone endpoint.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ClonedReport {
    pub id: String,
    pub name: String,
    #[serde(rename = "webUrl", default)]
    pub web_url: Option<String>,
}

/// Token request rejected or unreachable. Fatal for the run.
#[derive(Debug)]
pub enum AuthError {
    Rejected { status: u16, body: String },
    Transport(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Rejected { status, body } => {
                write!(f, "token request rejected with status {status}: {body}")
            }
            AuthError::Transport(msg) => write!(f, "token request failed: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Dataset creation rejected, unreachable, or missing its id. Fatal: no
/// uploads are attempted without a dataset id.
#[derive(Debug)]
pub enum ProvisionError {
    Rejected { status: u16, body: String },
    MissingId,
    Transport(String),
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionError::Rejected { status, body } => {
                write!(f, "dataset creation rejected with status {status}: {body}")
            }
            ProvisionError::MissingId => {
                write!(f, "dataset creation response carried no dataset id")
            }
            ProvisionError::Transport(msg) => write!(f, "dataset creation failed: {msg}"),
        }
    }
}

impl std::error::Error for ProvisionError {}

/// One table's batch push rejected or unreachable. The pipeline records it
/// and continues with the remaining tables.
#[derive(Debug)]
pub enum UploadError {
    Rejected { status: u16, body: String },
    Transport(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Rejected { status, body } => {
                write!(f, "row push rejected with status {status}: {body}")
            }
            UploadError::Transport(msg) => write!(f, "row push failed: {msg}"),
        }
    }
}

impl std::error::Error for UploadError {}

/// Report clone rejected or unreachable. The clone endpoint often answers
/// with a bare 404, so the rejected form spells out what to check.
#[derive(Debug)]
pub enum CloneError {
    Rejected { status: u16, body: String },
    Transport(String),
}

impl fmt::Display for CloneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloneError::Rejected { status, body } => write!(
                f,
                "report clone rejected with status {status}: {body}; \
                 verify the workspace, report and dataset ids exist and are \
                 accessible, and that the token carries Report.ReadWrite.All \
                 and Dataset.ReadWrite.All"
            ),
            CloneError::Transport(msg) => write!(f, "report clone failed: {msg}"),
        }
    }
}

impl std::error::Error for CloneError {}

/// Remote analytics service operations used by the publish pipeline.
/// Implemented by the real HTTP client in the binary crate and by mocks in
/// tests. Every call is attempted exactly once; there are no retries.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Exchange client credentials for a bearer token.
    async fn acquire_token(&self) -> Result<AccessToken, AuthError>;

    /// Create a push dataset declaring all table schemas; returns its id.
    async fn create_dataset(
        &self,
        token: &AccessToken,
        name: &str,
        tables: &[TableSchema],
    ) -> Result<DatasetId, ProvisionError>;

    /// Push one table's rows as a single batch.
    async fn push_rows(
        &self,
        token: &AccessToken,
        dataset: &DatasetId,
        table_name: &str,
        rows: Vec<Value>,
    ) -> Result<(), UploadError>;

    /// Clone the configured report, rebinding the clone to `dataset`.
    async fn clone_report(
        &self,
        token: &AccessToken,
        dataset: &DatasetId,
        new_name: &str,
    ) -> Result<ClonedReport, CloneError>;
}

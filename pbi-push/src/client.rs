#![doc = "Power BI client for CLI and core: bridges the trait abstraction to the real REST API."]
//
//! # Power BI Client (CLI <-> Core)
//!
//! This module provides the bridge between the CLI workflow and the
//! [`Publisher`] abstraction in `pbi-push-core`. It wires up the trait for
//! real use against the Power BI REST API.
//!
//! - Construct [`PowerBiClient`] with a [`Credentials`] value built at
//!   startup (see [`crate::credentials`]).
//! - All transport, serialization, and status handling are encapsulated
//!   here; the pipeline only sees the contract's typed results.
//! - Every call is attempted exactly once with the transport's default
//!   timeout behaviour; there is no retry layer.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use pbi_push_core::config::Credentials;
use pbi_push_core::contract::{
    AccessToken, AuthError, CloneError, ClonedReport, DatasetId, ProvisionError, Publisher,
    UploadError,
};
use pbi_push_core::schema::TableSchema;

/// Base URL for the Power BI REST API.
const POWER_BI_API_URL: &str = "https://api.powerbi.com/v1.0/myorg";
/// Resource the bearer token is scoped to.
const POWER_BI_RESOURCE: &str = "https://analysis.windows.net/powerbi/api";

pub struct PowerBiClient {
    http: reqwest::Client,
    credentials: Credentials,
    api_base: String,
}

impl PowerBiClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            api_base: POWER_BI_API_URL.to_string(),
        }
    }

    fn token_url(&self) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/token",
            self.credentials.tenant_id
        )
    }
}

#[async_trait]
impl Publisher for PowerBiClient {
    async fn acquire_token(&self) -> Result<AccessToken, AuthError> {
        info!(tenant_id = %self.credentials.tenant_id, "Requesting access token");
        let response = self
            .http
            .post(self.token_url())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("resource", POWER_BI_RESOURCE),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Token request could not be sent");
                AuthError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        if status != StatusCode::OK {
            error!(status = %status, "Token request rejected");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value = serde_json::from_str(&body)
            .map_err(|e| AuthError::Transport(format!("invalid token response: {e}")))?;
        match parsed.get("access_token").and_then(|t| t.as_str()) {
            Some(token) => {
                info!("Access token acquired");
                Ok(AccessToken(token.to_string()))
            }
            None => {
                error!("Token response carried no access_token field");
                Err(AuthError::Rejected {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    async fn create_dataset(
        &self,
        token: &AccessToken,
        name: &str,
        tables: &[TableSchema],
    ) -> Result<DatasetId, ProvisionError> {
        let url = format!(
            "{}/groups/{}/datasets",
            self.api_base, self.credentials.workspace_id
        );
        let payload = json!({
            "name": name,
            "defaultMode": "Push",
            "tables": tables,
        });

        info!(dataset_name = %name, tables = tables.len(), "Creating push dataset");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token.0)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Dataset creation request could not be sent");
                ProvisionError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProvisionError::Transport(e.to_string()))?;
        // Creation may be synchronous (201) or queued (202).
        if status != StatusCode::CREATED && status != StatusCode::ACCEPTED {
            error!(status = %status, "Dataset creation rejected");
            return Err(ProvisionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value =
            serde_json::from_str(&body).map_err(|_| ProvisionError::MissingId)?;
        match parsed.get("id").and_then(|v| v.as_str()) {
            Some(id) => {
                info!(dataset_id = %id, "Dataset created");
                Ok(DatasetId(id.to_string()))
            }
            None => {
                error!("Dataset creation response carried no id field");
                Err(ProvisionError::MissingId)
            }
        }
    }

    async fn push_rows(
        &self,
        token: &AccessToken,
        dataset: &DatasetId,
        table_name: &str,
        rows: Vec<Value>,
    ) -> Result<(), UploadError> {
        let url = format!(
            "{}/groups/{}/datasets/{}/tables/{}/rows",
            self.api_base, self.credentials.workspace_id, dataset, table_name
        );

        info!(table = %table_name, rows = rows.len(), "Pushing rows");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token.0)
            .json(&json!({ "rows": rows }))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, table = %table_name, "Row push request could not be sent");
                UploadError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .map_err(|e| UploadError::Transport(e.to_string()))?;
            error!(status = %status, table = %table_name, "Row push rejected");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!(table = %table_name, "Rows accepted");
        Ok(())
    }

    async fn clone_report(
        &self,
        token: &AccessToken,
        dataset: &DatasetId,
        new_name: &str,
    ) -> Result<ClonedReport, CloneError> {
        let url = format!(
            "{}/groups/{}/reports/{}/Clone",
            self.api_base, self.credentials.workspace_id, self.credentials.report_id
        );
        let payload = json!({
            "name": new_name,
            "targetModelId": dataset.0,
            "targetWorkspaceId": self.credentials.workspace_id,
        });

        info!(
            report_id = %self.credentials.report_id,
            new_name = %new_name,
            "Cloning report"
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token.0)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Report clone request could not be sent");
                CloneError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CloneError::Transport(e.to_string()))?;
        if status != StatusCode::OK {
            // The clone endpoint's rejections are typically bare; the error's
            // Display carries the remediation checklist.
            error!(status = %status, "Report clone rejected");
            return Err(CloneError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<ClonedReport>(&body) {
            Ok(report) => {
                info!(report_id = %report.id, "Report cloned");
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Failed to parse clone response");
                Err(CloneError::Transport(format!("invalid clone response: {e}")))
            }
        }
    }
}

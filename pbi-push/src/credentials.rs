use anyhow::Result;
use tracing::{error, info};

use pbi_push_core::config::Credentials;

fn require_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|e| {
        error!(var = name, "Required environment variable missing");
        anyhow::anyhow!("{name} missing in environment: {e}")
    })
}

/// Builds the credential set from the environment, once, at startup. A
/// `.env` file is honoured if present. Components receive the resulting
/// [`Credentials`] explicitly and never read the environment themselves.
pub fn load_credentials() -> Result<Credentials> {
    dotenvy::dotenv().ok();

    let credentials = Credentials {
        tenant_id: require_var("TENANT_ID")?,
        client_id: require_var("CLIENT_ID")?,
        client_secret: require_var("CLIENT_SECRET")?,
        workspace_id: require_var("WORKSPACE_ID")?,
        report_id: require_var("REPORT_ID")?,
    };
    info!(
        tenant_id = %credentials.tenant_id,
        workspace_id = %credentials.workspace_id,
        "Initialised credentials from environment"
    );
    Ok(credentials)
}

/// `load_config` module: loads the static YAML config into typed CLI
/// structs. Secrets never live here; identifiers and the client secret come
/// from the environment (see [`crate::credentials`]).
///
/// # Responsibilities
/// - Parse the user-supplied YAML configuration file into type-safe structs
/// - Keep the input schema decoupled from the domain core
/// - Ensure robust error messages for CLI and tests: any failure in loading
///   must result in clear diagnostics.
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    pub input: InputSection,
    #[serde(default)]
    pub publish: PublishSection,
}

#[derive(Debug, Deserialize)]
pub struct InputSection {
    /// Directory scanned for `*.csv` files, one remote table per file.
    pub dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct PublishSection {
    /// Name for the new dataset; a timestamped default is generated when
    /// omitted.
    #[serde(default)]
    pub dataset_name: Option<String>,
    /// Name for the cloned report; a timestamped default is generated when
    /// omitted.
    #[serde(default)]
    pub report_name: Option<String>,
}

/// Loads the static YAML config file (no secrets).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    match serde_yaml::from_str::<CliConfig>(&config_content) {
        Ok(config) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

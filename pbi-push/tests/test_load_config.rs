use serial_test::serial;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// A full config with explicit dataset and report names loads verbatim.
#[tokio::test]
#[serial]
async fn test_load_config_success_with_explicit_names() {
    let config_yaml = r#"
input:
  dir: ./Data
publish:
  dataset_name: NightlySales
  report_name: NightlySalesReport
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config =
        pbi_push::load_config::load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.input.dir, PathBuf::from("./Data"));
    assert_eq!(config.publish.dataset_name.as_deref(), Some("NightlySales"));
    assert_eq!(
        config.publish.report_name.as_deref(),
        Some("NightlySalesReport")
    );
}

/// The publish section is optional; omitted names stay unset so the CLI can
/// generate timestamped defaults.
#[tokio::test]
#[serial]
async fn test_load_config_allows_omitted_publish_section() {
    let config_yaml = r#"
input:
  dir: ./exports/csv
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = pbi_push::load_config::load_config(config_file.path())
        .expect("Config without a publish section should load");

    assert_eq!(config.input.dir, PathBuf::from("./exports/csv"));
    assert!(config.publish.dataset_name.is_none());
    assert!(config.publish.report_name.is_none());
}

/// If the config file is not valid YAML, load_config errors and reports as
/// such.
#[tokio::test]
#[serial]
async fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let err = pbi_push::load_config::load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

/// A missing file is a read error, not a parse error.
#[tokio::test]
#[serial]
async fn test_load_config_errors_for_missing_file() {
    let err = pbi_push::load_config::load_config("/definitely/not/a/config.yaml").unwrap_err();
    assert!(
        err.to_string().contains("read"),
        "Read error expected, got: {err}"
    );
}

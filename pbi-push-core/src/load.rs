use std::path::Path;
use tracing::{error, info, warn};

use crate::table::TabularData;

/// Reads every `*.csv` file in `dir` into a [`TabularData`], using the file
/// stem as the table name. Files that fail to parse are logged and skipped;
/// a missing directory yields an empty list. Order follows the directory
/// listing and is not sorted.
pub fn load_tables(dir: &Path) -> Vec<TabularData> {
    let mut tables = Vec::new();

    if !dir.exists() {
        warn!(dir = %dir.display(), "Data directory does not exist");
        return tables;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = ?e, dir = %dir.display(), "Failed to list data directory");
            return tables;
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                error!(error = ?e, dir = %dir.display(), "Failed to read directory entry");
                continue;
            }
        };
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => {
                warn!(path = %path.display(), "Skipping file with unusable name");
                continue;
            }
        };
        match read_csv(&path, name) {
            Ok(table) => {
                info!(
                    table = %table.name,
                    columns = table.columns.len(),
                    rows = table.rows.len(),
                    "Loaded table"
                );
                tables.push(table);
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "Failed to parse file, skipping");
            }
        }
    }

    tables
}

fn read_csv(path: &Path, name: String) -> Result<TabularData, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|field| field.to_string()).collect::<Vec<_>>());
    }
    Ok(TabularData::from_records(name, headers, records))
}

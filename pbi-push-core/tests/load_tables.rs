use std::fs::write;
use std::path::Path;
use tempfile::tempdir;

use pbi_push_core::load::load_tables;
use pbi_push_core::table::{CellValue, ColumnType};

#[test]
fn missing_directory_yields_no_tables() {
    let tables = load_tables(Path::new("/definitely/not/a/data/dir"));
    assert!(
        tables.is_empty(),
        "A missing directory should load zero tables"
    );
}

#[test]
fn loads_each_csv_with_file_stem_as_table_name() {
    let dir = tempdir().unwrap();
    write(dir.path().join("Sales.csv"), "id,amount\n1,9.5\n2,3.25\n").unwrap();
    write(dir.path().join("notes.txt"), "not tabular at all").unwrap();

    let tables = load_tables(dir.path());
    assert_eq!(tables.len(), 1, "Only the .csv file should be loaded");
    assert_eq!(tables[0].name, "Sales");
    assert_eq!(tables[0].columns.len(), 2);
    assert_eq!(tables[0].rows.len(), 2);
}

#[test]
fn unparsable_file_is_skipped_and_siblings_still_load() {
    let dir = tempdir().unwrap();
    write(dir.path().join("Good.csv"), "a,b\n1,2\n").unwrap();
    // Ragged row: four fields under a two-column header.
    write(dir.path().join("Bad.csv"), "a,b\n1,2,3,4\n").unwrap();

    let tables = load_tables(dir.path());
    assert_eq!(
        tables.len(),
        1,
        "The bad file should be skipped, not abort the load"
    );
    assert_eq!(tables[0].name, "Good");
}

#[test]
fn column_types_are_inferred_over_the_whole_column() {
    let dir = tempdir().unwrap();
    write(
        dir.path().join("Mixed.csv"),
        "id,amount,active,ts,label\n\
         1,9.5,true,2024-03-01T10:00:00,alpha\n\
         2,,false,2024-03-02T11:30:00,beta\n",
    )
    .unwrap();

    let tables = load_tables(dir.path());
    assert_eq!(tables.len(), 1);
    let table = &tables[0];
    let types: Vec<ColumnType> = table.columns.iter().map(|c| c.column_type).collect();
    assert_eq!(
        types,
        vec![
            ColumnType::Int,
            ColumnType::Float,
            ColumnType::Bool,
            ColumnType::DateTime,
            ColumnType::Text,
        ]
    );
    assert_eq!(
        table.rows[1][1],
        CellValue::Null,
        "An empty field should load as an explicit null"
    );
}

#[test]
fn integers_mixed_with_floats_infer_as_float() {
    let dir = tempdir().unwrap();
    write(dir.path().join("Prices.csv"), "price\n1\n2.5\n").unwrap();

    let tables = load_tables(dir.path());
    assert_eq!(tables[0].columns[0].column_type, ColumnType::Float);
    assert_eq!(tables[0].rows[0][0], CellValue::Float(1.0));
}

#[test]
fn header_only_file_loads_as_text_columns_with_no_rows() {
    let dir = tempdir().unwrap();
    write(dir.path().join("Empty.csv"), "a,b\n").unwrap();

    let tables = load_tables(dir.path());
    assert_eq!(tables.len(), 1);
    assert!(tables[0].rows.is_empty());
    assert!(tables[0]
        .columns
        .iter()
        .all(|c| c.column_type == ColumnType::Text));
}

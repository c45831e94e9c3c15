//! In-memory tabular model: typed columns and rows parsed from one CSV file.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Number, Value};

/// One scalar cell. Empty CSV fields are `Null` regardless of column type.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /// JSON form used by the row-push payload. Datetimes become ISO-8601
    /// strings; nulls stay explicit JSON nulls, never an absent key.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(i) => Value::Number((*i).into()),
            // NaN and infinities have no JSON representation; send null.
            CellValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            CellValue::DateTime(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            CellValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// Coarse scalar type inferred over a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    DateTime,
    Text,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

/// One loaded CSV file: ordered typed columns and ordered rows. Not mutated
/// after construction; datetime stringification and null normalisation
/// happen in [`TabularData::rows_as_json`].
#[derive(Debug, Clone)]
pub struct TabularData {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<CellValue>>,
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A column's type is decided over all of its non-empty values, so a column
/// mixing `1` and `2.5` is Float and one mixing `1` and `x` is Text. An
/// all-empty column is Text.
fn infer_column_type(values: &[&str]) -> ColumnType {
    if values.is_empty() {
        return ColumnType::Text;
    }
    if values.iter().all(|v| v.parse::<i64>().is_ok()) {
        ColumnType::Int
    } else if values.iter().all(|v| v.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else if values.iter().all(|v| parse_bool(v).is_some()) {
        ColumnType::Bool
    } else if values.iter().all(|v| parse_datetime(v).is_some()) {
        ColumnType::DateTime
    } else {
        ColumnType::Text
    }
}

fn typed_cell(raw: &str, column_type: ColumnType) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    match column_type {
        ColumnType::Int => trimmed
            .parse::<i64>()
            .map(CellValue::Int)
            .unwrap_or_else(|_| CellValue::Text(trimmed.to_string())),
        ColumnType::Float => trimmed
            .parse::<f64>()
            .map(CellValue::Float)
            .unwrap_or_else(|_| CellValue::Text(trimmed.to_string())),
        ColumnType::Bool => parse_bool(trimmed)
            .map(CellValue::Bool)
            .unwrap_or_else(|| CellValue::Text(trimmed.to_string())),
        ColumnType::DateTime => parse_datetime(trimmed)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(trimmed.to_string())),
        ColumnType::Text => CellValue::Text(trimmed.to_string()),
    }
}

impl TabularData {
    /// Builds a table from raw string records, inferring one type per column.
    /// `records` must be rectangular (the CSV reader enforces this upstream).
    pub fn from_records(name: String, headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let values: Vec<&str> = records
                    .iter()
                    .filter_map(|record| record.get(idx))
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .collect();
                Column {
                    name: header.clone(),
                    column_type: infer_column_type(&values),
                }
            })
            .collect();

        let rows: Vec<Vec<CellValue>> = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| {
                        typed_cell(record.get(idx).map(String::as_str).unwrap_or(""), column.column_type)
                    })
                    .collect()
            })
            .collect();

        TabularData { name, columns, rows }
    }

    /// Serialises every row to a JSON object for the per-table push call,
    /// in row order, with column names as keys.
    pub fn rows_as_json(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for (column, cell) in self.columns.iter().zip(row) {
                    object.insert(column.name.clone(), cell.to_json());
                }
                Value::Object(object)
            })
            .collect()
    }
}

//! Remote table schema derivation.

use serde::Serialize;

use crate::table::{ColumnType, TabularData};

/// Coarse data types understood by the push dataset API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    String,
    Int64,
    Double,
    Boolean,
    DateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaColumn {
    pub name: String,
    #[serde(rename = "dataType")]
    pub data_type: DataType,
}

/// Wire description of one remote table: name plus ordered typed columns.
#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<SchemaColumn>,
}

/// Derives the remote schema for a loaded table. Pure: depends only on the
/// table's column names and inferred types, and preserves column order.
pub fn map_schema(table: &TabularData) -> TableSchema {
    TableSchema {
        name: table.name.clone(),
        columns: table
            .columns
            .iter()
            .map(|column| SchemaColumn {
                name: column.name.clone(),
                data_type: remote_type(column.column_type),
            })
            .collect(),
    }
}

fn remote_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Int => DataType::Int64,
        ColumnType::Float => DataType::Double,
        ColumnType::Bool => DataType::Boolean,
        ColumnType::DateTime => DataType::DateTime,
        ColumnType::Text => DataType::String,
    }
}

use pbi_push_core::schema::{map_schema, DataType};
use pbi_push_core::table::{Column, ColumnType, TabularData};

fn table(name: &str, columns: &[(&str, ColumnType)]) -> TabularData {
    TabularData {
        name: name.to_string(),
        columns: columns
            .iter()
            .map(|(col_name, column_type)| Column {
                name: col_name.to_string(),
                column_type: *column_type,
            })
            .collect(),
        rows: Vec::new(),
    }
}

#[test]
fn maps_each_column_in_order_to_remote_types() {
    let sales = table(
        "Sales",
        &[
            ("id", ColumnType::Int),
            ("amount", ColumnType::Float),
            ("ts", ColumnType::DateTime),
        ],
    );
    let customers = table(
        "Customers",
        &[("name", ColumnType::Text), ("active", ColumnType::Bool)],
    );

    let sales_schema = map_schema(&sales);
    assert_eq!(sales_schema.name, "Sales");
    let sales_columns: Vec<(&str, DataType)> = sales_schema
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.data_type))
        .collect();
    assert_eq!(
        sales_columns,
        vec![
            ("id", DataType::Int64),
            ("amount", DataType::Double),
            ("ts", DataType::DateTime),
        ]
    );

    let customers_schema = map_schema(&customers);
    let customer_columns: Vec<(&str, DataType)> = customers_schema
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.data_type))
        .collect();
    assert_eq!(
        customer_columns,
        vec![("name", DataType::String), ("active", DataType::Boolean)]
    );
}

#[test]
fn mapping_is_pure_and_idempotent() {
    let t = table("T", &[("a", ColumnType::Int), ("b", ColumnType::Text)]);
    let first = serde_json::to_value(map_schema(&t)).unwrap();
    let second = serde_json::to_value(map_schema(&t)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialises_with_wire_field_names() {
    let t = table("Numbers", &[("n", ColumnType::Int)]);
    let json = serde_json::to_value(map_schema(&t)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Numbers",
            "columns": [{"name": "n", "dataType": "Int64"}],
        })
    );
}

//! Shared helpers for the integration test suite.

use gantry::model::api::{ListDto, TableDto};
use gantry::server::model::principal::Principal;

/// A principal holding every permission.
pub fn admin() -> Principal {
    Principal::with_permissions("admin", &["*"])
}

/// Index of a named column in a rendered table.
///
/// # Panics
/// Panics if the column is not part of the rendered column set.
pub fn column_index(table: &TableDto, name: &str) -> usize {
    table
        .columns
        .iter()
        .position(|column| column.name == name)
        .unwrap_or_else(|| panic!("column {name:?} not rendered"))
}

/// Resolved cell value for one row and column of a list response.
///
/// # Panics
/// Panics if the row or column is missing.
pub fn cell_value(dto: &ListDto, row_id: i32, column: &str) -> serde_json::Value {
    let index = column_index(&dto.table, column);
    let row = dto
        .table
        .rows
        .iter()
        .find(|row| row.id == row_id)
        .unwrap_or_else(|| panic!("row {row_id} not rendered"));

    row.cells[index].value.clone()
}

/// Row ids of a list response in rendered order.
pub fn row_ids(dto: &ListDto) -> Vec<i32> {
    dto.table.rows.iter().map(|row| row.id).collect()
}

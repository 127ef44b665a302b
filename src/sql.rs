//! Statement text generation from a [`TableSchema`].

use crate::codec::serialize_field;
use crate::params::{Params, SqlQuery};
use crate::table::{Row, TableSchema};

/// `CREATE TABLE IF NOT EXISTS` for `schema`, columns in declaration order.
pub fn generate_create_table(schema: &TableSchema) -> String {
    let columns: Vec<String> = schema.columns.iter().map(|c| c.sql()).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        schema.name,
        columns.join(", ")
    )
}

/// Multi-row `INSERT` without a column list.
///
/// Every row contributes one placeholder per schema column, in schema order,
/// which is what the engine's positional binding expects. Returns `None` when
/// `rows` is empty.
pub fn generate_insert(schema: &TableSchema, rows: &[Row]) -> Option<SqlQuery> {
    if rows.is_empty() {
        return None;
    }

    let mut params = Params::new();
    let groups: Vec<String> = rows
        .iter()
        .map(|row| {
            let placeholders: Vec<String> = schema
                .columns
                .iter()
                .map(|column| params.bind(serialize_field(row, column)))
                .collect();
            format!("({})", placeholders.join(","))
        })
        .collect();

    let statement = format!("INSERT INTO {} VALUES {}", schema.name, groups.join(","));
    Some(SqlQuery::new(statement).with_params(params))
}

/// The `c1 = @x,c2 = @y` list following `SET`.
///
/// An empty `include_columns` means every column. Values are bound into
/// `params` so the caller can append a WHERE fragment to the same binder.
pub fn generate_update(
    schema: &TableSchema,
    row: &Row,
    include_columns: &[&str],
    params: &mut Params,
) -> String {
    let assignments: Vec<String> = schema
        .columns
        .iter()
        .filter(|column| include_columns.is_empty() || include_columns.contains(&column.name))
        .map(|column| {
            let placeholder = params.bind(serialize_field(row, column));
            format!("{} = {}", column.name, placeholder)
        })
        .collect();
    assignments.join(",")
}

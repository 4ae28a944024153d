//! DDL and DML text for an imported table.
//!
//! Identifiers are written as given. Header sanitization in
//! [`parse`](super::parse) and [`table_name_from_file_name`](super::table_name_from_file_name)
//! are the only safeguards, so callers passing their own names must make
//! sure they are valid SQL identifiers.

use crate::types::ColumnType;

/// Builds `CREATE TABLE IF NOT EXISTS <name> (<col> <TYPE>, ...);`.
///
/// Headers and types are zipped positionally.
///
/// # Examples
///
/// ```
/// use sqlpad::import::generate_create_table_sql;
/// use sqlpad::types::ColumnType;
///
/// let headers = vec!["a".to_string(), "b".to_string()];
/// let sql = generate_create_table_sql("t", &headers, &[ColumnType::Integer, ColumnType::Text]);
/// assert_eq!(sql, "CREATE TABLE IF NOT EXISTS t (a INTEGER, b TEXT);");
/// ```
pub fn generate_create_table_sql(
    table_name: &str,
    headers: &[String],
    types: &[ColumnType],
) -> String {
    let columns = headers
        .iter()
        .zip(types)
        .map(|(header, ty)| format!("{header} {ty}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!("CREATE TABLE IF NOT EXISTS {table_name} ({columns});")
}

/// Builds the parameterized insert template
/// `INSERT INTO <name> (<cols>) VALUES (?, ?, ...);`.
///
/// The template has one placeholder per header and is meant to be prepared
/// once and run once per row. Returns an empty string when `rows` is empty;
/// callers must check for it before preparing.
pub fn generate_insert_sql<R>(table_name: &str, headers: &[String], rows: &[R]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let placeholders = vec!["?"; headers.len()].join(", ");
    format!(
        "INSERT INTO {table_name} ({}) VALUES ({placeholders});",
        headers.join(", ")
    )
}

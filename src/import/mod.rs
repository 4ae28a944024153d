//! CSV-to-table translator.
//!
//! Raw comma-delimited text goes through three pure steps:
//!
//! 1. [`parse`] normalizes it into a [`DelimitedDocument`];
//! 2. [`infer_column_types`] picks a [`ColumnType`] per column;
//! 3. [`generate_create_table_sql`] and [`generate_insert_sql`] produce the
//!    DDL and the parameterized insert template.
//!
//! [`ImportPlan`] bundles the three so a host can hand the result straight
//! to a database engine.

pub mod delimited;
pub mod infer;
pub mod statements;

pub use delimited::{parse, sanitize_header, DelimitedDocument, DELIMITER};
pub use infer::{infer_column, infer_column_types};
pub use statements::{generate_create_table_sql, generate_insert_sql};

use serde::Serialize;

use crate::error::{Result, SqlpadError};
use crate::types::ColumnType;

/// What an import produced, as shown to the user after it completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub table: String,
    pub columns: usize,
    pub rows: usize,
}

/// Everything needed to load one delimited document into a table.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub table: String,
    pub document: DelimitedDocument,
    pub types: Vec<ColumnType>,
    pub create_sql: String,
    /// Empty when the document has no data rows.
    pub insert_sql: String,
}

impl ImportPlan {
    /// Parses `raw_text` and derives the statements for `table`.
    ///
    /// # Errors
    ///
    /// [`SqlpadError::InvalidTableName`] for an empty table name, and the
    /// errors of [`parse`].
    pub fn from_text(table: &str, raw_text: &str) -> Result<Self> {
        if table.is_empty() {
            return Err(SqlpadError::InvalidTableName(table.to_string()));
        }

        let document = parse(raw_text)?;
        let types = infer_column_types(&document);
        let create_sql = generate_create_table_sql(table, &document.headers, &types);
        let insert_sql = generate_insert_sql(table, &document.headers, &document.rows);

        Ok(ImportPlan {
            table: table.to_string(),
            document,
            types,
            create_sql,
            insert_sql,
        })
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            table: self.table.clone(),
            columns: self.document.column_count(),
            rows: self.document.row_count(),
        }
    }
}

/// Derives a table name from an uploaded file name.
///
/// The last extension is dropped, whitespace runs become `_`, and every
/// character outside `[A-Za-z0-9_]` is removed. The result may be empty.
///
/// # Examples
///
/// ```
/// use sqlpad::import::table_name_from_file_name;
///
/// assert_eq!(table_name_from_file_name("Corridas Uber 2024.csv"), "Corridas_Uber_2024");
/// assert_eq!(table_name_from_file_name("sales-q1.v2.csv"), "salesq1v2");
/// ```
pub fn table_name_from_file_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(dot) if !file_name[dot + 1..].contains('/') && dot + 1 < file_name.len() => {
            &file_name[..dot]
        }
        _ => file_name,
    };

    let mut name = String::with_capacity(stem.len());
    let mut in_space = false;
    for ch in stem.chars() {
        if ch.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_alphanumeric() || ch == '_' {
            name.push(ch);
        }
    }
    name
}

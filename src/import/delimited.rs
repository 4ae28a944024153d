//! Comma-delimited text to a header/row model.
//!
//! Splitting is purely positional on the delimiter: a comma inside a quoted
//! field still separates fields. Header fields are sanitized into
//! identifier-like names; data fields are only trimmed.

use tracing::debug;

use crate::error::{Result, SqlpadError};

/// The field separator for both the header and the data lines.
pub const DELIMITER: char = ',';

/// Parsed delimited text.
///
/// Every row holds exactly `headers.len()` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimitedDocument {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DelimitedDocument {
    /// Number of columns, taken from the header line.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows that survived parsing.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterates over the values of column `index`, one per row.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).map(String::as_str))
    }
}

/// Parses raw delimited text.
///
/// A leading byte-order mark is skipped. Lines are separated by `\n` or
/// `\r\n`, and lines that are blank after trimming are ignored. The first remaining line is the header; every later
/// line whose field count differs from the header's is dropped.
///
/// # Errors
///
/// - [`SqlpadError::EmptyInput`] if no non-blank line remains.
/// - [`SqlpadError::InvalidHeader`] if the header line yields no column
///   names.
///
/// # Examples
///
/// ```
/// use sqlpad::import::parse;
///
/// let doc = parse("name,age\nAlice,30\nBob,twenty\nbroken\n").unwrap();
/// assert_eq!(doc.headers, vec!["name", "age"]);
/// assert_eq!(doc.rows.len(), 2);
/// ```
pub fn parse(raw_text: &str) -> Result<DelimitedDocument> {
    let raw_text = raw_text.strip_prefix('\u{FEFF}').unwrap_or(raw_text);
    let mut lines = raw_text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(SqlpadError::EmptyInput)?;
    let headers: Vec<String> = header_line.split(DELIMITER).map(sanitize_header).collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(SqlpadError::InvalidHeader(format!(
            "no column names in {:?}",
            header_line.trim()
        )));
    }

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for (line_no, line) in lines.enumerate() {
        let fields: Vec<String> = line
            .split(DELIMITER)
            .map(|field| field.trim().to_string())
            .collect();

        if fields.len() != headers.len() {
            debug!(
                "dropping data line {}: {} fields, expected {}",
                line_no + 1,
                fields.len(),
                headers.len()
            );
            dropped += 1;
            continue;
        }
        rows.push(fields);
    }

    debug!(
        "parsed {} columns, {} rows ({} dropped)",
        headers.len(),
        rows.len(),
        dropped
    );

    Ok(DelimitedDocument { headers, rows })
}

/// Trims a header field, removes quote characters and collapses every
/// whitespace run into a single underscore.
pub fn sanitize_header(field: &str) -> String {
    let unquoted: String = field
        .trim()
        .chars()
        .filter(|&c| c != '"' && c != '\'')
        .collect();

    let mut name = String::with_capacity(unquoted.len());
    let mut in_space = false;
    for ch in unquoted.chars() {
        if ch.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(ch);
            in_space = false;
        }
    }
    name
}

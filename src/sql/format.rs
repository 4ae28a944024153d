//! Editor "format" action.

use sqlformat::{FormatOptions, Indent, QueryParams};

use super::lexer::{scan, SpanKind};

/// How [`format_sql`] rewrites its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatStyle {
    /// Return the text unchanged.
    #[default]
    Preserve,
    /// Start major clauses on their own line and separate statements with a
    /// blank line. Text inside strings and comments is left alone.
    ClauseBreaks,
    /// Full pretty-printing: uppercase keywords, one item per line indented
    /// by four spaces, a blank line between statements.
    Indented,
}

/// Clauses that start a new line under [`FormatStyle::ClauseBreaks`], with
/// phrase words joined by a single space.
const CLAUSE_KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
    "INSERT INTO",
    "VALUES",
    "UPDATE",
    "SET",
    "DELETE FROM",
    "CREATE TABLE",
    "ALTER TABLE",
    "DROP TABLE",
];

/// Formats `sql` according to `style`.
///
/// # Examples
///
/// ```
/// use sqlpad::sql::{format_sql, FormatStyle};
///
/// let sql = "select a from t where b = 'from x'; select 1";
/// assert_eq!(format_sql(sql, FormatStyle::Preserve), sql);
/// assert_eq!(
///     format_sql(sql, FormatStyle::ClauseBreaks),
///     "select a\nfrom t\nwhere b = 'from x';\n\nselect 1",
/// );
/// ```
pub fn format_sql(sql: &str, style: FormatStyle) -> String {
    match style {
        FormatStyle::Preserve => sql.to_string(),
        FormatStyle::ClauseBreaks => break_clauses(sql.trim()),
        FormatStyle::Indented => indent(sql),
    }
}

fn indent(sql: &str) -> String {
    let options = FormatOptions {
        indent: Indent::Spaces(4),
        uppercase: Some(true),
        lines_between_queries: 1,
        ..FormatOptions::default()
    };
    sqlformat::format(sql, &QueryParams::None, &options)
}

fn break_clauses(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 16);
    let mut after_terminator = false;

    for span in scan(sql) {
        let mut text = span.text(sql);
        if after_terminator {
            text = text.trim_start();
            if text.is_empty() {
                continue;
            }
            out.push_str("\n\n");
            after_terminator = false;
        }

        let starts_clause = matches!(span.kind, SpanKind::Keyword | SpanKind::KeywordPhrase)
            && is_clause(text);
        if starts_clause && !out.is_empty() {
            while out.ends_with(' ') || out.ends_with('\t') {
                out.pop();
            }
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }

        out.push_str(text);
        if span.kind == SpanKind::Punctuation && text == ";" {
            after_terminator = true;
        }
    }

    out
}

fn is_clause(keyword: &str) -> bool {
    let normalized = keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase();
    CLAUSE_KEYWORDS.contains(&normalized.as_str())
}

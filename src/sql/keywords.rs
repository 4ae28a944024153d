//! Reserved words and multi-word keyword phrases recognised by the
//! highlighter.
//!
//! Both tables are static data. Lookups are case-insensitive: callers pass
//! the uppercased word to [`is_keyword`].

/// Multi-word phrases, each given as its sequence of words.
///
/// Ordered by word count, longest first, so the first match at a position is
/// always the longest one (`LEFT OUTER JOIN` before `LEFT JOIN`,
/// `IS NOT NULL` before `IS NULL` and `NOT NULL`).
pub const KEYWORD_PHRASES: &[&[&str]] = &[
    // three words
    &["LEFT", "OUTER", "JOIN"],
    &["RIGHT", "OUTER", "JOIN"],
    &["FULL", "OUTER", "JOIN"],
    &["IF", "NOT", "EXISTS"],
    &["IS", "NOT", "NULL"],
    &["INSERT", "OR", "REPLACE"],
    &["INSERT", "OR", "IGNORE"],
    // two words
    &["LEFT", "JOIN"],
    &["RIGHT", "JOIN"],
    &["INNER", "JOIN"],
    &["FULL", "JOIN"],
    &["CROSS", "JOIN"],
    &["NATURAL", "JOIN"],
    &["GROUP", "BY"],
    &["ORDER", "BY"],
    &["PARTITION", "BY"],
    &["INSERT", "INTO"],
    &["DELETE", "FROM"],
    &["CREATE", "TABLE"],
    &["CREATE", "VIEW"],
    &["CREATE", "INDEX"],
    &["ALTER", "TABLE"],
    &["DROP", "TABLE"],
    &["DROP", "VIEW"],
    &["DROP", "INDEX"],
    &["PRIMARY", "KEY"],
    &["FOREIGN", "KEY"],
    &["IF", "EXISTS"],
    &["IS", "NULL"],
    &["NOT", "NULL"],
    &["NOT", "IN"],
    &["NOT", "LIKE"],
    &["NOT", "BETWEEN"],
    &["UNION", "ALL"],
];

/// Returns `true` if `upper` (an already uppercased word) is a reserved word.
pub fn is_keyword(upper: &str) -> bool {
    matches!(
        upper,
        "SELECT"
            | "FROM"
            | "WHERE"
            | "INSERT"
            | "UPDATE"
            | "DELETE"
            | "CREATE"
            | "ALTER"
            | "DROP"
            | "TABLE"
            | "DATABASE"
            | "VIEW"
            | "INTO"
            | "VALUES"
            | "SET"
            | "GROUP"
            | "BY"
            | "ORDER"
            | "HAVING"
            | "JOIN"
            | "LEFT"
            | "RIGHT"
            | "INNER"
            | "OUTER"
            | "FULL"
            | "CROSS"
            | "NATURAL"
            | "ON"
            | "USING"
            | "AS"
            | "AND"
            | "OR"
            | "NOT"
            | "NULL"
            | "IS"
            | "IN"
            | "BETWEEN"
            | "LIKE"
            | "GLOB"
            | "COUNT"
            | "SUM"
            | "AVG"
            | "MAX"
            | "MIN"
            | "DISTINCT"
            | "ALL"
            | "UNION"
            | "INTERSECT"
            | "EXCEPT"
            | "LIMIT"
            | "OFFSET"
            | "ASC"
            | "DESC"
            | "CASE"
            | "WHEN"
            | "THEN"
            | "ELSE"
            | "END"
            | "CAST"
            | "WITH"
            | "IF"
            | "EXISTS"
            | "PRIMARY"
            | "KEY"
            | "FOREIGN"
            | "REFERENCES"
            | "UNIQUE"
            | "CHECK"
            | "INDEX"
            | "CONSTRAINT"
            | "DEFAULT"
            | "AUTOINCREMENT"
            | "INTEGER"
            | "REAL"
            | "TEXT"
            | "BLOB"
            | "VARCHAR"
            | "DATE"
            | "DATETIME"
            | "BOOLEAN"
            | "FLOAT"
            | "DOUBLE"
            | "DECIMAL"
            | "NUMERIC"
            | "TRUE"
            | "FALSE"
            | "REPLACE"
            | "IGNORE"
            | "PARTITION"
            | "OVER"
            | "BEGIN"
            | "COMMIT"
            | "ROLLBACK"
            | "TRANSACTION"
            | "PRAGMA"
    )
}

//! Value types and the column type system for sqlpad.
//!
//! This module provides:
//! - [`ColumnType`]: The three column types the CSV importer can infer
//!   (`INTEGER`, `REAL`, `TEXT`).
//! - [`parse_numeric_literal`]: The numeric-literal grammar used to decide
//!   whether a CSV field is a number.
//! - [`Value`]: A single cell of a query result, corresponding to SQLite's
//!   five storage classes.

use std::fmt;

// ---------------------------------------------------------------------------
// ColumnType
// ---------------------------------------------------------------------------

/// The SQL type inferred for an imported column.
///
/// Inference only ever narrows in the order `Integer` -> `Real` -> `Text`,
/// and `Text` is the fallback for columns without any usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    /// Every non-empty value is a whole number.
    Integer,
    /// Every non-empty value is numeric, at least one is fractional.
    Real,
    /// Anything else, including columns where every value is empty.
    #[default]
    Text,
}

impl ColumnType {
    /// The type name as written in a `CREATE TABLE` column definition.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

// ---------------------------------------------------------------------------
// Numeric literals
// ---------------------------------------------------------------------------

/// Parses `text` as a numeric literal, returning its value.
///
/// The accepted grammar is the string-to-number conversion of ECMAScript,
/// which is what CSV values were historically checked against:
///
/// - surrounding whitespace is ignored, and an all-whitespace string is `0`;
/// - decimal literals with an optional sign, fraction and exponent, including
///   the `.5` and `5.` forms;
/// - `Infinity`, `+Infinity` and `-Infinity` (case-sensitive);
/// - unsigned `0x`, `0o` and `0b` integer literals.
///
/// Everything else is rejected: `NaN`, `inf`, thousands separators,
/// currency symbols, digit separators such as `1_000`.
///
/// # Examples
///
/// ```
/// use sqlpad::types::parse_numeric_literal;
///
/// assert_eq!(parse_numeric_literal("42"), Some(42.0));
/// assert_eq!(parse_numeric_literal(" -2.5e1 "), Some(-25.0));
/// assert_eq!(parse_numeric_literal("0x1F"), Some(31.0));
/// assert_eq!(parse_numeric_literal("1,000"), None);
/// assert_eq!(parse_numeric_literal("NaN"), None);
/// ```
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    let s = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if s.is_empty() {
        return Some(0.0);
    }

    if let Some(value) = parse_radix_literal(s) {
        return value;
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'+' => (1.0, &s[1..]),
        b'-' => (-1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }
    if !is_decimal_literal(unsigned.as_bytes()) {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Returns `true` if `value` is finite and has no fractional part.
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.trunc() == value
}

/// Handles the `0x` / `0o` / `0b` prefixes.
///
/// Returns `None` when `s` carries no such prefix, `Some(None)` when it does
/// but the digits are invalid.
fn parse_radix_literal(s: &str) -> Option<Option<f64>> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(None);
    }
    let mut value = 0.0f64;
    for ch in digits.chars() {
        match ch.to_digit(radix) {
            Some(d) => value = value * radix as f64 + d as f64,
            None => return Some(None),
        }
    }
    Some(Some(value))
}

/// Validates `digits [. digits?] | . digits` followed by an optional
/// exponent. The sign has already been stripped.
fn is_decimal_literal(bytes: &[u8]) -> bool {
    let mut pos = 0;
    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A dynamically-typed value read back from the database engine.
///
/// | Variant   | SQLite Storage Class | Rust Type    |
/// |-----------|---------------------|--------------|
/// | `Null`    | NULL                | none         |
/// | `Integer` | INTEGER             | `i64`        |
/// | `Real`    | REAL                | `f64`        |
/// | `Text`    | TEXT                | `String`     |
/// | `Blob`    | BLOB                | `Vec<u8>`    |
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The SQL NULL value.
    Null,
    /// A signed 64-bit integer.
    Integer(i64),
    /// An IEEE 754 64-bit floating-point number.
    Real(f64),
    /// A UTF-8 encoded text string.
    Text(String),
    /// A raw byte sequence.
    Blob(Vec<u8>),
}

impl Value {
    /// Returns `true` if this value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<rusqlite::types::ValueRef<'_>> for Value {
    fn from(value: rusqlite::types::ValueRef<'_>) -> Self {
        use rusqlite::types::ValueRef;

        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

impl fmt::Display for Value {
    /// Formats a value for human-readable CLI output.
    ///
    /// - NULL is displayed as `"NULL"`.
    /// - Whole REAL values keep one decimal place to stay distinguishable
    ///   from integers.
    /// - Text values are displayed without quotes.
    /// - Blob values are displayed as `X'...'` hexadecimal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => {
                if r.fract() == 0.0 && r.is_finite() {
                    write!(f, "{:.1}", r)
                } else {
                    write!(f, "{}", r)
                }
            }
            Value::Text(s) => write!(f, "{}", s),
            Value::Blob(b) => {
                write!(f, "X'")?;
                for byte in b {
                    write!(f, "{:02X}", byte)?;
                }
                write!(f, "'")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

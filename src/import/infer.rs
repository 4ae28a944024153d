//! Column type inference over untyped text.

use tracing::debug;

use super::delimited::DelimitedDocument;
use crate::types::{is_integral, parse_numeric_literal, ColumnType};

/// Infers one [`ColumnType`] per header of `doc`, positionally aligned.
///
/// Empty values are skipped. A column is [`ColumnType::Integer`] when every
/// remaining value is numeric and integral, [`ColumnType::Real`] when every
/// value is numeric but some are fractional, and [`ColumnType::Text`] as soon
/// as one value is not numeric (scanning of that column stops there). A
/// column with no non-empty value is `Text`.
///
/// # Examples
///
/// ```
/// use sqlpad::import::{infer_column_types, parse};
/// use sqlpad::types::ColumnType;
///
/// let doc = parse("id,score,name\n1,2.5,ana\n2,3,bo\n").unwrap();
/// assert_eq!(
///     infer_column_types(&doc),
///     vec![ColumnType::Integer, ColumnType::Real, ColumnType::Text],
/// );
/// ```
pub fn infer_column_types(doc: &DelimitedDocument) -> Vec<ColumnType> {
    let types: Vec<ColumnType> = (0..doc.column_count())
        .map(|index| infer_column(doc.column(index)))
        .collect();
    debug!("inferred column types {:?}", types);
    types
}

/// Infers the type of a single column from its values.
pub fn infer_column<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen_value = false;
    let mut integral = true;

    for value in values {
        if value.is_empty() {
            continue;
        }
        seen_value = true;
        match parse_numeric_literal(value) {
            None => return ColumnType::Text,
            Some(number) => {
                if !is_integral(number) {
                    integral = false;
                }
            }
        }
    }

    match (seen_value, integral) {
        (false, _) => ColumnType::Text,
        (true, true) => ColumnType::Integer,
        (true, false) => ColumnType::Real,
    }
}

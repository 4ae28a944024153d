//! SQL editor support for sqlpad.
//!
//! This module contains the keyword tables, a lossless span scanner, the
//! HTML highlighter built on top of it, and the editor's format action.

pub mod format;
pub mod highlight;
pub mod keywords;
pub mod lexer;

pub use format::{format_sql, FormatStyle};
pub use highlight::{escape_html, highlight, render};
pub use lexer::{scan, Lexer, Span, SpanKind};

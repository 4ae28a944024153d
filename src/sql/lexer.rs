//! Lossless SQL scanner for syntax highlighting.
//!
//! The [`Lexer`] walks the source once with a byte cursor and yields
//! [`Span`]s that cover every byte exactly once, in order. Unlike a parser
//! front-end it never fails: unterminated comments, strings and quoted
//! identifiers simply run to the end of the input.

use std::ops::Range;

use super::keywords::{is_keyword, KEYWORD_PHRASES};

/// Classification of a region of SQL source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// `-- ...` through the end of the line, or `/* ... */`.
    Comment,
    /// `'...'` or `"..."` with doubled-quote escapes.
    String,
    /// `` `...` ``.
    QuotedIdentifier,
    /// A multi-word phrase such as `LEFT OUTER JOIN`.
    KeywordPhrase,
    /// A single reserved word.
    Keyword,
    /// Digits with an optional fractional part.
    Number,
    /// An ASCII operator or punctuation character.
    Punctuation,
    /// Anything else: identifiers, whitespace, non-ASCII characters.
    Plain,
}

/// A classified byte range of the scanned source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub range: Range<usize>,
}

impl Span {
    /// The slice of `source` this span covers.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.range.clone()]
    }
}

/// Scans `source` into spans, merging adjacent [`SpanKind::Plain`] runs.
///
/// Concatenating the text of the returned spans reproduces `source`.
///
/// # Examples
///
/// ```
/// use sqlpad::sql::{scan, SpanKind};
///
/// let source = "select a LEFT  JOIN b";
/// let kinds: Vec<SpanKind> = scan(source).into_iter().map(|s| s.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![SpanKind::Keyword, SpanKind::Plain, SpanKind::KeywordPhrase, SpanKind::Plain],
/// );
/// ```
pub fn scan(source: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for span in Lexer::new(source) {
        match spans.last_mut() {
            Some(last) if last.kind == SpanKind::Plain && span.kind == SpanKind::Plain => {
                last.range.end = span.range.end;
            }
            _ => spans.push(span),
        }
    }
    spans
}

fn is_word_byte(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

/// A single-pass span scanner.
///
/// Classification at each position is attempted in priority order: line
/// comment, block comment, string literal, backtick identifier, keyword
/// phrase, number, word, and finally a single character.
pub struct Lexer<'a> {
    source: &'a str,
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over the given SQL text.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            input: source.as_bytes(),
            pos: 0,
        }
    }

    // -- helpers ------------------------------------------------------------

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn emit(&mut self, kind: SpanKind, start: usize) -> Span {
        Span {
            kind,
            range: start..self.pos,
        }
    }

    fn preceded_by_word(&self) -> bool {
        self.pos > 0 && is_word_byte(self.input[self.pos - 1])
    }

    // -- main scanner -------------------------------------------------------

    fn next_span(&mut self) -> Option<Span> {
        let start = self.pos;
        let ch = self.peek()?;

        // ----- line comment, newline included -----
        if ch == b'-' && self.peek_at(1) == Some(b'-') {
            self.read_line_comment();
            return Some(self.emit(SpanKind::Comment, start));
        }

        // ----- block comment -----
        if ch == b'/' && self.peek_at(1) == Some(b'*') {
            self.read_block_comment();
            return Some(self.emit(SpanKind::Comment, start));
        }

        // ----- string literal -----
        if ch == b'\'' || ch == b'"' {
            self.read_quoted(ch);
            return Some(self.emit(SpanKind::String, start));
        }

        // ----- backtick identifier -----
        if ch == b'`' {
            self.read_backtick_identifier();
            return Some(self.emit(SpanKind::QuotedIdentifier, start));
        }

        if ch.is_ascii_alphabetic() && !self.preceded_by_word() {
            if let Some(end) = self.match_phrase() {
                self.pos = end;
                return Some(self.emit(SpanKind::KeywordPhrase, start));
            }
        }

        if ch.is_ascii_digit() && self.read_number() {
            return Some(self.emit(SpanKind::Number, start));
        }

        if is_word_byte(ch) {
            return Some(self.read_word());
        }

        // ----- any other single character -----
        let kind = if ch.is_ascii_punctuation() {
            SpanKind::Punctuation
        } else {
            SpanKind::Plain
        };
        let width = self.source[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += width;
        Some(self.emit(kind, start))
    }

    // -- region readers -----------------------------------------------------

    fn read_line_comment(&mut self) {
        self.pos += 2;
        while let Some(ch) = self.peek() {
            self.pos += 1;
            if ch == b'\n' {
                break;
            }
        }
    }

    fn read_block_comment(&mut self) {
        self.pos += 2;
        loop {
            match self.peek() {
                None => break,
                Some(b'*') if self.peek_at(1) == Some(b'/') => {
                    self.pos += 2;
                    break;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Consumes a `quote`-delimited run; a doubled quote is an escape.
    fn read_quoted(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(ch) = self.peek() {
            self.pos += 1;
            if ch == quote {
                if self.peek() == Some(quote) {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
    }

    fn read_backtick_identifier(&mut self) {
        self.pos += 1;
        while let Some(ch) = self.peek() {
            self.pos += 1;
            if ch == b'`' {
                break;
            }
        }
    }

    /// Returns the end of the first phrase matching at the cursor.
    fn match_phrase(&self) -> Option<usize> {
        KEYWORD_PHRASES
            .iter()
            .find_map(|phrase| self.phrase_end(phrase))
    }

    fn phrase_end(&self, words: &[&str]) -> Option<usize> {
        let mut pos = self.pos;
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                // Any Unicode whitespace, including `\x0B` and no-break space.
                let gap: usize = self.source[pos..]
                    .chars()
                    .take_while(|c| c.is_whitespace())
                    .map(char::len_utf8)
                    .sum();
                if gap == 0 {
                    return None;
                }
                pos += gap;
            }
            let candidate = self.input.get(pos..pos + word.len())?;
            if !candidate.eq_ignore_ascii_case(word.as_bytes()) {
                return None;
            }
            pos += word.len();
        }
        match self.input.get(pos) {
            Some(&next) if is_word_byte(next) => None,
            _ => Some(pos),
        }
    }

    /// Consumes `digits [. digits]` if the run is not followed by a word
    /// character. Leaves the cursor untouched otherwise.
    fn read_number(&mut self) -> bool {
        let digits = |input: &[u8], from: usize| {
            input[from..].iter().take_while(|b| b.is_ascii_digit()).count()
        };

        let mut end = self.pos + digits(self.input, self.pos);
        if self.input.get(end) == Some(&b'.') {
            let fraction = digits(self.input, end + 1);
            if fraction > 0 {
                end += 1 + fraction;
            }
        }
        match self.input.get(end) {
            Some(&next) if is_word_byte(next) => false,
            _ => {
                self.pos = end;
                true
            }
        }
    }

    fn read_word(&mut self) -> Span {
        let start = self.pos;
        while self.peek().map_or(false, is_word_byte) {
            self.pos += 1;
        }
        let upper = self.source[start..self.pos].to_ascii_uppercase();
        let kind = if is_keyword(&upper) {
            SpanKind::Keyword
        } else {
            SpanKind::Plain
        };
        self.emit(kind, start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        self.next_span()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

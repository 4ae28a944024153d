//! HTML rendering of scanned SQL.
//!
//! The output is meant for the inner HTML of a read-only preview element, so
//! only `&`, `<` and `>` are escaped. Every classified span is wrapped in a
//! `<span class="sql-...">`; plain text is emitted bare.

use super::lexer::{scan, Span, SpanKind};

impl SpanKind {
    /// CSS class used for this kind, or `None` for unwrapped text.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            SpanKind::Comment => Some("sql-comment"),
            SpanKind::String => Some("sql-string"),
            SpanKind::QuotedIdentifier => Some("sql-identifier"),
            SpanKind::KeywordPhrase | SpanKind::Keyword => Some("sql-keyword"),
            SpanKind::Number => Some("sql-number"),
            SpanKind::Punctuation => Some("sql-punctuation"),
            SpanKind::Plain => None,
        }
    }
}

/// Renders `source` as span-annotated HTML.
///
/// Stripping the tags and unescaping the result gives back `source` exactly.
///
/// # Examples
///
/// ```
/// use sqlpad::sql::highlight;
///
/// assert_eq!(
///     highlight("SELECT a<1"),
///     "<span class=\"sql-keyword\">SELECT</span> a\
///      <span class=\"sql-punctuation\">&lt;</span>\
///      <span class=\"sql-number\">1</span>",
/// );
/// assert_eq!(highlight(""), "");
/// ```
pub fn highlight(source: &str) -> String {
    render(source, &scan(source))
}

/// Renders already scanned `spans` of `source`.
pub fn render(source: &str, spans: &[Span]) -> String {
    let mut html = String::with_capacity(source.len() + spans.len() * 32);
    for span in spans {
        let text = span.text(source);
        match span.kind.css_class() {
            Some(class) => {
                html.push_str("<span class=\"");
                html.push_str(class);
                html.push_str("\">");
                escape_html_into(text, &mut html);
                html.push_str("</span>");
            }
            None => escape_html_into(text, &mut html),
        }
    }
    html
}

/// Escapes `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html_into(text, &mut out);
    out
}

fn escape_html_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Removes the markup added by [`highlight`] and reverses the escaping.
    fn strip(html: &str) -> String {
        let mut text = String::new();
        let mut rest = html;
        while let Some(open) = rest.find('<') {
            text.push_str(&rest[..open]);
            let close = rest[open..].find('>').expect("unclosed tag") + open;
            rest = &rest[close + 1..];
        }
        text.push_str(rest);
        text.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn escaping() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_html("\"quoted\" 'x'"), "\"quoted\" 'x'");
    }

    #[test]
    fn reconstructs_input() {
        for input in [
            "",
            "SELECT * FROM t WHERE a <> 'x&y' -- <b>\n",
            "/* unterminated <",
            "&amp; is not decoded twice",
            "a LEFT\n OUTER   JOIN b ON a.id=b.id;",
            "`weird <col>` \"str\"\"ing\"",
            "José → 3.5",
        ] {
            assert_eq!(strip(&highlight(input)), input);
        }
    }

    #[test]
    fn phrase_is_a_single_keyword_span() {
        let html = highlight("a LEFT OUTER JOIN b");
        assert_eq!(
            html,
            "a <span class=\"sql-keyword\">LEFT OUTER JOIN</span> b"
        );
    }

    #[test]
    fn comment_contents_are_not_keywords() {
        let html = highlight("SELECT 1 -- SELECT FROM");
        assert_eq!(count(&html, "sql-keyword"), 1);
        assert!(html.ends_with("<span class=\"sql-comment\">-- SELECT FROM</span>"));
    }

    #[test]
    fn string_contents_are_not_keywords_or_numbers() {
        let html = highlight("SELECT 'FROM 42'");
        assert_eq!(count(&html, "sql-keyword"), 1);
        assert_eq!(count(&html, "sql-number"), 0);
        assert!(html.contains("<span class=\"sql-string\">'FROM 42'</span>"));
    }

    #[test]
    fn original_casing_is_kept() {
        let html = highlight("select");
        assert_eq!(html, "<span class=\"sql-keyword\">select</span>");
    }

    #[test]
    fn escaped_markup_inside_spans() {
        let html = highlight("'<script>'");
        assert_eq!(html, "<span class=\"sql-string\">'&lt;script&gt;'</span>");
    }
}

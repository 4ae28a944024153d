//! Property tests for the SQL scanner and highlighter.
//!
//! Whatever the input, the spans must tile it exactly and the rendered HTML
//! must give the input back once the markup is removed.

use sqlpad::sql::keywords::{is_keyword, KEYWORD_PHRASES};
use sqlpad::sql::{highlight, scan, SpanKind};

use proptest::prelude::*;

/// Removes `<span ...>` / `</span>` tags and undoes the three entity escapes.
fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            let close = rest.find('>').expect("unclosed tag");
            rest = &rest[close + 1..];
            continue;
        }
        let (decoded, len) = if rest.starts_with("&lt;") {
            ('<', 4)
        } else if rest.starts_with("&gt;") {
            ('>', 4)
        } else if rest.starts_with("&amp;") {
            ('&', 5)
        } else {
            (ch, ch.len_utf8())
        };
        out.push(decoded);
        rest = &rest[len..];
    }
    out
}

/// Lowercase identifiers that are not keywords.
fn arb_ident() -> BoxedStrategy<String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,6}")
        .expect("valid regex")
        .prop_filter("must not be keyword", |s| !is_keyword(&s.to_ascii_uppercase()))
        .boxed()
}

/// A keyword phrase spelled with random case and random whitespace gaps.
fn arb_phrase() -> BoxedStrategy<String> {
    (
        0..KEYWORD_PHRASES.len(),
        prop::collection::vec(prop::string::string_regex("[ \t\n]{1,3}").expect("valid regex"), 2),
        any::<bool>(),
    )
        .prop_map(|(index, gaps, lower)| {
            let words = KEYWORD_PHRASES[index];
            let mut phrase = String::new();
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    phrase.push_str(&gaps[i - 1]);
                }
                if lower {
                    phrase.push_str(&word.to_ascii_lowercase());
                } else {
                    phrase.push_str(word);
                }
            }
            phrase
        })
        .boxed()
}

/// Text that mixes SQL fragments with arbitrary characters.
fn arb_sqlish() -> BoxedStrategy<String> {
    let fragment = prop_oneof![
        Just("SELECT ".to_string()),
        Just("left  join ".to_string()),
        Just("-- note\n".to_string()),
        Just("/* block ".to_string()),
        Just("*/".to_string()),
        Just("'str".to_string()),
        Just("`".to_string()),
        Just("<&>".to_string()),
        Just("3.14".to_string()),
        "\\PC{0,8}",
    ];
    prop::collection::vec(fragment, 0..12)
        .prop_map(|parts| parts.concat())
        .boxed()
}

proptest! {
    #[test]
    fn spans_tile_the_input(source in arb_sqlish()) {
        let spans = scan(&source);
        let mut pos = 0;
        for span in &spans {
            prop_assert_eq!(span.range.start, pos);
            prop_assert!(span.range.end > span.range.start);
            pos = span.range.end;
        }
        prop_assert_eq!(pos, source.len());
    }

    #[test]
    fn highlight_is_lossless(source in arb_sqlish()) {
        prop_assert_eq!(strip_markup(&highlight(&source)), source);
    }

    #[test]
    fn arbitrary_text_is_lossless(source in any::<String>()) {
        let rebuilt: String = scan(&source).iter().map(|s| s.text(&source)).collect();
        prop_assert_eq!(&rebuilt, &source);
        prop_assert_eq!(strip_markup(&highlight(&source)), source);
    }

    #[test]
    fn phrase_is_a_single_span(
        before in arb_ident(),
        phrase in arb_phrase(),
        after in arb_ident(),
    ) {
        let source = format!("{before} {phrase} {after}");
        let spans = scan(&source);
        let phrases: Vec<&str> = spans
            .iter()
            .filter(|s| s.kind == SpanKind::KeywordPhrase)
            .map(|s| s.text(&source))
            .collect();
        prop_assert_eq!(phrases, vec![phrase.as_str()]);
    }

    #[test]
    fn line_comment_swallows_keywords(body in "[^\n]{0,30}") {
        let source = format!("SELECT 1 --{body}\nFROM t");
        let comment = format!("--{body}\n");
        let spans = scan(&source);
        let comments: Vec<&str> = spans
            .iter()
            .filter(|s| s.kind == SpanKind::Comment)
            .map(|s| s.text(&source))
            .collect();
        prop_assert_eq!(comments, vec![comment.as_str()]);
        prop_assert!(spans
            .iter()
            .any(|s| s.kind == SpanKind::Keyword && s.text(&source) == "FROM"));
    }

    #[test]
    fn block_comment_swallows_keywords(body in "[a-zA-Z ;'\"\n]{0,30}") {
        let source = format!("SELECT /*{body}*/ 1");
        let comment = format!("/*{body}*/");
        let spans = scan(&source);
        let comments: Vec<&str> = spans
            .iter()
            .filter(|s| s.kind == SpanKind::Comment)
            .map(|s| s.text(&source))
            .collect();
        prop_assert_eq!(comments, vec![comment.as_str()]);
    }
}

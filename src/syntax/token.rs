//! Per-line tokenizer for INI syntax classification.
//!
//! Each line is classified independently: the tokens produced for a line
//! depend only on that line's text, so any sub-range of a document can be
//! tokenized without cross-line state. Classification matches against the
//! trimmed line text while reported offsets stay relative to the untrimmed
//! line start, matching the editor convention of tagging whole lines.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::LineIndex;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    Comment,
    Section,
    Key,
    StringValue,
    NumberValue,
}

/// A typed span of text within one line, in absolute document coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub length: usize,
}

impl Token {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.length
    }
}

/// Section header: opens with `[`, closes with `]`, non-empty content that
/// does not end in `;` before the closing bracket.
pub(crate) static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.+[^;]|[^;])\]").unwrap());

/// Key/value separator; only the first match on a line counts.
static SEPARATOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*=\s*").unwrap());

/// Comment marker. The match begins at the whitespace run immediately
/// preceding the first `;`, if any.
static COMMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*;").unwrap());

/// Values in decimal (optionally signed, optionally fractional) or hex form.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d+(\.\d+)?|0[xX][0-9a-fA-F]+)$").unwrap());

/// Tokenize one line of text.
///
/// `text` is the raw line content without its trailing line break;
/// `line_start` is the absolute byte offset of the line. Returns tokens in
/// position order. Never fails: malformed input degrades to a single
/// [`TokenKind::Text`] token, and a line whose trimmed text is empty yields
/// no tokens at all.
pub fn tokenize_line(text: &str, line_start: usize) -> Vec<Token> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let line_len = text.len();

    let section = SECTION_PATTERN.find(trimmed);
    let separator = SEPARATOR_PATTERN.find(trimmed);
    // On a section header the comment search starts after the closing
    // bracket, so a `;` inside the brackets cannot double as a comment.
    let comment = match section {
        Some(s) => COMMENT_PATTERN.find_at(trimmed, s.end()),
        None => COMMENT_PATTERN.find(trimmed),
    };

    let mut tokens = Vec::new();

    if let Some(m) = comment {
        tokens.push(Token {
            kind: TokenKind::Comment,
            start: line_start + m.start(),
            length: line_len - m.start(),
        });

        // A comment with nothing but plain content in front of it is
        // terminal for the line: no key/value parsing, even when an `=`
        // appears after the `;`. Section headers still get their token.
        let separator_before_comment = separator.is_some_and(|s| s.start() < m.start());
        if section.is_none() && !separator_before_comment {
            return tokens;
        }
    }

    if let Some(m) = section {
        tokens.push(Token {
            kind: TokenKind::Section,
            start: line_start,
            length: m.end(),
        });
        tokens.sort_by_key(|t| t.start);
        return tokens;
    }

    if let Some(sep) = separator {
        tokens.push(Token {
            kind: TokenKind::Key,
            start: line_start,
            length: sep.start(),
        });

        let value_start = sep.end();
        let value_end = match comment {
            Some(c) if c.start() > sep.start() => c.start(),
            _ => line_len,
        };
        let value_text = text.get(value_start..value_end).unwrap_or("");
        let kind = if NUMBER_PATTERN.is_match(value_text) {
            TokenKind::NumberValue
        } else {
            TokenKind::StringValue
        };
        tokens.push(Token {
            kind,
            start: line_start + value_start,
            length: value_end.saturating_sub(value_start),
        });
        tokens.sort_by_key(|t| t.start);
        return tokens;
    }

    tokens.push(Token {
        kind: TokenKind::Text,
        start: line_start,
        length: line_len,
    });
    tokens
}

/// Tokenize every line that intersects the requested byte range and keep the
/// tokens touching it. Zero-length tokens at a range boundary count as
/// intersecting.
pub fn tokens_in_range(index: &LineIndex, range: Range<usize>) -> Vec<Token> {
    let mut tokens = Vec::new();
    for line in index.lines() {
        if line.start > range.end {
            break;
        }
        if line.start + line.text.len() < range.start {
            continue;
        }
        for token in tokenize_line(line.text, line.start) {
            let end = token.start + token.length;
            if token.start <= range.end && end >= range.start {
                tokens.push(token);
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn token_text<'a>(source: &'a str, token: &Token) -> &'a str {
        &source[token.range()]
    }

    #[test]
    fn empty_line_yields_no_tokens() {
        assert!(tokenize_line("", 0).is_empty());
        assert!(tokenize_line("   \t ", 0).is_empty());
    }

    #[test]
    fn section_header_yields_single_section_token() {
        for line in ["[general]", "[A]"] {
            let tokens = tokenize_line(line, 0);
            assert_eq!(tokens.len(), 1, "line {line:?}");
            assert_eq!(tokens[0].kind, TokenKind::Section);
            assert_eq!(token_text(line, &tokens[0]), line);
        }
    }

    #[test]
    fn section_ending_in_semicolon_is_not_a_section() {
        let tokens = tokenize_line("[general;]", 0);
        // The `;` starts a comment; the bracketed text no longer matches the
        // section pattern, so the comment ends the line.
        assert_eq!(kinds(&tokens), vec![TokenKind::Comment]);
    }

    #[test]
    fn semicolon_inside_brackets_still_matches_section() {
        let line = "[a;b]";
        let tokens = tokenize_line(line, 0);
        assert_eq!(kinds(&tokens), vec![TokenKind::Section]);
        assert_eq!(token_text(line, &tokens[0]), "[a;b]");
    }

    #[test]
    fn section_header_with_trailing_comment() {
        let line = "[paths] ; machine local";
        let tokens = tokenize_line(line, 0);
        assert_eq!(kinds(&tokens), vec![TokenKind::Section, TokenKind::Comment]);
        assert_eq!(token_text(line, &tokens[0]), "[paths]");
        assert_eq!(token_text(line, &tokens[1]), " ; machine local");
    }

    #[test]
    fn key_value_splits_on_first_separator() {
        let line = "path=a=b";
        let tokens = tokenize_line(line, 0);
        assert_eq!(kinds(&tokens), vec![TokenKind::Key, TokenKind::StringValue]);
        assert_eq!(token_text(line, &tokens[0]), "path");
        assert_eq!(token_text(line, &tokens[1]), "a=b");
    }

    #[test]
    fn numeric_values_are_classified() {
        for value in ["42", "-17", "3.14", "0xFF", "0Xdead"] {
            let line = format!("n={value}");
            let tokens = tokenize_line(&line, 0);
            assert_eq!(tokens[1].kind, TokenKind::NumberValue, "value {value:?}");
        }
        for value in ["4 2", "1.2.3", "0x", "abc", "--1"] {
            let line = format!("n={value}");
            let tokens = tokenize_line(&line, 0);
            assert_eq!(tokens[1].kind, TokenKind::StringValue, "value {value:?}");
        }
    }

    #[test]
    fn empty_value_yields_zero_length_token() {
        let tokens = tokenize_line("key=", 0);
        assert_eq!(kinds(&tokens), vec![TokenKind::Key, TokenKind::StringValue]);
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[1].length, 0);
    }

    #[test]
    fn value_stops_at_trailing_comment() {
        let line = "key = 3.14 ; pi";
        let tokens = tokenize_line(line, 0);
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Key, TokenKind::NumberValue, TokenKind::Comment]
        );
        assert_eq!(token_text(line, &tokens[0]), "key");
        assert_eq!(token_text(line, &tokens[1]), "3.14");
        assert_eq!(token_text(line, &tokens[2]), " ; pi");
    }

    #[test]
    fn comment_directly_after_value() {
        let line = "name=John; greeting";
        let tokens = tokenize_line(line, 0);
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Key, TokenKind::StringValue, TokenKind::Comment]
        );
        assert_eq!(token_text(line, &tokens[1]), "John");
        assert_eq!(token_text(line, &tokens[2]), "; greeting");
    }

    #[test]
    fn comment_before_separator_suppresses_key_value() {
        let line = "note ; max=10";
        let tokens = tokenize_line(line, 0);
        assert_eq!(kinds(&tokens), vec![TokenKind::Comment]);
        assert_eq!(token_text(line, &tokens[0]), " ; max=10");
    }

    #[test]
    fn comment_only_line() {
        let line = "; just a note";
        let tokens = tokenize_line(line, 0);
        assert_eq!(kinds(&tokens), vec![TokenKind::Comment]);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].length, line.len());
    }

    #[test]
    fn plain_line_falls_back_to_text() {
        let line = "no structure here";
        let tokens = tokenize_line(line, 0);
        assert_eq!(kinds(&tokens), vec![TokenKind::Text]);
        assert_eq!(tokens[0].length, line.len());
    }

    #[test]
    fn tokens_never_overlap() {
        for line in [
            "[s]",
            "k=v",
            "k=v ; c",
            "; c",
            "plain",
            "[a;b]",
            "x ; y=1",
            "k= ;c",
        ] {
            let tokens = tokenize_line(line, 0);
            for pair in tokens.windows(2) {
                if pair[0].length == 0 || pair[1].length == 0 {
                    continue;
                }
                assert!(
                    pair[0].start + pair[0].length <= pair[1].start,
                    "overlap in {line:?}: {tokens:?}"
                );
            }
        }
    }

    #[test]
    fn tokenizing_twice_is_identical() {
        let line = "timeout = 30 ; seconds";
        assert_eq!(tokenize_line(line, 17), tokenize_line(line, 17));
    }

    #[test]
    fn absolute_offsets_follow_line_start() {
        let tokens = tokenize_line("a=1", 100);
        assert_eq!(tokens[0].start, 100);
        assert_eq!(tokens[1].start, 102);
    }

    #[test]
    fn range_request_filters_tokens() {
        let source = "[a]\nx=1\ny=2\n";
        let index = LineIndex::new(source.to_string());

        // Only the middle line.
        let tokens = tokens_in_range(&index, 4..7);
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Key, TokenKind::NumberValue]
        );
        assert_eq!(tokens[0].start, 4);

        // Whole document.
        let all = tokens_in_range(&index, 0..source.len());
        assert_eq!(all.len(), 5);
    }
}

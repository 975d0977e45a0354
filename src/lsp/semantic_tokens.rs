//! Semantic tokens for INI syntax highlighting.

use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType, SemanticTokensLegend};

use crate::document::LineIndex;
use crate::syntax::token::{tokenize_line, Token, TokenKind};

/// Token type indices (must match LEGEND order).
pub mod token_types {
    pub const TEXT: u32 = 0;
    pub const COMMENT: u32 = 1;
    pub const SECTION: u32 = 2;
    pub const KEY: u32 = 3;
    pub const STRING_VALUE: u32 = 4;
    pub const NUMBER_VALUE: u32 = 5;
}

/// Get the semantic tokens legend for capability declaration.
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: vec![
            SemanticTokenType::new("text"),
            SemanticTokenType::COMMENT,
            SemanticTokenType::NAMESPACE,
            SemanticTokenType::PROPERTY,
            SemanticTokenType::STRING,
            SemanticTokenType::NUMBER,
        ],
        token_modifiers: vec![],
    }
}

fn token_type_index(kind: TokenKind) -> u32 {
    match kind {
        TokenKind::Text => token_types::TEXT,
        TokenKind::Comment => token_types::COMMENT,
        TokenKind::Section => token_types::SECTION,
        TokenKind::Key => token_types::KEY,
        TokenKind::StringValue => token_types::STRING_VALUE,
        TokenKind::NumberValue => token_types::NUMBER_VALUE,
    }
}

/// Display metadata for a token category.
///
/// This mirrors the classification format definitions an editor registers
/// for INI documents: a stable identifier, a human readable name, and the
/// default foreground color. It is static configuration, not computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCategory {
    pub id: &'static str,
    pub name: &'static str,
    /// Default foreground as `#RRGGBB`; `None` inherits the editor default.
    pub foreground: Option<&'static str>,
}

/// Map a token kind to its display category.
pub fn display_category(kind: TokenKind) -> DisplayCategory {
    match kind {
        TokenKind::Text => DisplayCategory {
            id: "plain-text",
            name: "Ini Text",
            foreground: None,
        },
        TokenKind::Comment => DisplayCategory {
            id: "comment",
            name: "Ini Comment",
            foreground: Some("#808080"),
        },
        TokenKind::Section => DisplayCategory {
            id: "section",
            name: "Ini Section",
            foreground: Some("#8A2BE2"),
        },
        TokenKind::Key => DisplayCategory {
            id: "key",
            name: "Ini Key",
            foreground: Some("#00008B"),
        },
        TokenKind::StringValue => DisplayCategory {
            id: "string-value",
            name: "Ini String Value",
            foreground: Some("#006400"),
        },
        TokenKind::NumberValue => DisplayCategory {
            id: "number-value",
            name: "Ini Number Value",
            foreground: Some("#8B0000"),
        },
    }
}

/// Generate semantic tokens for a whole snapshot.
///
/// Tokenizes every line and converts the result to the delta-encoded format.
pub fn tokens_full(line_index: &LineIndex) -> Vec<SemanticToken> {
    let mut raw: Vec<Token> = Vec::new();
    for line in line_index.lines() {
        raw.extend(tokenize_line(line.text, line.start));
    }
    raw.sort_by_key(|t| t.start);
    encode_tokens(&raw, line_index)
}

/// Convert position-sorted raw tokens to delta-encoded semantic tokens.
fn encode_tokens(tokens: &[Token], line_index: &LineIndex) -> Vec<SemanticToken> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tokens {
        let pos = line_index.offset_to_position(token.start);
        let delta_line = pos.line - prev_line;
        let delta_start = if delta_line == 0 {
            pos.character - prev_start
        } else {
            pos.character
        };

        result.push(SemanticToken {
            delta_line,
            delta_start,
            length: token.length as u32,
            token_type: token_type_index(token.kind),
            token_modifiers_bitset: 0,
        });

        prev_line = pos.line;
        prev_start = pos.character;
    }

    result
}

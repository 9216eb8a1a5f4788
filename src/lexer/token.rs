//! Tokens and their attached trivia.

use smol_str::SmolStr;
use text_size::TextRange;

use super::token_kind::TokenKind;
use crate::base::Position;

/// Index of a token in its [`TokenStream`](super::TokenStream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub u32);

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a trivia piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    /// `// ...`
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `/** ... */`
    DocComment,
    /// `/// ...` on Java 23 and later
    DocLineComment,
}

impl TriviaKind {
    pub fn is_comment(self) -> bool {
        self != TriviaKind::Whitespace
    }

    pub fn is_doc(self) -> bool {
        matches!(self, TriviaKind::DocComment | TriviaKind::DocLineComment)
    }
}

/// Non-significant text preceding a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    pub(crate) kind: TriviaKind,
    pub(crate) text: SmolStr,
    pub(crate) range: TextRange,
    pub(crate) start: Position,
}

impl Trivia {
    pub fn kind(&self) -> TriviaKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn start(&self) -> Position {
        self.start
    }
}

/// A significant token. Immutable once the stream is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) text: SmolStr,
    pub(crate) range: TextRange,
    pub(crate) start: Position,
    pub(crate) end: Position,
    pub(crate) leading_trivia: Vec<Trivia>,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Position of the first character.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Position just past the last character; accounts for line breaks
    /// inside text blocks.
    pub fn end(&self) -> Position {
        self.end
    }

    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.leading_trivia
    }

    /// Attached comments, whitespace excluded.
    pub fn comments(&self) -> impl Iterator<Item = &Trivia> {
        self.leading_trivia.iter().filter(|t| t.kind.is_comment())
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }

    /// Text as it appears in the source, leading trivia included.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        self.write_full_text(&mut out);
        out
    }

    pub(crate) fn write_full_text(&self, out: &mut String) {
        for trivia in &self.leading_trivia {
            out.push_str(&trivia.text);
        }
        out.push_str(&self.text);
    }
}

//! The indexable token stream consumed by the tree converter.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use tracing::trace;

use super::lexer::Lexer;
use super::token::{Token, TokenId, Trivia, TriviaKind};
use super::token_kind::TokenKind;
use crate::base::{LineIndex, Position};
use crate::config::ParserOptions;
use crate::error::LexError;

/// Ordered significant tokens of one file, ending with an EOF token that
/// carries the trailing trivia.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    line_index: LineIndex,
}

impl TokenStream {
    /// Re-lex `source` under the language level of `options`.
    pub fn build(source: &str, options: &ParserOptions) -> Result<Self, LexError> {
        let line_index = LineIndex::new(source);
        let mut tokens = Vec::new();
        let mut trivia = Vec::new();

        for lexed in Lexer::new(source) {
            let range = TextRange::at(lexed.offset, TextSize::of(lexed.text));
            let start = line_index.position(range.start());

            match lexed.kind {
                TokenKind::ERROR => {
                    return Err(LexError::new(start, error_message(lexed.text)));
                }
                TokenKind::TEXT_BLOCK if !options.version.supports_text_blocks() => {
                    return Err(LexError::new(
                        start,
                        format!(
                            "text blocks are not supported at language level {}",
                            options.version
                        ),
                    ));
                }
                kind if kind.is_trivia() => {
                    trivia.push(Trivia {
                        kind: trivia_kind(kind, lexed.text, options),
                        text: SmolStr::new(lexed.text),
                        range,
                        start,
                    });
                }
                kind => {
                    tokens.push(Token {
                        kind,
                        text: SmolStr::new(lexed.text),
                        range,
                        start,
                        end: line_index.position(range.end()),
                        leading_trivia: std::mem::take(&mut trivia),
                    });
                }
            }
        }

        let eof = TextSize::of(source);
        let eof_position = line_index.position(eof);
        tokens.push(Token {
            kind: TokenKind::EOF,
            text: SmolStr::default(),
            range: TextRange::empty(eof),
            start: eof_position,
            end: eof_position,
            leading_trivia: trivia,
        });

        trace!(tokens = tokens.len(), "token stream built");
        Ok(Self { tokens, line_index })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        (0..self.tokens.len() as u32).map(TokenId)
    }

    pub fn eof(&self) -> TokenId {
        TokenId(self.tokens.len() as u32 - 1)
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn position(&self, offset: TextSize) -> Position {
        self.line_index.position(offset)
    }

    // =========================================================================
    // OFFSET LOOKUPS
    // =========================================================================

    /// First token whose start is at or after `offset`.
    pub fn first_at_or_after(&self, offset: TextSize) -> TokenId {
        let index = self.tokens.partition_point(|t| t.range.start() < offset);
        TokenId(index.min(self.tokens.len() - 1) as u32)
    }

    /// Token that starts exactly at `offset`.
    pub fn token_starting_at(&self, offset: TextSize) -> Option<TokenId> {
        let index = self.tokens.partition_point(|t| t.range.start() < offset);
        self.tokens
            .get(index)
            .filter(|t| t.range.start() == offset && !t.is_eof())
            .map(|_| TokenId(index as u32))
    }

    /// Last token that ends at or before `offset`.
    pub fn last_ending_at_or_before(&self, offset: TextSize) -> Option<TokenId> {
        let index = self.tokens.partition_point(|t| t.range.end() <= offset && !t.is_eof());
        index.checked_sub(1).map(|i| TokenId(i as u32))
    }

    /// Token whose range strictly contains `offset` (not at its start).
    fn containing(&self, offset: TextSize) -> Option<usize> {
        let index = self.tokens.partition_point(|t| t.range.start() < offset);
        let candidate = index.checked_sub(1)?;
        let token = &self.tokens[candidate];
        (token.range.start() < offset && offset < token.range.end()).then_some(candidate)
    }

    // =========================================================================
    // CONTEXTUAL REWRITES
    // =========================================================================

    /// Split a merged `>>`-style token at `offset` so that a generic closing
    /// `>` becomes its own token. Returns false when no compound token spans
    /// `offset`. Ids of tokens after the split shift by one.
    pub fn split_at(&mut self, offset: TextSize) -> bool {
        let Some(index) = self.containing(offset) else {
            return false;
        };
        let token = &self.tokens[index];
        if !token.kind.is_compound_greater() && token.kind != TokenKind::GT_EQ {
            return false;
        }

        let cut = usize::from(offset - token.range.start());
        let (head, tail) = token.text.split_at(cut);
        let (Some(head_kind), Some(tail_kind)) =
            (TokenKind::from_operator(head), TokenKind::from_operator(tail))
        else {
            return false;
        };

        let head_range = TextRange::new(token.range.start(), offset);
        let tail_range = TextRange::new(offset, token.range.end());
        let tail_token = Token {
            kind: tail_kind,
            text: SmolStr::new(tail),
            range: tail_range,
            start: self.line_index.position(offset),
            end: token.end,
            leading_trivia: Vec::new(),
        };
        let head_token = Token {
            kind: head_kind,
            text: SmolStr::new(head),
            range: head_range,
            start: token.start,
            end: self.line_index.position(offset),
            leading_trivia: token.leading_trivia.clone(),
        };

        trace!(offset = u32::from(offset), "split compound token");
        self.tokens[index] = head_token;
        self.tokens.insert(index + 1, tail_token);
        true
    }

    /// Merge the adjacent tokens covering `range` into one token of `kind`,
    /// as for the `non-sealed` modifier. Fails when the range does not start
    /// and end on token boundaries or when trivia separates the pieces.
    pub fn merge(&mut self, range: TextRange, kind: TokenKind) -> bool {
        let Some(first) = self.token_starting_at(range.start()) else {
            return false;
        };
        let mut last = first.index();
        while self.tokens[last].range.end() < range.end() {
            last += 1;
            if last >= self.tokens.len() - 1 || !self.tokens[last].leading_trivia.is_empty() {
                return false;
            }
        }
        if self.tokens[last].range.end() != range.end() {
            return false;
        }
        if last == first.index() {
            return true;
        }

        let text: String = self.tokens[first.index()..=last]
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        let end = self.tokens[last].end;
        let merged = Token {
            kind,
            text: SmolStr::new(text),
            range,
            start: self.tokens[first.index()].start,
            end,
            leading_trivia: std::mem::take(&mut self.tokens[first.index()].leading_trivia),
        };
        self.tokens
            .splice(first.index()..=last, std::iter::once(merged));
        true
    }

    /// The source text, rebuilt from tokens and trivia.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            token.write_full_text(&mut out);
        }
        out
    }
}

fn trivia_kind(kind: TokenKind, text: &str, options: &ParserOptions) -> TriviaKind {
    match kind {
        TokenKind::LINE_COMMENT
            if text.starts_with("///") && options.version.supports_markdown_doc_comments() =>
        {
            TriviaKind::DocLineComment
        }
        TokenKind::LINE_COMMENT => TriviaKind::LineComment,
        TokenKind::BLOCK_COMMENT if text.starts_with("/**") && text != "/**/" => {
            TriviaKind::DocComment
        }
        TokenKind::BLOCK_COMMENT => TriviaKind::BlockComment,
        _ => TriviaKind::Whitespace,
    }
}

fn error_message(text: &str) -> String {
    if text.starts_with("/*") {
        "unterminated comment".to_string()
    } else if text.starts_with("\"\"\"") {
        "unterminated text block".to_string()
    } else if text.starts_with('"') {
        "unterminated string literal".to_string()
    } else if text.starts_with('\'') {
        "unterminated character literal".to_string()
    } else {
        format!("illegal character '{}'", text.escape_debug())
    }
}

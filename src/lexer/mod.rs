//! Token Stream Builder
//!
//! Re-lexes Java source independently of the external frontend, whose raw
//! tree does not expose token-accurate boundaries: nested generic closings
//! arrive as merged shift operators, and multi-line literals span lines that
//! offset arithmetic alone does not reveal.
//!
//! - [`lexer`] - logos automaton producing raw tokens, trivia included
//! - [`TokenStream`] - significant tokens with leading trivia attached
//! - [`TokenKind`] - the closed set of token kinds

#[allow(clippy::module_inception)]
mod lexer;
mod stream;
mod token;
mod token_kind;

pub use lexer::{LexedToken, Lexer, tokenize};
pub use stream::TokenStream;
pub use token::{Token, TokenId, Trivia, TriviaKind};
pub use token_kind::TokenKind;

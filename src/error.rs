//! Error types.
//!
//! Only [`ConvertError`] crosses the per-file boundary: a conversion either
//! yields a complete tree or exactly one of these.

use thiserror::Error;

use crate::base::Position;
use crate::syntax::{NodeId, TreeKind};

/// A fault while re-lexing the source text. Fatal for the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct LexError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl LexError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            line: position.line,
            column: position.column,
            message: message.into(),
        }
    }
}

/// Structural faults of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Child enumeration was requested on a token leaf.
    #[error("{kind:?} node {node:?} is a leaf and has no children")]
    LeafNode { node: NodeId, kind: TreeKind },

    /// A node was attached under two parents.
    #[error("node {node:?} appears under more than one parent")]
    SharedNode { node: NodeId },

    /// A node was built but is not reachable from the root.
    #[error("node {node:?} is not reachable from the root")]
    Orphan { node: NodeId },

    /// A reserved node slot was never completed.
    #[error("reserved node {node:?} was never completed")]
    Incomplete { node: NodeId },
}

/// Failure of the external parser/resolver itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error("frontend failed on {file}: {reason}")]
    Failed { file: String, reason: String },

    #[error("batch aborted: {0}")]
    BatchAborted(String),
}

/// The fatal, per-file result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("lexing failed at {0}")]
    Lex(#[from] LexError),

    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: u32,
        column: u32,
        message: String,
    },

    /// The raw tree does not line up with the re-lexed tokens.
    #[error("raw tree does not match the source at offset {offset}: {message}")]
    Malformed { offset: u32, message: String },

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Frontend(#[from] FrontendError),
}

impl ConvertError {
    pub fn malformed(offset: u32, message: impl Into<String>) -> Self {
        ConvertError::Malformed {
            offset,
            message: message.into(),
        }
    }

    /// Line and column for errors that carry a source location.
    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            ConvertError::Lex(e) => Some((e.line, e.column)),
            ConvertError::Syntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Internal fault while deriving annotation metadata. Never escapes the
/// metadata boundary; it is downgraded to empty metadata there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum MetadataError {
    #[error("binding {0} is not an annotation")]
    NotAnnotation(u32),

    #[error("binding {0} does not exist")]
    Dangling(u32),

    #[error("annotation values nested deeper than {0} levels")]
    TooDeep(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported Java version: {0}")]
    InvalidVersion(String),
}

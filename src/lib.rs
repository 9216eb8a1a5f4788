//! # javelin-base
//!
//! Concrete syntax trees and a semantic model for Java, built on top of an
//! external compiler frontend's bound tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! batch       → Multi-file conversion, shared frontend, parallel mode
//!   ↓
//! semantic    → Types, symbols, index, nullability, constant folding
//!   ↓
//! convert     → Raw bound tree + tokens → CST
//!   ↓
//! syntax      → CST nodes, tree arena, equivalence
//!   ↓
//! lexer       → Logos lexer, token stream with trivia
//!   ↓
//! frontend    → Raw tree, raw bindings, JavaFrontend trait
//!   ↓
//! base        → Primitives (Position, Span, LineIndex, Modifiers, Constant)
//! ```

use std::sync::Arc;

// ============================================================================
// MODULES (dependency order: base → frontend → lexer → syntax → convert → semantic)
// ============================================================================

/// Foundation types: positions, line index, modifier flags, constants
pub mod base;

/// Options and nullability annotation tables
pub mod config;

/// Error types for every fallible layer
pub mod error;

/// Boundary to the external parser and binding resolver
pub mod frontend;

/// Token stream builder
pub mod lexer;

/// CST node model
pub mod syntax;

/// Non-fatal problems carried alongside a tree
pub mod diagnostics;

/// Tree converter
pub mod convert;

/// Symbol and type model, declaration/usage index
pub mod semantic;

/// Batch and parallel conversion
pub mod batch;

pub use base::{Constant, LineIndex, Modifiers, Position, Span, TextRange, TextSize};
pub use config::{AnalysisConfig, JavaVersion, NullabilityConfig, ParserOptions};
pub use diagnostics::Advisory;
pub use error::ConvertError;
pub use frontend::{JavaFrontend, RawParse, SourceUnit};
pub use semantic::{SemanticContext, Symbol, Type};
pub use syntax::{Node, NodeId, SyntaxTree, TreeKind};

/// One converted file: its tree, index and bindings inside the semantic
/// context, plus the advisories the frontend reported.
#[derive(Debug)]
pub struct JavaFile {
    pub semantic: SemanticContext,
    pub advisories: Vec<Advisory>,
}

impl JavaFile {
    pub fn tree(&self) -> &SyntaxTree {
        self.semantic.tree()
    }

    pub fn root(&self) -> Node<'_> {
        self.semantic.root()
    }
}

/// Convert an already parsed file and wrap it in a semantic context.
pub fn analyze(source: &str, parse: RawParse, config: &AnalysisConfig) -> Result<JavaFile, ConvertError> {
    let convert::Converted {
        tree,
        index,
        bindings,
        advisories,
    } = convert::convert(source, parse, &config.parser)?;
    let semantic = SemanticContext::new(tree, bindings, index, Arc::clone(&config.nullability));
    Ok(JavaFile {
        semantic,
        advisories,
    })
}

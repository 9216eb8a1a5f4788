//! Boundary to the external Java compiler frontend.
//!
//! The frontend parses and resolves a file with binding recovery enabled
//! and hands back a raw bound tree, its bindings and its problem list.
//! Nothing here parses Java or reads the classpath; entries in
//! [`ParserOptions::classpath`] are passed through untouched.

mod binding;
mod tree;

use std::sync::Arc;

use text_size::TextRange;

use crate::config::ParserOptions;
use crate::error::FrontendError;

pub use binding::{
    BindingId, BindingTable, RawAnnotationBinding, RawAnnotationValue, RawBinding,
    RawMethodBinding, RawPackageBinding, RawTypeBinding, RawTypeKind, RawVariableBinding,
};
pub use tree::*;

/// One source file submitted for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: String,
    pub text: Arc<str>,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Category of a problem reported by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// Fatal for the file.
    Syntax,
    UndefinedType,
    PreviewFeatureUsed,
    UnusedImport,
    UnnecessaryCast,
    MaskedCatch,
    AssignmentHasNoEffect,
    /// Anything else; carried by its raw problem id and ignored.
    Other(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProblem {
    pub kind: ProblemKind,
    pub message: String,
    pub span: TextRange,
}

impl RawProblem {
    pub fn new(kind: ProblemKind, message: impl Into<String>, span: TextRange) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }
}

/// Everything the frontend reports for one file.
#[derive(Debug, Clone)]
pub struct RawParse {
    pub unit: RawCompilationUnit,
    pub bindings: BindingTable,
    pub problems: Vec<RawProblem>,
}

/// An external parser and binding resolver.
pub trait JavaFrontend {
    /// Parse and resolve one file.
    fn parse(&self, unit: &SourceUnit, options: &ParserOptions)
    -> Result<RawParse, FrontendError>;

    /// Parse many files through one shared parser instance, handing each
    /// result to `sink` with the unit's index as soon as it is ready.
    ///
    /// An `Err` aborts the remainder of the batch; units whose callback has
    /// not fired by then are retried one by one by the caller.
    fn parse_batch(
        &self,
        units: &[SourceUnit],
        options: &ParserOptions,
        sink: &mut dyn FnMut(usize, Result<RawParse, FrontendError>),
    ) -> Result<(), FrontendError> {
        for (index, unit) in units.iter().enumerate() {
            sink(index, self.parse(unit, options));
        }
        Ok(())
    }
}

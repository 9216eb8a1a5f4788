//! Advisories: non-fatal compiler diagnostics attached to a converted file.
//!
//! The frontend's problem list is split in two: syntax problems abort the
//! conversion, and the categories below are kept as advisories tied to a
//! source range. Everything else is dropped.

use std::sync::Arc;

use text_size::TextRange;

use crate::base::{LineIndex, Position};
use crate::frontend::{ProblemKind, RawProblem};

// ============================================================================
// ADVISORY TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdvisoryKind {
    UnresolvedType,
    PreviewFeatureUsed,
    UnusedImport,
    RedundantCast,
    MaskedCatch,
    AssignmentHasNoEffect,
}

impl AdvisoryKind {
    /// Advisory category of a frontend problem, if it is kept.
    pub fn from_problem(kind: ProblemKind) -> Option<Self> {
        match kind {
            ProblemKind::UndefinedType => Some(AdvisoryKind::UnresolvedType),
            ProblemKind::PreviewFeatureUsed => Some(AdvisoryKind::PreviewFeatureUsed),
            ProblemKind::UnusedImport => Some(AdvisoryKind::UnusedImport),
            ProblemKind::UnnecessaryCast => Some(AdvisoryKind::RedundantCast),
            ProblemKind::MaskedCatch => Some(AdvisoryKind::MaskedCatch),
            ProblemKind::AssignmentHasNoEffect => Some(AdvisoryKind::AssignmentHasNoEffect),
            ProblemKind::Syntax | ProblemKind::Other(_) => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            AdvisoryKind::UnresolvedType => codes::UNRESOLVED_TYPE,
            AdvisoryKind::PreviewFeatureUsed => codes::PREVIEW_FEATURE,
            AdvisoryKind::UnusedImport => codes::UNUSED_IMPORT,
            AdvisoryKind::RedundantCast => codes::REDUNDANT_CAST,
            AdvisoryKind::MaskedCatch => codes::MASKED_CATCH,
            AdvisoryKind::AssignmentHasNoEffect => codes::NO_EFFECT_ASSIGNMENT,
        }
    }
}

/// A diagnostic with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: Arc<str>,
    pub range: TextRange,
    pub start: Position,
    pub end: Position,
}

impl Advisory {
    pub fn new(kind: AdvisoryKind, message: impl Into<Arc<str>>, range: TextRange, lines: &LineIndex) -> Self {
        Self {
            kind,
            message: message.into(),
            range,
            start: lines.position(range.start()),
            end: lines.position(range.end()),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

// ============================================================================
// ADVISORY CODES
// ============================================================================

/// Stable codes for advisories.
pub mod codes {
    /// Type could not be resolved on the classpath.
    pub const UNRESOLVED_TYPE: &str = "A0001";
    /// Preview language feature used.
    pub const PREVIEW_FEATURE: &str = "A0002";
    /// Import never used.
    pub const UNUSED_IMPORT: &str = "A0003";
    /// Cast to a type the expression already has.
    pub const REDUNDANT_CAST: &str = "A0004";
    /// Catch clause unreachable because an earlier clause catches a supertype.
    pub const MASKED_CATCH: &str = "A0005";
    /// Assignment of a variable to itself.
    pub const NO_EFFECT_ASSIGNMENT: &str = "A0006";
}

// ============================================================================
// ADVISORY COLLECTOR
// ============================================================================

/// Collects advisories from frontend problems.
#[derive(Clone, Debug, Default)]
pub struct AdvisoryCollector {
    advisories: Vec<Advisory>,
}

impl AdvisoryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }

    /// Keep `problem` if its category is advisory; returns whether it was kept.
    pub fn add_problem(&mut self, problem: &RawProblem, lines: &LineIndex) -> bool {
        match AdvisoryKind::from_problem(problem.kind) {
            Some(kind) => {
                self.add(Advisory::new(kind, problem.message.as_str(), problem.span, lines));
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.advisories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }

    /// Advisories sorted by position.
    pub fn finish(mut self) -> Vec<Advisory> {
        self.advisories
            .sort_by_key(|a| (a.range.start(), a.range.end()));
        self.advisories
    }
}

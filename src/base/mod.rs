//! Foundation types for the javelin toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`Position`], [`Span`] - Line/column positions for tokens and diagnostics
//! - [`LineIndex`] - Offset to line/column conversion
//! - [`Modifiers`] - Declaration modifier flags shared by raw bindings and symbols
//! - [`Constant`] - Compile-time constant values
//!
//! This module has NO dependencies on other javelin modules.

mod constant;
mod line_index;
mod modifiers;
mod position;

pub use constant::Constant;
pub use line_index::LineIndex;
pub use modifiers::Modifiers;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};

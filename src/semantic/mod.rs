//! # Semantic Model
//!
//! Types, symbols and their derived facts over one converted file.
//!
//! ```text
//! Converted { tree, index, bindings }
//!        │
//!        ▼
//! SemanticContext ──type_of()────▶ Type<'_>   (structural equality, hierarchy)
//!        │        ──symbol_of()──▶ Symbol<'_> (owner, members, overrides,
//!        │                                     metadata, nullability)
//!        └─────────constant_value()──▶ Constant
//! ```
//!
//! Every view is a `Copy` handle into arenas held by the context, and every
//! derived value is computed once and cached there.

mod annotations;
mod constant;
mod context;
pub mod equivalence;
mod index;
mod nullability;
mod overrides;
mod symbols;
mod types;

pub use annotations::{AnnotationInstance, AnnotationMetadata, AnnotationValue};
pub use context::SemanticContext;
pub use equivalence::semantically_equivalent;
pub use index::{DeclarationIndex, IndexKey};
pub use nullability::{NullabilityData, NullabilityLevel};
pub use symbols::{Symbol, SymbolId, SymbolKind};
pub use types::{Type, TypeId, TypeKind};

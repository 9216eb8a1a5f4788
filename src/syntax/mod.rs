//! CST Node Model
//!
//! The uniform node abstraction every Java construct specializes: a kind
//! tag, ordered children, a navigational parent link and, for leaves, one
//! token. Nodes live in a flat arena owned by [`SyntaxTree`].
//!
//! ```text
//! TreeBuilder --finish()--> SyntaxTree --node()--> Node<'t>
//!    (bottom-up, no parents)   (parents linked)     (borrowed view)
//! ```

pub mod equivalence;
mod kind;
mod node;
mod tree;

pub use equivalence::{are_all_equivalent, are_equivalent, are_equivalent_with};
pub use kind::TreeKind;
pub use node::{Descendants, Node};
pub use tree::{NodeId, SyntaxTree, TreeBuilder};

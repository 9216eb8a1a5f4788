//! Declaration/Usage Index
//!
//! Maps a normalized binding to the node that declares it and to every
//! node referring to it, in source order. Filled by the tree converter,
//! read-only afterwards.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::frontend::BindingId;
use crate::syntax::NodeId;

/// Key of an index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// A binding already normalized to its declaration.
    Binding(BindingId),
    /// A statement label, keyed by its labeled statement.
    Label(NodeId),
}

#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    declarations: FxHashMap<IndexKey, NodeId>,
    usages: FxHashMap<IndexKey, Vec<NodeId>>,
    references: FxHashMap<NodeId, IndexKey>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the declaring node. The first declaration wins.
    pub fn declare(&mut self, key: IndexKey, node: NodeId) {
        trace!(?key, ?node, "declaration");
        self.declarations.entry(key).or_insert(node);
    }

    /// Append a reference. Callers visit references in source order.
    pub fn add_usage(&mut self, key: IndexKey, node: NodeId) {
        trace!(?key, ?node, "usage");
        self.usages.entry(key).or_default().push(node);
        self.references.insert(node, key);
    }

    pub fn declaration(&self, key: IndexKey) -> Option<NodeId> {
        self.declarations.get(&key).copied()
    }

    pub fn usages(&self, key: IndexKey) -> &[NodeId] {
        self.usages.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The entry a usage node refers to.
    pub fn reference_of(&self, node: NodeId) -> Option<IndexKey> {
        self.references.get(&node).copied()
    }

    /// Entries with a declaration, in no particular order.
    pub fn declared_keys(&self) -> impl Iterator<Item = IndexKey> + '_ {
        self.declarations.keys().copied()
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }
}

//! Node views over the tree arena.

use std::fmt;

use text_size::TextRange;

use super::kind::TreeKind;
use super::tree::{NodeId, SyntaxTree};
use crate::error::TreeError;
use crate::frontend::BindingId;
use crate::lexer::Token;

/// A borrowed view of one node. Cheap to copy.
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    pub(crate) fn new(tree: &'t SyntaxTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn tree(self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn kind(self) -> TreeKind {
        self.tree.data(self.id).kind
    }

    pub fn is(self, kind: TreeKind) -> bool {
        self.kind() == kind
    }

    pub fn is_any(self, kinds: &[TreeKind]) -> bool {
        kinds.contains(&self.kind())
    }

    pub fn is_leaf(self) -> bool {
        self.tree.data(self.id).token.is_some()
    }

    /// The token of a leaf.
    pub fn token(self) -> Option<&'t Token> {
        self.tree
            .data(self.id)
            .token
            .map(|token| self.tree.token(token))
    }

    /// Ordered children. Leaves have none and reject the request.
    pub fn children(self) -> Result<impl DoubleEndedIterator<Item = Node<'t>> + 't, TreeError> {
        if self.is_leaf() {
            return Err(TreeError::LeafNode {
                node: self.id,
                kind: self.kind(),
            });
        }
        Ok(self.child_nodes())
    }

    /// Children without the leaf check; empty for leaves.
    pub(crate) fn child_nodes(self) -> impl DoubleEndedIterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| Node::new(tree, id))
    }

    pub fn child(self, index: usize) -> Option<Node<'t>> {
        self.tree
            .data(self.id)
            .children
            .get(index)
            .map(|&id| Node::new(self.tree, id))
    }

    pub fn child_count(self) -> usize {
        self.tree.data(self.id).children.len()
    }

    /// First child of `kind`.
    pub fn child_of_kind(self, kind: TreeKind) -> Option<Node<'t>> {
        self.child_nodes().find(|c| c.is(kind))
    }

    pub fn parent(self) -> Option<Node<'t>> {
        self.tree
            .data(self.id)
            .parent
            .map(|id| Node::new(self.tree, id))
    }

    /// Proper ancestors, innermost first.
    pub fn ancestors(self) -> impl Iterator<Item = Node<'t>> {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    /// Innermost ancestor of one of `kinds`.
    pub fn enclosing(self, kinds: &[TreeKind]) -> Option<Node<'t>> {
        self.ancestors().find(|a| a.is_any(kinds))
    }

    /// This node and everything below it, in pre-order.
    pub fn descendants(self) -> Descendants<'t> {
        Descendants {
            tree: self.tree,
            stack: vec![self.id],
        }
    }

    /// First token in forward order, `None` for token-less nodes.
    pub fn first_token(self) -> Option<&'t Token> {
        if let Some(token) = self.token() {
            return Some(token);
        }
        self.child_nodes().find_map(|c| c.first_token())
    }

    /// Last token in reverse order, `None` for token-less nodes.
    pub fn last_token(self) -> Option<&'t Token> {
        if let Some(token) = self.token() {
            return Some(token);
        }
        self.child_nodes().rev().find_map(|c| c.last_token())
    }

    /// Range from the first to the last token, trivia excluded.
    pub fn text_range(self) -> Option<TextRange> {
        let first = self.first_token()?;
        let last = self.last_token()?;
        Some(first.range().cover(last.range()))
    }

    /// Source text of the node: inner trivia kept, leading trivia of the
    /// first token dropped.
    pub fn text(self) -> String {
        let mut out = String::new();
        let mut first = true;
        for node in self.descendants() {
            if let Some(token) = node.token() {
                if first {
                    out.push_str(token.text());
                    first = false;
                } else {
                    token.write_full_text(&mut out);
                }
            }
        }
        out
    }

    pub fn binding(self) -> Option<BindingId> {
        self.tree.data(self.id).binding
    }

    pub fn type_binding(self) -> Option<BindingId> {
        self.tree.data(self.id).type_binding
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token() {
            Some(token) => write!(f, "{:?}@{} {:?}", self.kind(), self.id.0, token.text()),
            None => write!(f, "{:?}@{}", self.kind(), self.id.0),
        }
    }
}

/// Pre-order traversal, see [`Node::descendants`].
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.data(id).children.iter().rev().copied());
        Some(Node::new(self.tree, id))
    }
}

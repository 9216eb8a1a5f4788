//! Arena storage for the CST and its two-phase construction.
//!
//! Nodes are built bottom-up into a flat arena; a child never knows its
//! parent while the tree is under construction. [`TreeBuilder::finish`] then
//! performs one full traversal from the root to assign parent indices.
//! Parent links are navigational only: the arena owns every node.

use tracing::trace;

use super::kind::TreeKind;
use super::node::Node;
use crate::error::TreeError;
use crate::frontend::BindingId;
use crate::lexer::{Token, TokenId, TokenStream};

/// Index of a node in its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: TreeKind,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) token: Option<TokenId>,
    /// Binding of the declared or referenced entity.
    pub(crate) binding: Option<BindingId>,
    /// Binding of the expression's or type's type.
    pub(crate) type_binding: Option<BindingId>,
}

impl NodeData {
    fn new(kind: TreeKind, children: Vec<NodeId>) -> Self {
        Self {
            kind,
            children,
            parent: None,
            token: None,
            binding: None,
            type_binding: None,
        }
    }
}

/// A complete, parent-linked concrete syntax tree.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    tokens: TokenStream,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> Node<'_> {
        Node::new(self, self.root)
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node::new(self, id)
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn token(&self, id: TokenId) -> &Token {
        self.tokens.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        (0..self.nodes.len() as u32).map(move |i| Node::new(self, NodeId(i)))
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Concatenate every leaf token with its trivia in tree order.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        for node in self.root().descendants() {
            if let Some(token) = node.token() {
                token.write_full_text(&mut out);
            }
        }
        out
    }
}

/// Bottom-up builder for a [`SyntaxTree`].
#[derive(Debug)]
pub struct TreeBuilder {
    tokens: TokenStream,
    /// `None` marks a reserved slot that is not yet completed.
    nodes: Vec<Option<NodeData>>,
}

impl TreeBuilder {
    pub fn new(tokens: TokenStream) -> Self {
        Self {
            tokens,
            nodes: Vec::new(),
        }
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Token rewrites must not touch tokens that already have a leaf.
    pub fn tokens_mut(&mut self) -> &mut TokenStream {
        &mut self.tokens
    }

    fn push(&mut self, data: Option<NodeData>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }

    /// A leaf for one token.
    pub fn token(&mut self, token: TokenId) -> NodeId {
        let mut data = NodeData::new(TreeKind::TOKEN, Vec::new());
        data.token = Some(token);
        self.push(Some(data))
    }

    /// A composite node. `None` children are placeholders for absent
    /// optional parts and are dropped.
    pub fn node(
        &mut self,
        kind: TreeKind,
        children: impl IntoIterator<Item = Option<NodeId>>,
    ) -> NodeId {
        let children = children.into_iter().flatten().collect();
        self.push(Some(NodeData::new(kind, children)))
    }

    /// Reserve an id for a node whose children are built later, as for a
    /// labeled statement that its own `break` must reference.
    pub fn reserve(&mut self) -> NodeId {
        self.push(None)
    }

    pub fn complete(
        &mut self,
        id: NodeId,
        kind: TreeKind,
        children: impl IntoIterator<Item = Option<NodeId>>,
    ) {
        let children = children.into_iter().flatten().collect();
        self.nodes[id.index()] = Some(NodeData::new(kind, children));
    }

    pub fn kind(&self, id: NodeId) -> Option<TreeKind> {
        self.nodes[id.index()].as_ref().map(|d| d.kind)
    }

    pub fn set_binding(&mut self, id: NodeId, binding: Option<BindingId>) {
        if let Some(data) = self.nodes[id.index()].as_mut() {
            data.binding = binding;
        }
    }

    pub fn set_type_binding(&mut self, id: NodeId, binding: Option<BindingId>) {
        if let Some(data) = self.nodes[id.index()].as_mut() {
            data.type_binding = binding;
        }
    }

    /// Link parents in one traversal from `root` and freeze the tree.
    pub fn finish(self, root: NodeId) -> Result<SyntaxTree, TreeError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (index, slot) in self.nodes.into_iter().enumerate() {
            match slot {
                Some(data) => nodes.push(data),
                None => {
                    return Err(TreeError::Incomplete {
                        node: NodeId(index as u32),
                    });
                }
            }
        }

        let mut visited = vec![false; nodes.len()];
        let mut stack = vec![root];
        visited[root.index()] = true;
        while let Some(id) = stack.pop() {
            for i in 0..nodes[id.index()].children.len() {
                let child = nodes[id.index()].children[i];
                if visited[child.index()] {
                    return Err(TreeError::SharedNode { node: child });
                }
                visited[child.index()] = true;
                nodes[child.index()].parent = Some(id);
                stack.push(child);
            }
        }

        if let Some(orphan) = visited.iter().position(|v| !v) {
            return Err(TreeError::Orphan {
                node: NodeId(orphan as u32),
            });
        }

        trace!(nodes = nodes.len(), "tree parent-linked");
        Ok(SyntaxTree {
            tokens: self.tokens,
            nodes,
            root,
        })
    }
}

//! Structural equivalence of subtrees.
//!
//! Two subtrees are equivalent when they have the same shape, kind by kind,
//! and their leaves have the same text. Callers can substitute their own
//! verdict for chosen node pairs, e.g. semantic equality of identifiers.

use super::node::Node;

/// Kind-by-kind and leaf-text-by-leaf-text comparison. Trivia is ignored.
pub fn are_equivalent(left: Node<'_>, right: Node<'_>) -> bool {
    are_equivalent_with(left, right, &mut |_, _| None)
}

/// As [`are_equivalent`], consulting `overrides` on every node pair first.
/// `Some(verdict)` decides the pair without descending; `None` falls back
/// to the structural comparison.
pub fn are_equivalent_with<F>(left: Node<'_>, right: Node<'_>, overrides: &mut F) -> bool
where
    F: FnMut(Node<'_>, Node<'_>) -> Option<bool>,
{
    if let Some(verdict) = overrides(left, right) {
        return verdict;
    }
    if left.kind() != right.kind() {
        return false;
    }
    match (left.token(), right.token()) {
        (Some(l), Some(r)) => return l.text() == r.text(),
        (None, None) => {}
        _ => return false,
    }
    if left.child_count() != right.child_count() {
        return false;
    }
    left.child_nodes()
        .zip(right.child_nodes())
        .all(|(l, r)| are_equivalent_with(l, r, overrides))
}

/// Pairwise equivalence of two node lists.
pub fn are_all_equivalent<'a, 'b>(
    left: impl IntoIterator<Item = Node<'a>>,
    right: impl IntoIterator<Item = Node<'b>>,
) -> bool {
    let left: Vec<_> = left.into_iter().collect();
    let right: Vec<_> = right.into_iter().collect();
    left.len() == right.len()
        && left
            .into_iter()
            .zip(right)
            .all(|(l, r)| are_equivalent(l, r))
}

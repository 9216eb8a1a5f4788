//! Semantic equivalence of subtrees.
//!
//! Structural equivalence where identifiers must also resolve to the same
//! entity and calls must also resolve to methods with the same parameter
//! types.

use super::context::SemanticContext;
use crate::syntax::{Node, TreeKind, are_equivalent_with};

/// Whether two subtrees of `ctx`'s tree mean the same thing. Two
/// unresolved identifiers fall back to text comparison.
pub fn semantically_equivalent(ctx: &SemanticContext, left: Node<'_>, right: Node<'_>) -> bool {
    are_equivalent_with(left, right, &mut |l: Node<'_>, r: Node<'_>| {
        if l.kind() != r.kind() {
            return Some(false);
        }
        match l.kind() {
            TreeKind::IDENTIFIER => {
                let (ls, rs) = (ctx.symbol_of_node(l), ctx.symbol_of_node(r));
                if ls.is_unknown() && rs.is_unknown() {
                    return None;
                }
                Some(l.text() == r.text() && ls == rs)
            }
            TreeKind::METHOD_INVOCATION => {
                let (ls, rs) = (callee(ctx, l), callee(ctx, r));
                if ls.is_unknown() || rs.is_unknown() {
                    return None;
                }
                (ls.parameter_types() != rs.parameter_types()).then_some(false)
            }
            _ => None,
        }
    })
}

/// The method a call resolves to, through its callee name.
fn callee<'a>(ctx: &'a SemanticContext, call: Node<'_>) -> super::Symbol<'a> {
    let name = call
        .child_nodes()
        .find(|c| c.is_any(&[TreeKind::IDENTIFIER, TreeKind::MEMBER_SELECT]));
    let name = match name {
        Some(select) if select.is(TreeKind::MEMBER_SELECT) => select
            .child_nodes()
            .rev()
            .find(|c| c.is(TreeKind::IDENTIFIER)),
        other => other,
    };
    let binding = call.binding().or_else(|| name.and_then(|n| n.binding()));
    ctx.symbol_of_opt(binding)
}

//! Folding accessor links into a nested guarded conditional.

use super::AccessorLink;
use crate::transforms::ir::IRNode;

/// `(temp = source) != null ? rest : temp`
fn guard(source: IRNode, rest: IRNode, temp: &str) -> IRNode {
    IRNode::conditional(
        IRNode::binary(
            IRNode::assign(IRNode::id(temp), source),
            "!=",
            IRNode::NullLiteral,
        ),
        rest,
        IRNode::id(temp),
    )
}

/// Build the short-circuiting expression for `root_input` followed by `links`.
///
/// The last link, applied to `temp`, is the unguarded innermost result.
/// Every earlier link wraps it in a guard, and the root input wraps the
/// whole thing. With no links the root input is returned unchanged.
#[must_use]
pub fn build_condition(root_input: IRNode, links: &[AccessorLink<IRNode>], temp: &str) -> IRNode {
    let Some((last, earlier)) = links.split_last() else {
        return root_input;
    };

    let innermost = last.apply(IRNode::id(temp));
    let chain = earlier
        .iter()
        .rev()
        .fold(innermost, |rest, link| guard(link.apply(IRNode::id(temp)), rest, temp));
    guard(root_input, chain, temp)
}

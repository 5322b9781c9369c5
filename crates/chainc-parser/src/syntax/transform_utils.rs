//! Transform utilities for syntax analysis.

use crate::parser::{NodeArena, NodeIndex, syntax_kind_ext};
use rustc_hash::FxHashSet;

/// Skip parentheses to get the effective expression node.
///
/// Example: `((p.a))` -> `p.a`
#[must_use]
pub fn skip_parentheses(arena: &NodeArena, mut node_idx: NodeIndex) -> NodeIndex {
    while let Some(node) = arena.get(node_idx) {
        if let Some(paren) = arena.get_parenthesized(node) {
            node_idx = paren.expression;
            continue;
        }
        break;
    }
    node_idx
}

/// Every identifier spelled anywhere in the file, including property names.
///
/// Generated names must avoid all of these, not only the bindings in scope:
/// a temporary that shadows a global read deeper in the file changes meaning.
#[must_use]
pub fn collect_identifier_names(arena: &NodeArena) -> FxHashSet<String> {
    arena
        .identifiers
        .iter()
        .filter(|ident| !ident.escaped_text.is_empty())
        .map(|ident| ident.escaped_text.clone())
        .collect()
}

/// Whether `kind` opens a new `var` scope.
#[must_use]
pub fn is_function_like(kind: u16) -> bool {
    kind == syntax_kind_ext::FUNCTION_EXPRESSION || kind == syntax_kind_ext::ARROW_FUNCTION
}

/// Whether the node is a plain identifier (not a keyword or pattern).
#[must_use]
pub fn is_identifier(arena: &NodeArena, node_idx: NodeIndex) -> bool {
    arena.identifier_text(node_idx).is_some()
}

#[cfg(test)]
#[path = "../../tests/transform_utils_tests.rs"]
mod tests;

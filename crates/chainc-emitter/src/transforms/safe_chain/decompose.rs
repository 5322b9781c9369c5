//! Splitting a callback body into accessor links.

use super::{AccessorLink, MemberKey, RewriteError, RewriteErrorKind};
use chainc_common::limits::MAX_CHAIN_DEPTH;
use chainc_parser::parser::{NodeArena, NodeIndex, node_flags, syntax_kind_ext};
use chainc_parser::syntax::transform_utils::skip_parentheses;
use chainc_scanner::SyntaxKind;

/// Walk `body` from its outermost operation down to `param_name`.
///
/// Links come back in application order: the one applied to the parameter
/// first, the outermost call or access last. An empty list means the body
/// is the bare parameter.
pub fn decompose(
    arena: &NodeArena,
    body: NodeIndex,
    param_name: &str,
    callee_name: &str,
) -> Result<Vec<AccessorLink<NodeIndex>>, RewriteError> {
    let mut walker = ChainWalker {
        arena,
        param_name,
        callee_name,
        depth: 0,
    };
    let mut links = Vec::new();
    walker.walk(body, &mut links)?;
    Ok(links)
}

struct ChainWalker<'a> {
    arena: &'a NodeArena,
    param_name: &'a str,
    callee_name: &'a str,
    depth: u32,
}

impl ChainWalker<'_> {
    fn error(&self, kind: RewriteErrorKind, node: NodeIndex) -> RewriteError {
        RewriteError::new(kind, node, self.callee_name)
    }

    /// Recurse into the object first, then push this level's link, so deeper
    /// links land earlier in `links`.
    fn walk(
        &mut self,
        idx: NodeIndex,
        links: &mut Vec<AccessorLink<NodeIndex>>,
    ) -> Result<(), RewriteError> {
        let idx = skip_parentheses(self.arena, idx);
        if self.depth >= MAX_CHAIN_DEPTH {
            return Err(self.error(RewriteErrorKind::UnsupportedOperation, idx));
        }
        let Some(node) = self.arena.get(idx) else {
            return Err(self.error(RewriteErrorKind::UnsupportedOperation, idx));
        };
        // `p?.a` already guards itself
        if node.flags & node_flags::OPTIONAL_CHAIN != 0 {
            return Err(self.error(RewriteErrorKind::UnsupportedOperation, idx));
        }

        self.depth += 1;
        let link = match node.kind {
            k if k == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                let Some(access) = self.arena.get_access_expr(node) else {
                    return Err(self.error(RewriteErrorKind::UnsupportedOperation, idx));
                };
                let name = self
                    .arena
                    .identifier_text(access.name_or_argument)
                    .unwrap_or_default()
                    .to_string();
                self.walk(access.expression, links)?;
                AccessorLink::ReadMember {
                    key: MemberKey::Name(name),
                }
            }
            k if k == syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => {
                let Some(access) = self.arena.get_access_expr(node) else {
                    return Err(self.error(RewriteErrorKind::UnsupportedOperation, idx));
                };
                self.walk(access.expression, links)?;
                AccessorLink::ReadMember {
                    key: MemberKey::Computed(access.name_or_argument),
                }
            }
            k if k == syntax_kind_ext::CALL_EXPRESSION => {
                let Some(call) = self.arena.get_call_expr(node) else {
                    return Err(self.error(RewriteErrorKind::UnsupportedOperation, idx));
                };
                self.walk(call.expression, links)?;
                AccessorLink::Invoke {
                    arguments: call
                        .arguments
                        .as_ref()
                        .map(|args| args.iter().collect())
                        .unwrap_or_default(),
                }
            }
            k if k == SyntaxKind::Identifier as u16 => {
                return match self.arena.identifier_text(idx) {
                    Some(name) if name == self.param_name => Ok(()),
                    _ => Err(self.error(RewriteErrorKind::RootMismatch, idx)),
                };
            }
            _ => return Err(self.error(RewriteErrorKind::UnsupportedOperation, idx)),
        };
        links.push(link);
        Ok(())
    }
}

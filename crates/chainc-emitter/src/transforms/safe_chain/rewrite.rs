//! Rewriting one call site.

use super::{
    ChainDescriptor, RewriteError, RewriteResult, TempDeclaration, build_condition, decompose,
    validate,
};
use crate::temp_names::TempNameProvider;
use crate::transforms::ir::IRNode;
use chainc_parser::parser::{NodeArena, NodeIndex};
use tracing::trace;

/// Converts a host sub-expression (the root input, a computed key, a call
/// argument) into IR.
pub trait ExpressionLowering {
    fn lower(&mut self, idx: NodeIndex) -> Result<IRNode, RewriteError>;
}

/// What a rewrite needs from its surroundings.
pub struct RewriteContext<'a> {
    pub arena: &'a NodeArena,
    pub provider: &'a dyn TempNameProvider,
    pub temp_hint: &'a str,
}

/// Rewrite the call site at `call` into a guarded conditional.
///
/// Operands are lowered before the temporary is requested, so call sites
/// nested inside them are named first.
pub fn rewrite(
    ctx: &RewriteContext<'_>,
    call: NodeIndex,
    lowering: &mut dyn ExpressionLowering,
) -> Result<RewriteResult, RewriteError> {
    let request = validate(ctx.arena, call)?;
    let links = decompose(
        ctx.arena,
        request.body_expression,
        &request.param_name,
        &request.callee_name,
    )?;

    let chain = ChainDescriptor {
        root_input: request.input_expression,
        param_name: request.param_name,
        links,
    }
    .try_map(|idx| lowering.lower(idx))
    .map_err(|mut error| {
        // Lowering does not know which call site it is working for
        error.callee.clone_from(&request.callee_name);
        error
    })?;

    if chain.links.is_empty() {
        return Ok(RewriteResult {
            replacement: chain.root_input,
            temp_declaration: None,
        });
    }

    let temp = ctx.provider.fresh(ctx.temp_hint);
    for (position, link) in chain.links.iter().enumerate() {
        trace!(temp = %temp, position, ?link, "guarding link");
    }

    Ok(RewriteResult {
        replacement: build_condition(chain.root_input, &chain.links, &temp),
        temp_declaration: Some(TempDeclaration {
            name: temp,
            initializer: None,
        }),
    })
}

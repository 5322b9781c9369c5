//! Call-site shape checks.

use super::{RewriteError, RewriteErrorKind, RewriteRequest};
use chainc_parser::parser::{NodeArena, NodeIndex, syntax_kind_ext};
use chainc_parser::syntax::transform_utils::skip_parentheses;

/// Check that `call` has the shape `callee(input, p => expr)`.
///
/// Checks run in a fixed order and stop at the first failure: argument
/// count, callback kind, body kind, parameter count, parameter form.
pub fn validate(arena: &NodeArena, call: NodeIndex) -> Result<RewriteRequest, RewriteError> {
    let call_data = arena.get(call).and_then(|node| arena.get_call_expr(node));
    let callee_name = call_data
        .and_then(|data| arena.identifier_text(data.expression))
        .unwrap_or_default()
        .to_string();
    let fail = |kind, node| Err(RewriteError::new(kind, node, callee_name.as_str()));

    let arguments: Vec<NodeIndex> = call_data
        .and_then(|data| data.arguments.as_ref())
        .map(|args| args.iter().collect())
        .unwrap_or_default();
    let [input_expression, callback_arg] = arguments[..] else {
        return fail(RewriteErrorKind::WrongArgumentCount, call);
    };

    let callback = skip_parentheses(arena, callback_arg);
    let Some(function) = arena
        .get(callback)
        .and_then(|node| arena.get_function(node))
    else {
        return fail(RewriteErrorKind::SecondArgumentNotFunction, callback_arg);
    };

    // `function` expressions always land here
    if arena
        .get(function.body)
        .is_none_or(|body| body.kind == syntax_kind_ext::BLOCK)
    {
        return fail(RewriteErrorKind::BodyNotExpression, function.body);
    }

    let [param_idx] = function.parameters.nodes[..] else {
        return fail(RewriteErrorKind::WrongParameterCount, callback);
    };
    let param_name = arena
        .get(param_idx)
        .and_then(|node| arena.get_parameter(node))
        .filter(|param| !param.dot_dot_dot_token && param.initializer.is_none())
        .and_then(|param| arena.identifier_text(param.name))
        .filter(|name| !name.is_empty());
    let Some(param_name) = param_name else {
        return fail(RewriteErrorKind::ParameterNotIdentifier, param_idx);
    };

    Ok(RewriteRequest {
        call,
        callee_name: callee_name.clone(),
        input_expression,
        param_name: param_name.to_string(),
        body_expression: function.body,
    })
}

use super::*;
use crate::parser::ParserState;

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut state = ParserState::new("test.js".to_string(), source.to_string());
    let root = state.parse_source_file();
    assert!(state.get_diagnostics().is_empty(), "{:?}", state.get_diagnostics());
    (state.into_arena(), root)
}

fn first_expression(arena: &NodeArena, root: NodeIndex) -> NodeIndex {
    let file = arena.get_source_file(arena.get(root).unwrap()).unwrap();
    let stmt = file.statements.nodes[0];
    arena
        .get_expression_statement(arena.get(stmt).unwrap())
        .unwrap()
        .expression
}

#[test]
fn test_skip_parentheses_unwraps_nested_parens() {
    let (arena, root) = parse("((a.b));");
    let expr = first_expression(&arena, root);
    let inner = skip_parentheses(&arena, expr);
    assert_eq!(
        arena.get(inner).unwrap().kind,
        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
    );
    // Non-parenthesized nodes are returned as-is
    assert_eq!(skip_parentheses(&arena, inner), inner);
}

#[test]
fn test_collect_identifier_names_includes_property_names() {
    let (arena, _) = parse("var _ref = idx(props, p => p.user);");
    let names = collect_identifier_names(&arena);
    for name in ["_ref", "idx", "props", "p", "user"] {
        assert!(names.contains(name), "missing {name}");
    }
    assert!(!names.contains("var"));
}

#[test]
fn test_is_function_like() {
    let (arena, root) = parse("(x => x);");
    let expr = skip_parentheses(&arena, first_expression(&arena, root));
    assert!(is_function_like(arena.get(expr).unwrap().kind));
    assert!(!is_function_like(syntax_kind_ext::CALL_EXPRESSION));
}

#[test]
fn test_is_identifier_rejects_keywords() {
    let (arena, root) = parse("this;");
    let expr = first_expression(&arena, root);
    assert!(!is_identifier(&arena, expr));
    assert!(!is_identifier(&arena, NodeIndex::NONE));
}

use chainc_common::diagnostic_codes;
use chainc_parser::parser::{
    NodeArena, NodeIndex, ParseDiagnostic, ParserState, node_flags, syntax_kind_ext,
};
use chainc_scanner::SyntaxKind;

fn parse(source: &str) -> (NodeArena, NodeIndex, Vec<ParseDiagnostic>) {
    let mut state = ParserState::new("test.js".to_string(), source.to_string());
    let root = state.parse_source_file();
    let diagnostics = state.get_diagnostics().to_vec();
    (state.into_arena(), root, diagnostics)
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    let node = arena.get(root).expect("root");
    arena
        .get_source_file(node)
        .expect("source file")
        .statements
        .iter()
        .collect()
}

/// Parse a single expression statement and return its expression.
fn parse_expression(source: &str) -> (NodeArena, NodeIndex) {
    let (arena, root, diagnostics) = parse(source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    assert_eq!(stmts.len(), 1);
    let stmt = arena.get(stmts[0]).expect("statement");
    let expression = arena
        .get_expression_statement(stmt)
        .expect("expression statement")
        .expression;
    (arena, expression)
}

fn kind_of(arena: &NodeArena, idx: NodeIndex) -> u16 {
    arena.get(idx).expect("node").kind
}

#[test]
fn test_parse_chain_call() {
    let (arena, expr) = parse_expression("idx(props, _ => _.user.friends[0].getName());");
    let call_node = arena.get(expr).unwrap();
    assert_eq!(call_node.kind, syntax_kind_ext::CALL_EXPRESSION);

    let call = arena.get_call_expr(call_node).unwrap();
    assert_eq!(arena.identifier_text(call.expression), Some("idx"));
    let args: Vec<_> = call.arguments.as_ref().unwrap().iter().collect();
    assert_eq!(args.len(), 2);
    assert_eq!(arena.identifier_text(args[0]), Some("props"));

    let arrow = arena.get_function(arena.get(args[1]).unwrap()).unwrap();
    assert!(arrow.equals_greater_than_token);
    assert_eq!(arrow.parameters.len(), 1);

    // _.user.friends[0].getName()
    let body = arena.get(arrow.body).unwrap();
    assert_eq!(body.kind, syntax_kind_ext::CALL_EXPRESSION);
    let callee = arena.get_call_expr(body).unwrap().expression;
    assert_eq!(kind_of(&arena, callee), syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION);
    let access = arena.get_access_expr(arena.get(callee).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(access.name_or_argument), Some("getName"));
    assert_eq!(
        kind_of(&arena, access.expression),
        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
    );
}

#[test]
fn test_node_spans_cover_source() {
    let source = "foo(a.b, c)";
    let (arena, expr) = parse_expression(source);
    assert_eq!(arena.span_of(expr).slice(source), "foo(a.b, c)");
    let call = arena.get_call_expr(arena.get(expr).unwrap()).unwrap();
    let first = call.arguments.as_ref().unwrap().nodes[0];
    assert_eq!(arena.span_of(first).slice(source), "a.b");
}

#[test]
fn test_binary_precedence() {
    let (arena, expr) = parse_expression("a + b * c == d && e;");
    let top = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(top.operator_token, SyntaxKind::AmpersandAmpersandToken as u16);

    let eq = arena.get_binary_expr(arena.get(top.left).unwrap()).unwrap();
    assert_eq!(eq.operator_token, SyntaxKind::EqualsEqualsToken as u16);

    let add = arena.get_binary_expr(arena.get(eq.left).unwrap()).unwrap();
    assert_eq!(add.operator_token, SyntaxKind::PlusToken as u16);
    assert_eq!(
        kind_of(&arena, add.right),
        syntax_kind_ext::BINARY_EXPRESSION
    );
}

#[test]
fn test_binary_operators_are_left_associative() {
    let (arena, expr) = parse_expression("a - b - c;");
    let top = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(top.right), Some("c"));
    assert_eq!(kind_of(&arena, top.left), syntax_kind_ext::BINARY_EXPRESSION);
}

#[test]
fn test_assignment_and_conditional() {
    let (arena, expr) = parse_expression("x = a ? b : c = d;");
    let assign = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(assign.operator_token, SyntaxKind::EqualsToken as u16);
    assert_eq!(arena.identifier_text(assign.left), Some("x"));
    assert_eq!(
        kind_of(&arena, assign.right),
        syntax_kind_ext::CONDITIONAL_EXPRESSION
    );
    let cond = arena
        .get_conditional_expr(arena.get(assign.right).unwrap())
        .unwrap();
    // Assignment in the false branch binds tighter than the outer conditional
    assert_eq!(
        kind_of(&arena, cond.when_false),
        syntax_kind_ext::BINARY_EXPRESSION
    );
}

#[test]
fn test_optional_chaining_sets_flags() {
    let (arena, expr) = parse_expression("a?.b?.[c]?.();");
    let call = arena.get(expr).unwrap();
    assert_eq!(call.kind, syntax_kind_ext::CALL_EXPRESSION);
    assert_ne!(call.flags & node_flags::OPTIONAL_CHAIN, 0);

    let element = arena.get_call_expr(call).unwrap().expression;
    let element_data = arena.get_access_expr(arena.get(element).unwrap()).unwrap();
    assert!(element_data.question_dot_token);

    let property = arena
        .get_access_expr(arena.get(element_data.expression).unwrap())
        .unwrap();
    assert!(property.question_dot_token);
}

#[test]
fn test_conditional_with_decimal_is_not_optional_chain() {
    let (arena, expr) = parse_expression("a?.5:b;");
    assert_eq!(kind_of(&arena, expr), syntax_kind_ext::CONDITIONAL_EXPRESSION);
}

#[test]
fn test_arrow_function_forms() {
    let (arena, expr) = parse_expression("[x => x, (a, b) => a, () => {}, ({ a, b: [c] }, ...rest) => c];");
    let elements: Vec<_> = arena
        .get_literal_expr(arena.get(expr).unwrap())
        .unwrap()
        .elements
        .iter()
        .collect();
    assert_eq!(elements.len(), 4);

    let params: Vec<usize> = elements
        .iter()
        .map(|&e| {
            arena
                .get_function(arena.get(e).unwrap())
                .unwrap()
                .parameters
                .len()
        })
        .collect();
    assert_eq!(params, vec![1, 2, 0, 2]);

    let block_body = arena.get_function(arena.get(elements[2]).unwrap()).unwrap();
    assert_eq!(kind_of(&arena, block_body.body), syntax_kind_ext::BLOCK);

    let pattern_fn = arena.get_function(arena.get(elements[3]).unwrap()).unwrap();
    let first_param = arena
        .get_parameter(arena.get(pattern_fn.parameters.nodes[0]).unwrap())
        .unwrap();
    assert_eq!(
        kind_of(&arena, first_param.name),
        syntax_kind_ext::OBJECT_BINDING_PATTERN
    );
    let rest_param = arena
        .get_parameter(arena.get(pattern_fn.parameters.nodes[1]).unwrap())
        .unwrap();
    assert!(rest_param.dot_dot_dot_token);
}

#[test]
fn test_parenthesized_expression_is_not_arrow() {
    let (arena, expr) = parse_expression("(a)(b);");
    let call = arena.get_call_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(
        kind_of(&arena, call.expression),
        syntax_kind_ext::PARENTHESIZED_EXPRESSION
    );
}

#[test]
fn test_function_expression() {
    let (arena, expr) = parse_expression("(function named(p) { return p.a; });");
    let inner = arena
        .get_parenthesized(arena.get(expr).unwrap())
        .unwrap()
        .expression;
    let func = arena.get_function(arena.get(inner).unwrap()).unwrap();
    assert!(!func.equals_greater_than_token);
    assert_eq!(arena.identifier_text(func.name), Some("named"));
    let block = arena.get_block(arena.get(func.body).unwrap()).unwrap();
    assert_eq!(
        kind_of(&arena, block.statements.nodes[0]),
        syntax_kind_ext::RETURN_STATEMENT
    );
}

#[test]
fn test_new_expression_binds_arguments() {
    let (arena, expr) = parse_expression("new a.B(1).c;");
    let access = arena.get_access_expr(arena.get(expr).unwrap()).unwrap();
    let new_node = arena.get(access.expression).unwrap();
    assert_eq!(new_node.kind, syntax_kind_ext::NEW_EXPRESSION);
    let new_expr = arena.get_call_expr(new_node).unwrap();
    assert_eq!(new_expr.arguments.as_ref().map(|a| a.len()), Some(1));
    assert_eq!(
        kind_of(&arena, new_expr.expression),
        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
    );
}

#[test]
fn test_keywords_allowed_as_property_names() {
    let (arena, expr) = parse_expression("a.new.this;");
    let access = arena.get_access_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(access.name_or_argument), Some("this"));
}

#[test]
fn test_literals() {
    let (arena, expr) = parse_expression("['it\\'s', 0x10, null, true, this];");
    let elements: Vec<_> = arena
        .get_literal_expr(arena.get(expr).unwrap())
        .unwrap()
        .elements
        .iter()
        .collect();
    let string = arena.get_literal(arena.get(elements[0]).unwrap()).unwrap();
    assert_eq!(string.text, "it's");
    assert_eq!(string.raw_text, "'it\\'s'");
    let number = arena.get_literal(arena.get(elements[1]).unwrap()).unwrap();
    assert_eq!(number.raw_text, "0x10");
    assert_eq!(kind_of(&arena, elements[2]), SyntaxKind::NullKeyword as u16);
    assert_eq!(kind_of(&arena, elements[3]), SyntaxKind::TrueKeyword as u16);
    assert_eq!(kind_of(&arena, elements[4]), SyntaxKind::ThisKeyword as u16);
}

#[test]
fn test_statements() {
    let source = "var a = 1, b;\nlet c = a\nconst d = c;\n{ ; }\nfoo()";
    let (arena, root, diagnostics) = parse(source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let stmts = statements(&arena, root);
    let kinds: Vec<u16> = stmts.iter().map(|&s| kind_of(&arena, s)).collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::VARIABLE_STATEMENT,
            syntax_kind_ext::VARIABLE_STATEMENT,
            syntax_kind_ext::VARIABLE_STATEMENT,
            syntax_kind_ext::BLOCK,
            syntax_kind_ext::EXPRESSION_STATEMENT,
        ]
    );

    let var_stmt = arena.get(stmts[0]).unwrap();
    assert_eq!(arena.get_variable(var_stmt).unwrap().declarations.len(), 2);
    assert_eq!(var_stmt.flags & (node_flags::LET | node_flags::CONST), 0);
    assert_ne!(arena.get(stmts[1]).unwrap().flags & node_flags::LET, 0);
    assert_ne!(arena.get(stmts[2]).unwrap().flags & node_flags::CONST, 0);
}

#[test]
fn test_missing_semicolon_on_same_line() {
    let (_, _, diagnostics) = parse("a b");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::TOKEN_EXPECTED);
    assert_eq!(diagnostics[0].message, "';' expected.");
    assert_eq!(diagnostics[0].start, 2);
}

#[test]
fn test_unterminated_string_is_reported() {
    let (_, _, diagnostics) = parse("var s = 'abc\n;");
    assert_eq!(
        diagnostics[0].code,
        diagnostic_codes::UNTERMINATED_STRING_LITERAL
    );
}

#[test]
fn test_hex_literal_without_digits_is_reported() {
    let (_, _, diagnostics) = parse("r = 0x;");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].code,
        diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED
    );
    assert_eq!((diagnostics[0].start, diagnostics[0].length), (4, 2));
}

#[test]
fn test_unterminated_block_comment_is_reported_at_end_of_file() {
    let source = "r = 1; /* \u{65e5}";
    let (_, _, diagnostics) = parse(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::TOKEN_EXPECTED);
    assert_eq!(diagnostics[0].message, "'*/' expected.");
    assert_eq!(diagnostics[0].start, source.len() as u32);
    assert_eq!(diagnostics[0].length, 0);
}

#[test]
fn test_invalid_character_is_reported() {
    let (_, _, diagnostics) = parse("a # b;");
    assert_eq!(diagnostics[0].code, diagnostic_codes::INVALID_CHARACTER);
    assert_eq!(diagnostics[0].start, 2);
}

#[test]
fn test_recovery_makes_progress_on_stray_tokens() {
    let (arena, root, diagnostics) = parse(") ] a;");
    assert!(!diagnostics.is_empty());
    assert_eq!(diagnostics[0].code, diagnostic_codes::EXPRESSION_EXPECTED);
    // The trailing statement still parses
    let last = *statements(&arena, root).last().unwrap();
    let expr = arena
        .get_expression_statement(arena.get(last).unwrap())
        .unwrap()
        .expression;
    assert_eq!(arena.identifier_text(expr), Some("a"));
}

#[test]
fn test_get_children_in_source_order() {
    let (arena, expr) = parse_expression("f(a, b)[c];");
    let children = arena.get_children(expr);
    assert_eq!(children.len(), 2);
    assert_eq!(kind_of(&arena, children[0]), syntax_kind_ext::CALL_EXPRESSION);
    assert_eq!(arena.identifier_text(children[1]), Some("c"));

    let call_children = arena.get_children(children[0]);
    let names: Vec<_> = call_children
        .iter()
        .map(|&c| arena.identifier_text(c).unwrap())
        .collect();
    assert_eq!(names, vec!["f", "a", "b"]);
}

use super::*;
use crate::transforms::ir_printer::IRPrinter;
use chainc_parser::parser::ParserState;

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors: {:?}",
        parser.get_diagnostics()
    );
    (parser.into_arena(), root)
}

fn convert(source: &str) -> String {
    let (arena, root) = parse(source);
    let program = AstToIr::new(&arena).convert_source_file(root);
    IRPrinter::emit_to_string(&program)
}

#[test]
fn test_member_and_call_chains_round_trip() {
    assert_eq!(convert("a.b[0].c(1, 2);"), "a.b[0].c(1, 2);");
    assert_eq!(convert("a?.b?.[c]?.(d);"), "a?.b?.[c]?.(d);");
    assert_eq!(convert("f(...xs);"), "f(...xs);");
}

#[test]
fn test_variable_statements() {
    assert_eq!(
        convert("var x = 1, y;\nlet z = 'str';\nconst w = z;"),
        "var x = 1, y;\nlet z = \"str\";\nconst w = z;"
    );
}

#[test]
fn test_operators_and_user_parentheses() {
    assert_eq!(convert("x = a ? b : c;"), "x = a ? b : c;");
    assert_eq!(convert("(a + b) * c;"), "(a + b) * c;");
    assert_eq!(convert("typeof x === \"undefined\";"), "typeof x === \"undefined\";");
    assert_eq!(convert("!a || b && c;"), "!a || b && c;");
    assert_eq!(convert("a ?? b;"), "a ?? b;");
}

#[test]
fn test_literals_keep_their_spelling() {
    assert_eq!(convert("0x1F + 1.50;"), "0x1F + 1.50;");
    assert_eq!(convert("[1, , 2];"), "[1, , 2];");
    assert_eq!(convert("x = [true, false, null, this];"), "x = [true, false, null, this];");
}

#[test]
fn test_new_expressions() {
    assert_eq!(convert("new Foo;"), "new Foo;");
    assert_eq!(convert("new Foo(1);"), "new Foo(1);");
    assert_eq!(convert("new a.B();"), "new a.B();");
}

#[test]
fn test_functions() {
    assert_eq!(
        convert("f(function (a) { return a; });"),
        "f(function (a) {\n    return a;\n});"
    );
    assert_eq!(
        convert("g = function named() {};"),
        "g = function named() { };"
    );
    assert_eq!(convert("h = (a, ...rest) => a;"), "h = (a, ...rest) => a;");
    assert_eq!(convert("h = (a = 1) => a;"), "h = (a = 1) => a;");
    assert_eq!(convert("h = p => { return p; };"), "h = p => {\n    return p;\n};");
}

#[test]
fn test_binding_patterns_are_copied_as_written() {
    assert_eq!(convert("h(({ a, b }) => a);"), "h(({ a, b }) => a);");
    assert_eq!(convert("h(([x, y]) => y);"), "h(([x, y]) => y);");
}

#[test]
fn test_statements() {
    assert_eq!(convert("{ a; }"), "{\n    a;\n}");
    assert_eq!(convert(";"), ";");
    assert_eq!(convert("a\nb"), "a;\nb;");
}

#[test]
fn test_call_sites_are_untouched_without_a_rewriter() {
    assert_eq!(convert("idx(a, p => p.b);"), "idx(a, p => p.b);");
}

#[test]
fn test_lower_reports_no_error_for_shallow_expressions() {
    let (arena, root) = parse("a.b;");
    let statement = arena
        .get(root)
        .and_then(|node| arena.get_source_file(node))
        .and_then(|file| file.statements.iter().next())
        .expect("statement");
    let expression = arena
        .get(statement)
        .and_then(|node| arena.get_expression_statement(node))
        .map(|stmt| stmt.expression)
        .expect("expression");

    let mut converter = AstToIr::new(&arena);
    let lowered = converter.lower(expression).expect("lowered");
    assert_eq!(lowered, IRNode::prop(IRNode::id("a"), "b"));
}

#[test]
fn test_deep_chain_falls_back_to_source_text() {
    let handle = std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(|| {
            let source = format!("x{};", ".a".repeat(600));
            let (arena, root) = parse(&source);
            let mut converter = AstToIr::new(&arena);
            let program = converter.convert_source_file(root);
            (
                source,
                IRPrinter::emit_to_string(&program),
                converter.depth_exceeded().is_some(),
            )
        })
        .expect("spawn");
    let (source, output, exceeded) = handle.join().expect("thread panicked");
    assert!(exceeded);
    assert_eq!(output, source);
}

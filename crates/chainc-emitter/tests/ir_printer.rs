use super::*;
use crate::transforms::ir::DeclarationKind;

fn print(node: &IRNode) -> String {
    IRPrinter::emit_to_string(node)
}

#[test]
fn test_emit_literals() {
    assert_eq!(print(&IRNode::number("42")), "42");
    assert_eq!(print(&IRNode::string("hello")), "\"hello\"");
    assert_eq!(print(&IRNode::BooleanLiteral(true)), "true");
    assert_eq!(print(&IRNode::BooleanLiteral(false)), "false");
    assert_eq!(print(&IRNode::NullLiteral), "null");
    assert_eq!(print(&IRNode::Undefined), "void 0");
}

#[test]
fn test_emit_string_escapes() {
    assert_eq!(print(&IRNode::string("a\"b")), r#""a\"b""#);
    assert_eq!(print(&IRNode::string("line\nbreak\t")), r#""line\nbreak\t""#);
    assert_eq!(print(&IRNode::string("back\\slash")), r#""back\\slash""#);
    assert_eq!(print(&IRNode::string("it's")), "\"it's\"");
    assert_eq!(print(&IRNode::string("\u{2028}")), r#""\u2028""#);
    assert_eq!(print(&IRNode::string("\u{1}")), r#""\u0001""#);
}

#[test]
fn test_emit_identifiers() {
    assert_eq!(print(&IRNode::id("foo")), "foo");
    assert_eq!(print(&IRNode::this()), "this");
}

#[test]
fn test_emit_binary_expr() {
    let expr = IRNode::binary(IRNode::id("a"), "+", IRNode::number("1"));
    assert_eq!(print(&expr), "a + 1");

    let assign = IRNode::assign(IRNode::id("x"), IRNode::number("42"));
    assert_eq!(print(&assign), "x = 42");
}

#[test]
fn test_binary_parentheses_follow_precedence() {
    let sum = IRNode::binary(IRNode::id("a"), "+", IRNode::id("b"));
    let product = IRNode::binary(sum, "*", IRNode::id("c"));
    assert_eq!(print(&product), "(a + b) * c");

    let left_nested = IRNode::binary(
        IRNode::binary(IRNode::id("a"), "-", IRNode::id("b")),
        "-",
        IRNode::id("c"),
    );
    assert_eq!(print(&left_nested), "a - b - c");

    let right_nested = IRNode::binary(
        IRNode::id("a"),
        "-",
        IRNode::binary(IRNode::id("b"), "-", IRNode::id("c")),
    );
    assert_eq!(print(&right_nested), "a - (b - c)");

    let tighter_right = IRNode::binary(
        IRNode::id("a"),
        "+",
        IRNode::binary(IRNode::id("b"), "*", IRNode::id("c")),
    );
    assert_eq!(print(&tighter_right), "a + b * c");
}

#[test]
fn test_coalesce_is_never_mixed_with_logical_operators() {
    let or = IRNode::binary(IRNode::id("a"), "||", IRNode::id("b"));
    let coalesce = IRNode::binary(or, "??", IRNode::id("c"));
    assert_eq!(print(&coalesce), "(a || b) ?? c");

    let inner = IRNode::binary(IRNode::id("b"), "??", IRNode::id("c"));
    let and = IRNode::binary(IRNode::id("a"), "&&", inner);
    assert_eq!(print(&and), "a && (b ?? c)");
}

#[test]
fn test_emit_call_expr() {
    let call = IRNode::call(IRNode::id("foo"), vec![]);
    assert_eq!(print(&call), "foo()");

    let call_args = IRNode::call(
        IRNode::id("bar"),
        vec![IRNode::number("1"), IRNode::string("test")],
    );
    assert_eq!(print(&call_args), "bar(1, \"test\")");

    let spread = IRNode::call(
        IRNode::id("f"),
        vec![IRNode::SpreadElement(Box::new(IRNode::id("xs")))],
    );
    assert_eq!(print(&spread), "f(...xs)");
}

#[test]
fn test_emit_property_access() {
    let prop = IRNode::prop(IRNode::id("obj"), "prop");
    assert_eq!(print(&prop), "obj.prop");

    let chained = IRNode::prop(IRNode::prop(IRNode::id("a"), "b"), "c");
    assert_eq!(print(&chained), "a.b.c");
}

#[test]
fn test_emit_element_access() {
    let elem = IRNode::elem(IRNode::id("arr"), IRNode::number("0"));
    assert_eq!(print(&elem), "arr[0]");
}

#[test]
fn test_emit_optional_chain_nodes() {
    let prop = IRNode::OptionalPropertyAccess {
        object: Box::new(IRNode::id("a")),
        property: "b".to_string(),
    };
    assert_eq!(print(&prop), "a?.b");

    let elem = IRNode::OptionalElementAccess {
        object: Box::new(IRNode::id("a")),
        index: Box::new(IRNode::number("0")),
    };
    assert_eq!(print(&elem), "a?.[0]");

    let call = IRNode::OptionalCall {
        callee: Box::new(IRNode::id("f")),
        arguments: vec![IRNode::id("x")],
    };
    assert_eq!(print(&call), "f?.(x)");
}

#[test]
fn test_integer_member_object_is_parenthesized() {
    let int = IRNode::prop(IRNode::number("1"), "toString");
    assert_eq!(print(&int), "(1).toString");

    let float = IRNode::prop(IRNode::number("1.5"), "toFixed");
    assert_eq!(print(&float), "1.5.toFixed");
}

#[test]
fn test_emit_conditional() {
    let nested_else = IRNode::conditional(
        IRNode::id("a"),
        IRNode::id("b"),
        IRNode::conditional(IRNode::id("c"), IRNode::id("d"), IRNode::id("e")),
    );
    assert_eq!(print(&nested_else), "a ? b : c ? d : e");

    let nested_condition = IRNode::conditional(
        IRNode::conditional(IRNode::id("a"), IRNode::id("b"), IRNode::id("c")),
        IRNode::id("d"),
        IRNode::id("e"),
    );
    assert_eq!(print(&nested_condition), "(a ? b : c) ? d : e");

    let as_object = IRNode::prop(
        IRNode::conditional(IRNode::id("a"), IRNode::id("b"), IRNode::id("c")),
        "d",
    );
    assert_eq!(print(&as_object), "(a ? b : c).d");
}

#[test]
fn test_emit_null_guard() {
    let guard = IRNode::conditional(
        IRNode::binary(
            IRNode::assign(IRNode::id("t"), IRNode::id("props")),
            "!=",
            IRNode::NullLiteral,
        ),
        IRNode::prop(IRNode::id("t"), "user"),
        IRNode::id("t"),
    );
    assert_eq!(print(&guard), "(t = props) != null ? t.user : t");
}

#[test]
fn test_emit_prefix_unary() {
    let not = IRNode::PrefixUnaryExpr {
        operator: "!".to_string(),
        operand: Box::new(IRNode::binary(IRNode::id("a"), "&&", IRNode::id("b"))),
    };
    assert_eq!(print(&not), "!(a && b)");

    let typeof_expr = IRNode::PrefixUnaryExpr {
        operator: "typeof".to_string(),
        operand: Box::new(IRNode::id("x")),
    };
    assert_eq!(print(&typeof_expr), "typeof x");

    let double_negation = IRNode::PrefixUnaryExpr {
        operator: "-".to_string(),
        operand: Box::new(IRNode::PrefixUnaryExpr {
            operator: "-".to_string(),
            operand: Box::new(IRNode::id("x")),
        }),
    };
    assert_eq!(print(&double_negation), "- -x");
}

#[test]
fn test_emit_new_expr() {
    assert_eq!(
        print(&IRNode::new_expr(IRNode::id("Foo"), vec![], false)),
        "new Foo"
    );
    assert_eq!(
        print(&IRNode::new_expr(IRNode::id("Foo"), vec![], true)),
        "new Foo()"
    );
    assert_eq!(
        print(&IRNode::new_expr(
            IRNode::id("Foo"),
            vec![IRNode::number("1")],
            true
        )),
        "new Foo(1)"
    );

    let call_callee = IRNode::new_expr(
        IRNode::call(IRNode::prop(IRNode::id("a"), "b"), vec![]),
        vec![],
        true,
    );
    assert_eq!(print(&call_callee), "new (a.b())()");

    let called_new = IRNode::call(IRNode::new_expr(IRNode::id("Foo"), vec![], false), vec![]);
    assert_eq!(print(&called_new), "(new Foo)()");
}

#[test]
fn test_emit_array_literal() {
    let array = IRNode::array(vec![IRNode::number("1"), IRNode::number("2")]);
    assert_eq!(print(&array), "[1, 2]");

    let leading_hole = IRNode::array(vec![IRNode::OmittedExpression, IRNode::id("b")]);
    assert_eq!(print(&leading_hole), "[, b]");

    let trailing_hole = IRNode::array(vec![IRNode::id("a"), IRNode::OmittedExpression]);
    assert_eq!(print(&trailing_hole), "[a, ,]");
}

#[test]
fn test_emit_var_decl() {
    let decl = IRNode::var_decl("x", None);
    assert_eq!(print(&decl), "var x;");

    let decl_init = IRNode::var_decl("y", Some(IRNode::number("42")));
    assert_eq!(print(&decl_init), "var y = 42;");

    let names = IRNode::var_names(vec!["_ref".to_string(), "_ref2".to_string()]);
    assert_eq!(print(&names), "var _ref, _ref2;");

    let constant = IRNode::VarDeclList {
        keyword: DeclarationKind::Const,
        declarations: vec![IRDeclarator {
            name: "z".to_string(),
            initializer: Some(IRNode::id("w")),
        }],
    };
    assert_eq!(print(&constant), "const z = w;");
}

#[test]
fn test_emit_return_statement() {
    assert_eq!(print(&IRNode::ret(None)), "return;");
    assert_eq!(print(&IRNode::ret(Some(IRNode::number("42")))), "return 42;");
}

#[test]
fn test_emit_function_expr() {
    let anonymous = IRNode::func_expr(None, vec![], vec![]);
    assert_eq!(print(&anonymous), "function () { }");

    let named = IRNode::func_expr(
        Some("f".to_string()),
        vec![IRParam::new("x")],
        vec![
            IRNode::var_names(vec!["_ref".to_string()]),
            IRNode::ret(Some(IRNode::id("x"))),
        ],
    );
    assert_eq!(
        print(&named),
        "function f(x) {\n    var _ref;\n    return x;\n}"
    );
}

#[test]
fn test_emit_arrow_function() {
    let single = IRNode::arrow(
        vec![IRParam::new("p")],
        IRNode::prop(IRNode::id("p"), "a"),
    );
    assert_eq!(print(&single), "p => p.a");

    let pair = IRNode::arrow(
        vec![IRParam::new("a"), IRParam::new("b")],
        IRNode::binary(IRNode::id("a"), "+", IRNode::id("b")),
    );
    assert_eq!(print(&pair), "(a, b) => a + b");

    let rest = IRNode::arrow(vec![IRParam::rest("xs")], IRNode::id("xs"));
    assert_eq!(print(&rest), "(...xs) => xs");

    let default = IRNode::arrow(
        vec![IRParam::new("a").with_default(IRNode::number("1"))],
        IRNode::id("a"),
    );
    assert_eq!(print(&default), "(a = 1) => a");

    let block = IRNode::arrow(
        vec![IRParam::new("p")],
        IRNode::block(vec![IRNode::ret(Some(IRNode::id("p")))]),
    );
    assert_eq!(print(&block), "p => {\n    return p;\n}");

    let invoked = IRNode::call(
        IRNode::arrow(vec![IRParam::new("p")], IRNode::id("p")),
        vec![IRNode::number("1")],
    );
    assert_eq!(print(&invoked), "(p => p)(1)");
}

#[test]
fn test_statement_starting_with_function_is_wrapped() {
    let iife = IRNode::expr_stmt(IRNode::call(IRNode::func_expr(None, vec![], vec![]), vec![]));
    assert_eq!(print(&iife), "(function () { }());");

    let assigned = IRNode::expr_stmt(IRNode::assign(
        IRNode::id("g"),
        IRNode::func_expr(None, vec![], vec![IRNode::ret(None)]),
    ));
    assert_eq!(print(&assigned), "g = function () {\n    return;\n};");
}

#[test]
fn test_emit_sequence_and_blocks() {
    let program = IRNode::sequence(vec![
        IRNode::var_names(vec!["_ref".to_string()]),
        IRNode::expr_stmt(IRNode::id("a")),
        IRNode::block(vec![IRNode::block(vec![IRNode::EmptyStatement])]),
    ]);
    assert_eq!(
        print(&program),
        "var _ref;\na;\n{\n    {\n        ;\n    }\n}"
    );
}

#[test]
fn test_parenthesized_and_raw_are_kept() {
    assert_eq!(print(&IRNode::id("a").paren()), "(a)");
    assert_eq!(print(&IRNode::Raw("{ a, b }".to_string())), "{ a, b }");
}

//! Semantic checks for rewritten chains.
//!
//! A small evaluator runs the rewritten IR against hand-built values and
//! compares the result with a reference that walks the chain and stops at
//! the first null or undefined. Native calls are counted to check that every
//! operand runs at most once.

use chainc_emitter::{IRNode, SafeChainOptions, SafeChainPass, UniqueNameGenerator};
use chainc_parser::parser::ParserState;
use chainc_parser::syntax::transform_utils::collect_identifier_names;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum Value {
    Undefined,
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Obj(Rc<BTreeMap<String, Value>>),
    /// A native function: name (for call counting) and its return value
    Func(Rc<str>, Rc<Value>),
}

impl Value {
    const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    fn truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Num(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::Obj(_) | Self::Func(..) => true,
        }
    }
}

fn obj(entries: Vec<(&str, Value)>) -> Value {
    Value::Obj(Rc::new(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    ))
}

fn func(name: &str, returns: Value) -> Value {
    Value::Func(Rc::from(name), Rc::new(returns))
}

#[derive(Default)]
struct Interp {
    vars: HashMap<String, Value>,
    calls: HashMap<String, usize>,
}

impl Interp {
    fn with_vars(vars: Vec<(&str, Value)>) -> Self {
        Self {
            vars: vars
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            calls: HashMap::new(),
        }
    }

    fn calls_to(&self, name: &str) -> usize {
        self.calls.get(name).copied().unwrap_or(0)
    }

    fn eval(&mut self, node: &IRNode) -> Result<Value, String> {
        match node {
            IRNode::Identifier(name) => Ok(self.vars.get(name).cloned().unwrap_or(Value::Undefined)),
            IRNode::NullLiteral => Ok(Value::Null),
            IRNode::Undefined => Ok(Value::Undefined),
            IRNode::BooleanLiteral(b) => Ok(Value::Bool(*b)),
            IRNode::NumericLiteral(text) => text.parse().map(Value::Num).map_err(|e| format!("{e}")),
            IRNode::StringLiteral(text) => Ok(Value::Str(text.clone())),
            IRNode::Parenthesized(inner) => self.eval(inner),
            IRNode::BinaryExpr {
                left,
                operator,
                right,
            } => match operator.as_str() {
                "=" => {
                    let IRNode::Identifier(name) = left.as_ref() else {
                        return Err("invalid assignment target".to_string());
                    };
                    let value = self.eval(right)?;
                    self.vars.insert(name.clone(), value.clone());
                    Ok(value)
                }
                "!=" => {
                    let l = self.eval(left)?;
                    let r = self.eval(right)?;
                    Ok(Value::Bool(!loose_equals(&l, &r)))
                }
                op => Err(format!("unsupported operator {op}")),
            },
            IRNode::ConditionalExpr {
                condition,
                when_true,
                when_false,
            } => {
                if self.eval(condition)?.truthy() {
                    self.eval(when_true)
                } else {
                    self.eval(when_false)
                }
            }
            IRNode::PropertyAccess { object, property } => {
                let object = self.eval(object)?;
                get_member(&object, property)
            }
            IRNode::ElementAccess { object, index } => {
                let object = self.eval(object)?;
                let key = match self.eval(index)? {
                    Value::Str(s) => s,
                    Value::Num(n) => format!("{n}"),
                    other => return Err(format!("unsupported key {other:?}")),
                };
                get_member(&object, &key)
            }
            IRNode::CallExpr { callee, arguments } => {
                let callee = self.eval(callee)?;
                for argument in arguments {
                    self.eval(argument)?;
                }
                self.call(&callee)
            }
            other => Err(format!("unsupported node {other:?}")),
        }
    }

    fn call(&mut self, callee: &Value) -> Result<Value, String> {
        let Value::Func(name, returns) = callee else {
            return Err(format!("TypeError: {callee:?} is not a function"));
        };
        *self.calls.entry(name.to_string()).or_default() += 1;
        Ok(returns.as_ref().clone())
    }
}

fn loose_equals(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
        (Value::Obj(a), Value::Obj(b)) => Rc::ptr_eq(a, b),
        (a, b) => a == b,
    }
}

fn get_member(object: &Value, key: &str) -> Result<Value, String> {
    match object {
        Value::Undefined | Value::Null => {
            Err(format!("TypeError: cannot read '{key}' of {object:?}"))
        }
        Value::Obj(map) => Ok(map.get(key).cloned().unwrap_or(Value::Undefined)),
        Value::Str(s) if key == "length" => Ok(Value::Num(s.chars().count() as f64)),
        _ => Ok(Value::Undefined),
    }
}

/// One step of the reference walk.
enum Step {
    Get(&'static str),
    /// Index with the value of a variable
    Index(&'static str),
    Call,
}

/// Walk `steps` from `root`, returning the first null/undefined reached.
fn reference(interp: &mut Interp, root: Value, steps: &[Step]) -> Result<Value, String> {
    let mut current = root;
    for step in steps {
        if current.is_nullish() {
            return Ok(current);
        }
        current = match step {
            Step::Get(name) => get_member(&current, name)?,
            Step::Index(var) => {
                let Some(Value::Str(key)) = interp.vars.get(*var).cloned() else {
                    return Err(format!("{var} is not a string"));
                };
                get_member(&current, &key)?
            }
            Step::Call => interp.call(&current)?,
        };
    }
    Ok(current)
}

/// Run the pass over `source` and return its single rewritten expression.
fn rewritten_expression(source: &str) -> IRNode {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.into_arena();
    let names = UniqueNameGenerator::with_reserved(collect_identifier_names(&arena));
    let options = SafeChainOptions::default();
    let output = SafeChainPass::new(&arena, &options, &names).run(root);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);

    let IRNode::Sequence(statements) = output.program else {
        panic!("program is a sequence");
    };
    let declarations = statements
        .iter()
        .filter(|stmt| matches!(stmt, IRNode::VarDeclList { .. }))
        .count();
    assert_eq!(declarations, 1, "one hoisted declaration");

    statements
        .into_iter()
        .find_map(|stmt| match stmt {
            IRNode::ExpressionStatement(expr) => Some(*expr),
            _ => None,
        })
        .expect("expression statement")
}

#[test]
fn test_rewritten_chain_matches_guarded_reference() {
    let expr = rewritten_expression("idx(root, p => p.a.b[key].c());");
    let steps = [
        Step::Get("a"),
        Step::Get("b"),
        Step::Index("key"),
        Step::Get("c"),
        Step::Call,
    ];

    let worlds = vec![
        (
            "complete",
            obj(vec![(
                "a",
                obj(vec![("b", obj(vec![("k1", obj(vec![("c", func("c", Value::Num(42.0)))]))]))]),
            )]),
        ),
        ("null root", Value::Null),
        ("undefined root", Value::Undefined),
        ("missing a", obj(vec![])),
        ("null b", obj(vec![("a", obj(vec![("b", Value::Null)]))])),
        ("missing key", obj(vec![("a", obj(vec![("b", obj(vec![]))]))])),
        (
            "null method",
            obj(vec![(
                "a",
                obj(vec![("b", obj(vec![("k1", obj(vec![("c", Value::Null)]))]))]),
            )]),
        ),
        (
            "method returns null",
            obj(vec![(
                "a",
                obj(vec![("b", obj(vec![("k1", obj(vec![("c", func("c", Value::Null))]))]))]),
            )]),
        ),
        ("primitive root", Value::Num(5.0)),
    ];

    for (label, root) in worlds {
        let vars = vec![("root", root.clone()), ("key", Value::Str("k1".to_string()))];

        let mut rewritten = Interp::with_vars(vars.clone());
        let actual = rewritten.eval(&expr);

        let mut guarded = Interp::with_vars(vars);
        let expected = reference(&mut guarded, root, &steps);

        assert!(actual.is_ok(), "{label}: rewritten chain threw {actual:?}");
        assert_eq!(actual, expected, "{label}");
        assert_eq!(rewritten.calls, guarded.calls, "{label}: call counts");
    }
}

#[test]
fn test_falsy_values_are_not_treated_as_absent() {
    let expr = rewritten_expression("idx(root, p => p.a.length);");
    let steps = [Step::Get("a"), Step::Get("length")];

    let worlds = vec![
        ("zero intermediate", obj(vec![("a", Value::Num(0.0))]), Value::Undefined),
        ("empty string intermediate", obj(vec![("a", Value::Str(String::new()))]), Value::Num(0.0)),
        ("false intermediate", obj(vec![("a", Value::Bool(false))]), Value::Undefined),
        ("zero root", Value::Num(0.0), Value::Undefined),
    ];
    for (label, root, expected) in worlds {
        let mut rewritten = Interp::with_vars(vec![("root", root.clone())]);
        let actual = rewritten.eval(&expr);
        let mut guarded = Interp::with_vars(vec![("root", root.clone())]);
        assert_eq!(actual, reference(&mut guarded, root, &steps), "{label}");
        assert_eq!(actual, Ok(expected), "{label}");
    }

    let expr = rewritten_expression("idx(root, p => p.a.b);");
    let steps = [Step::Get("a"), Step::Get("b")];
    for leaf in [Value::Num(0.0), Value::Str(String::new()), Value::Bool(false)] {
        let root = obj(vec![("a", obj(vec![("b", leaf.clone())]))]);
        let mut rewritten = Interp::with_vars(vec![("root", root.clone())]);
        let actual = rewritten.eval(&expr);
        let mut guarded = Interp::with_vars(vec![("root", root.clone())]);
        assert_eq!(actual, reference(&mut guarded, root, &steps), "{leaf:?}");
        assert_eq!(actual, Ok(leaf));
    }
}

#[test]
fn test_complete_chain_returns_final_value() {
    let expr = rewritten_expression("idx(root, p => p.a.b);");
    let mut interp = Interp::with_vars(vec![(
        "root",
        obj(vec![("a", obj(vec![("b", Value::Str("leaf".to_string()))]))]),
    )]);
    assert_eq!(interp.eval(&expr), Ok(Value::Str("leaf".to_string())));
}

#[test]
fn test_operands_are_evaluated_once() {
    let expr = rewritten_expression("idx(getRoot(), p => p.a[key()].f(g()).b);");
    let tree = obj(vec![(
        "a",
        obj(vec![("k", obj(vec![("f", func("f", obj(vec![("b", Value::Num(7.0))])))]))]),
    )]);
    let mut interp = Interp::with_vars(vec![
        ("getRoot", func("getRoot", tree)),
        ("key", func("key", Value::Str("k".to_string()))),
        ("g", func("g", Value::Num(1.0))),
    ]);

    assert_eq!(interp.eval(&expr), Ok(Value::Num(7.0)));
    for name in ["getRoot", "key", "f", "g"] {
        assert_eq!(interp.calls_to(name), 1, "{name}");
    }
}

#[test]
fn test_short_circuit_skips_later_operands() {
    let expr = rewritten_expression("idx(getRoot(), p => p.a[key()].f(g()).b);");
    let mut interp = Interp::with_vars(vec![
        ("getRoot", func("getRoot", obj(vec![("a", Value::Null)]))),
        ("key", func("key", Value::Str("k".to_string()))),
        ("g", func("g", Value::Num(1.0))),
    ]);

    assert_eq!(interp.eval(&expr), Ok(Value::Null));
    assert_eq!(interp.calls_to("getRoot"), 1);
    assert_eq!(interp.calls_to("key"), 0);
    assert_eq!(interp.calls_to("f"), 0);
    assert_eq!(interp.calls_to("g"), 0);
}

#[test]
fn test_unguarded_chain_would_throw() {
    // Sanity check for the evaluator itself
    let mut interp = Interp::with_vars(vec![("root", Value::Null)]);
    let plain = IRNode::prop(IRNode::prop(IRNode::id("root"), "a"), "b");
    assert!(interp.eval(&plain).is_err());
}

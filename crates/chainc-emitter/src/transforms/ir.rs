//! Lowered IR (Intermediate Representation) for Transforms
//!
//! Transforms produce a tree of `IRNode`s instead of strings; the
//! `IRPrinter` walks the tree and emits JavaScript. Parentheses are not
//! stored: the printer inserts them from operator precedence, so a transform
//! can nest expressions freely.
//!
//! `Parenthesized` exists only to carry parentheses the user wrote.

/// Intermediate Representation node for transformed JavaScript
#[derive(Debug, Clone, PartialEq)]
pub enum IRNode {
    // =========================================================================
    // Literals
    // =========================================================================
    /// Numeric literal, kept as written: `42`, `0x1F`
    NumericLiteral(String),

    /// String literal holding the cooked value; printed with double quotes
    StringLiteral(String),

    /// Boolean literal: `true`, `false`
    BooleanLiteral(bool),

    /// Null literal: `null`
    NullLiteral,

    /// Undefined: `void 0`
    Undefined,

    // =========================================================================
    // Identifiers
    // =========================================================================
    /// Identifier: `foo`, `_ref`
    Identifier(String),

    /// `this`
    This,

    // =========================================================================
    // Expressions
    // =========================================================================
    /// Binary expression: `left op right` (including `=`)
    BinaryExpr {
        left: Box<Self>,
        operator: String,
        right: Box<Self>,
    },

    /// Unary prefix expression: `!x`, `-x`, `typeof x`
    PrefixUnaryExpr {
        operator: String,
        operand: Box<Self>,
    },

    /// Call expression: `callee(args)`
    CallExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// Optional call: `callee?.(args)`
    OptionalCall {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// New expression: `new Callee(args)`
    NewExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
        explicit_arguments: bool,
    },

    /// Property access: `object.property`
    PropertyAccess { object: Box<Self>, property: String },

    /// Optional property access: `object?.property`
    OptionalPropertyAccess { object: Box<Self>, property: String },

    /// Element access: `object[index]`
    ElementAccess { object: Box<Self>, index: Box<Self> },

    /// Optional element access: `object?.[index]`
    OptionalElementAccess { object: Box<Self>, index: Box<Self> },

    /// Conditional expression: `cond ? then : else`
    ConditionalExpr {
        condition: Box<Self>,
        when_true: Box<Self>,
        when_false: Box<Self>,
    },

    /// Parenthesized expression written in source: `(expr)`
    Parenthesized(Box<Self>),

    /// Array literal: `[a, b, c]`
    ArrayLiteral(Vec<Self>),

    /// Array hole: the gap in `[a, , b]`
    OmittedExpression,

    /// Spread element: `...expr`
    SpreadElement(Box<Self>),

    /// Function expression: `function name(params) { body }`
    FunctionExpr {
        name: Option<String>,
        parameters: Vec<IRParam>,
        body: Vec<Self>,
    },

    /// Arrow function. `body` is a `Block` for block bodies, otherwise the
    /// concise body expression.
    ArrowFunction {
        parameters: Vec<IRParam>,
        body: Box<Self>,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    /// Variable statement: `var a = 1, b;`
    VarDeclList {
        keyword: DeclarationKind,
        declarations: Vec<IRDeclarator>,
    },

    /// Expression statement: `expr;`
    ExpressionStatement(Box<Self>),

    /// Return statement: `return expr;`
    ReturnStatement(Option<Box<Self>>),

    /// Block: `{ stmts }`
    Block(Vec<Self>),

    /// Empty statement: `;`
    EmptyStatement,

    // =========================================================================
    // Special
    // =========================================================================
    /// Source text copied through unchanged (binding patterns, recovery)
    Raw(String),

    /// Statements printed one per line (a program)
    Sequence(Vec<Self>),
}

/// `var`, `let` or `const`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl DeclarationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// One `name = initializer` entry of a variable statement
#[derive(Debug, Clone, PartialEq)]
pub struct IRDeclarator {
    pub name: String,
    pub initializer: Option<IRNode>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct IRParam {
    /// Identifier, or the source text of a binding pattern
    pub name: String,
    pub rest: bool,
    pub default_value: Option<Box<IRNode>>,
}

// =========================================================================
// Builder helpers for IR construction
// =========================================================================

impl IRNode {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringLiteral(s.into())
    }

    /// Create a numeric literal
    pub fn number(n: impl Into<String>) -> Self {
        Self::NumericLiteral(n.into())
    }

    /// Create a call expression
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::CallExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a property access
    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Create an element access
    pub fn elem(object: Self, index: Self) -> Self {
        Self::ElementAccess {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    /// Create a binary expression
    pub fn binary(left: Self, op: impl Into<String>, right: Self) -> Self {
        Self::BinaryExpr {
            left: Box::new(left),
            operator: op.into(),
            right: Box::new(right),
        }
    }

    /// Create an assignment expression
    pub fn assign(target: Self, value: Self) -> Self {
        Self::binary(target, "=", value)
    }

    /// Create `cond ? when_true : when_false`
    pub fn conditional(condition: Self, when_true: Self, when_false: Self) -> Self {
        Self::ConditionalExpr {
            condition: Box::new(condition),
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        }
    }

    /// Create a `var` statement with a single declarator
    pub fn var_decl(name: impl Into<String>, init: Option<Self>) -> Self {
        Self::VarDeclList {
            keyword: DeclarationKind::Var,
            declarations: vec![IRDeclarator {
                name: name.into(),
                initializer: init,
            }],
        }
    }

    /// Create `var a, b, c;` with no initializers
    pub fn var_names(names: impl IntoIterator<Item = String>) -> Self {
        Self::VarDeclList {
            keyword: DeclarationKind::Var,
            declarations: names
                .into_iter()
                .map(|name| IRDeclarator {
                    name,
                    initializer: None,
                })
                .collect(),
        }
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    /// Create a function expression
    pub const fn func_expr(name: Option<String>, params: Vec<IRParam>, body: Vec<Self>) -> Self {
        Self::FunctionExpr {
            name,
            parameters: params,
            body,
        }
    }

    /// Create an arrow function
    pub fn arrow(params: Vec<IRParam>, body: Self) -> Self {
        Self::ArrowFunction {
            parameters: params,
            body: Box::new(body),
        }
    }

    /// Create `this` reference
    pub const fn this() -> Self {
        Self::This
    }

    /// Create `void 0`
    pub const fn void_0() -> Self {
        Self::Undefined
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Self::Parenthesized(Box::new(self))
    }

    /// Create a block
    pub const fn block(stmts: Vec<Self>) -> Self {
        Self::Block(stmts)
    }

    /// Create an expression statement
    pub fn expr_stmt(expr: Self) -> Self {
        Self::ExpressionStatement(Box::new(expr))
    }

    /// Create an array literal
    pub const fn array(elements: Vec<Self>) -> Self {
        Self::ArrayLiteral(elements)
    }

    /// Create a sequence of statements
    pub const fn sequence(nodes: Vec<Self>) -> Self {
        Self::Sequence(nodes)
    }

    /// Create a new expression: `new Constructor(args)`
    pub fn new_expr(callee: Self, args: Vec<Self>, explicit_args: bool) -> Self {
        Self::NewExpr {
            callee: Box::new(callee),
            arguments: args,
            explicit_arguments: explicit_args,
        }
    }
}

impl IRParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: false,
            default_value: None,
        }
    }

    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: true,
            default_value: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: IRNode) -> Self {
        self.default_value = Some(Box::new(default));
        self
    }

    /// A plain identifier parameter that may be printed without parentheses
    /// as the single parameter of an arrow function.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        !self.rest
            && self.default_value.is_none()
            && !self.name.starts_with(['{', '['])
    }
}

//! AST to IR conversion.
//!
//! `AstToIr` copies a parsed program into `IRNode`s. On its own it is a
//! faithful copy (modulo formatting); a `SafeChainPass` attaches a call-site
//! rewriter so that recognised call sites are replaced while converting.
//!
//! Each function body (and the program) is a declaration scope: temporaries
//! requested by call sites inside it are hoisted into one `var` statement at
//! its top. Parameter defaults are converted before the body scope opens, so
//! their temporaries land in the enclosing scope.

use crate::safe_chain_pass::CallSiteRewriter;
use crate::transforms::ir::{DeclarationKind, IRDeclarator, IRNode, IRParam};
use crate::transforms::safe_chain::{ExpressionLowering, RewriteError, RewriteErrorKind};
use chainc_common::limits::MAX_LOWERING_DEPTH;
use chainc_parser::parser::{NodeArena, NodeIndex, NodeList, node_flags, syntax_kind_ext};
use chainc_scanner::{SyntaxKind, token_to_string};

/// Converts AST nodes to IR nodes.
pub struct AstToIr<'a> {
    pub(crate) arena: &'a NodeArena,
    depth: u32,
    /// First node where conversion gave up because of nesting depth
    depth_exceeded: Option<NodeIndex>,
    pub(crate) rewriter: Option<CallSiteRewriter<'a>>,
}

impl<'a> AstToIr<'a> {
    #[must_use]
    pub const fn new(arena: &'a NodeArena) -> Self {
        Self {
            arena,
            depth: 0,
            depth_exceeded: None,
            rewriter: None,
        }
    }

    #[must_use]
    pub(crate) fn with_rewriter(mut self, rewriter: CallSiteRewriter<'a>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    /// Node where the nesting limit was hit, if it was.
    pub(crate) const fn depth_exceeded(&self) -> Option<NodeIndex> {
        self.depth_exceeded
    }

    // =========================================================================
    // Program and statements
    // =========================================================================

    /// Convert a `SOURCE_FILE` node to a statement sequence.
    pub fn convert_source_file(&mut self, idx: NodeIndex) -> IRNode {
        let Some(file) = self
            .arena
            .get(idx)
            .and_then(|node| self.arena.get_source_file(node))
        else {
            return IRNode::sequence(Vec::new());
        };

        self.enter_var_scope();
        let statements = self.convert_statements(&file.statements);
        let temps = self.exit_var_scope();
        IRNode::sequence(with_hoisted_temps(temps, statements))
    }

    fn convert_statements(&mut self, statements: &NodeList) -> Vec<IRNode> {
        statements
            .iter()
            .map(|stmt| self.convert_statement(stmt))
            .collect()
    }

    /// Convert a statement node to IR
    pub fn convert_statement(&mut self, idx: NodeIndex) -> IRNode {
        let Some(node) = self.arena.get(idx) else {
            return IRNode::EmptyStatement;
        };

        match node.kind {
            k if k == syntax_kind_ext::VARIABLE_STATEMENT => {
                let Some(var) = self.arena.get_variable(node) else {
                    return IRNode::Raw(self.source_slice(idx));
                };
                let keyword = if node.flags & node_flags::CONST != 0 {
                    DeclarationKind::Const
                } else if node.flags & node_flags::LET != 0 {
                    DeclarationKind::Let
                } else {
                    DeclarationKind::Var
                };
                let declarations = var
                    .declarations
                    .iter()
                    .filter_map(|decl_idx| {
                        let decl = self
                            .arena
                            .get(decl_idx)
                            .and_then(|n| self.arena.get_variable_declaration(n))?;
                        let name = self.arena.identifier_text(decl.name)?.to_string();
                        let initializer = decl
                            .initializer
                            .is_some()
                            .then(|| self.convert_expression(decl.initializer));
                        Some(IRDeclarator { name, initializer })
                    })
                    .collect();
                IRNode::VarDeclList {
                    keyword,
                    declarations,
                }
            }
            k if k == syntax_kind_ext::EXPRESSION_STATEMENT => {
                match self.arena.get_expression_statement(node) {
                    Some(stmt) => IRNode::expr_stmt(self.convert_expression(stmt.expression)),
                    None => IRNode::Raw(self.source_slice(idx)),
                }
            }
            k if k == syntax_kind_ext::RETURN_STATEMENT => {
                let expression = self
                    .arena
                    .get_return_statement(node)
                    .map(|ret| ret.expression)
                    .filter(|expr| expr.is_some());
                IRNode::ret(expression.map(|expr| self.convert_expression(expr)))
            }
            k if k == syntax_kind_ext::BLOCK => match self.arena.get_block(node) {
                Some(block) => IRNode::block(self.convert_statements(&block.statements)),
                None => IRNode::block(Vec::new()),
            },
            k if k == syntax_kind_ext::EMPTY_STATEMENT => IRNode::EmptyStatement,
            _ => IRNode::Raw(self.source_slice(idx)),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Convert an expression node to IR
    pub fn convert_expression(&mut self, idx: NodeIndex) -> IRNode {
        if self.depth >= MAX_LOWERING_DEPTH {
            self.depth_exceeded.get_or_insert(idx);
            return IRNode::Raw(self.source_slice(idx));
        }
        self.depth += 1;
        let ir = self.convert_expression_inner(idx);
        self.depth -= 1;
        ir
    }

    fn convert_expression_inner(&mut self, idx: NodeIndex) -> IRNode {
        let Some(node) = self.arena.get(idx) else {
            return IRNode::Raw(String::new());
        };
        let optional = node.flags & node_flags::OPTIONAL_CHAIN != 0;

        match node.kind {
            k if k == SyntaxKind::Identifier as u16 => {
                IRNode::id(self.arena.identifier_text(idx).unwrap_or_default())
            }
            k if k == SyntaxKind::NumericLiteral as u16 => self
                .arena
                .get_literal(node)
                .map_or_else(|| IRNode::number("0"), |lit| IRNode::number(&lit.raw_text)),
            k if k == SyntaxKind::StringLiteral as u16 => self
                .arena
                .get_literal(node)
                .map_or_else(|| IRNode::string(""), |lit| IRNode::string(&lit.text)),
            k if k == SyntaxKind::ThisKeyword as u16 => IRNode::this(),
            k if k == SyntaxKind::NullKeyword as u16 => IRNode::NullLiteral,
            k if k == SyntaxKind::TrueKeyword as u16 => IRNode::BooleanLiteral(true),
            k if k == SyntaxKind::FalseKeyword as u16 => IRNode::BooleanLiteral(false),

            k if k == syntax_kind_ext::BINARY_EXPRESSION => {
                let Some(binary) = self.arena.get_binary_expr(node) else {
                    return IRNode::Raw(self.source_slice(idx));
                };
                let (left, right, operator) = (binary.left, binary.right, binary.operator_token);
                IRNode::binary(
                    self.convert_expression(left),
                    operator_text(operator),
                    self.convert_expression(right),
                )
            }
            k if k == syntax_kind_ext::PREFIX_UNARY_EXPRESSION => {
                let Some(unary) = self.arena.get_unary_expr(node) else {
                    return IRNode::Raw(self.source_slice(idx));
                };
                IRNode::PrefixUnaryExpr {
                    operator: operator_text(unary.operator).to_string(),
                    operand: Box::new(self.convert_expression(unary.operand)),
                }
            }

            k if k == syntax_kind_ext::CALL_EXPRESSION => {
                let Some(call) = self.arena.get_call_expr(node) else {
                    return IRNode::Raw(self.source_slice(idx));
                };
                if !optional && self.is_call_site(call.expression) {
                    return self.rewrite_call_site(idx);
                }
                let callee = Box::new(self.convert_expression(call.expression));
                let arguments = self.convert_arguments(call.arguments.as_ref());
                if optional {
                    IRNode::OptionalCall { callee, arguments }
                } else {
                    IRNode::CallExpr { callee, arguments }
                }
            }
            k if k == syntax_kind_ext::NEW_EXPRESSION => {
                let Some(call) = self.arena.get_call_expr(node) else {
                    return IRNode::Raw(self.source_slice(idx));
                };
                IRNode::new_expr(
                    self.convert_expression(call.expression),
                    self.convert_arguments(call.arguments.as_ref()),
                    call.arguments.is_some(),
                )
            }

            k if k == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                let Some(access) = self.arena.get_access_expr(node) else {
                    return IRNode::Raw(self.source_slice(idx));
                };
                let property = self
                    .arena
                    .identifier_text(access.name_or_argument)
                    .unwrap_or_default()
                    .to_string();
                let object = Box::new(self.convert_expression(access.expression));
                if optional {
                    IRNode::OptionalPropertyAccess { object, property }
                } else {
                    IRNode::PropertyAccess { object, property }
                }
            }
            k if k == syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => {
                let Some(access) = self.arena.get_access_expr(node) else {
                    return IRNode::Raw(self.source_slice(idx));
                };
                let object = Box::new(self.convert_expression(access.expression));
                let index = Box::new(self.convert_expression(access.name_or_argument));
                if optional {
                    IRNode::OptionalElementAccess { object, index }
                } else {
                    IRNode::ElementAccess { object, index }
                }
            }

            k if k == syntax_kind_ext::CONDITIONAL_EXPRESSION => {
                let Some(cond) = self.arena.get_conditional_expr(node) else {
                    return IRNode::Raw(self.source_slice(idx));
                };
                let (condition, when_true, when_false) =
                    (cond.condition, cond.when_true, cond.when_false);
                IRNode::conditional(
                    self.convert_expression(condition),
                    self.convert_expression(when_true),
                    self.convert_expression(when_false),
                )
            }
            k if k == syntax_kind_ext::PARENTHESIZED_EXPRESSION => {
                match self.arena.get_parenthesized(node) {
                    Some(paren) => self.convert_expression(paren.expression).paren(),
                    None => IRNode::Raw(self.source_slice(idx)),
                }
            }
            k if k == syntax_kind_ext::ARRAY_LITERAL_EXPRESSION => {
                let elements = self
                    .arena
                    .get_literal_expr(node)
                    .map(|lit| self.convert_arguments(Some(&lit.elements)))
                    .unwrap_or_default();
                IRNode::array(elements)
            }
            k if k == syntax_kind_ext::OMITTED_EXPRESSION => IRNode::OmittedExpression,
            k if k == syntax_kind_ext::SPREAD_ELEMENT => match self.arena.get_spread(node) {
                Some(spread) => {
                    IRNode::SpreadElement(Box::new(self.convert_expression(spread.expression)))
                }
                None => IRNode::Raw(self.source_slice(idx)),
            },

            k if k == syntax_kind_ext::FUNCTION_EXPRESSION => self.convert_function(idx, false),
            k if k == syntax_kind_ext::ARROW_FUNCTION => self.convert_function(idx, true),

            _ => IRNode::Raw(self.source_slice(idx)),
        }
    }

    fn convert_arguments(&mut self, arguments: Option<&NodeList>) -> Vec<IRNode> {
        arguments
            .map(|args| {
                args.iter()
                    .map(|arg| self.convert_expression(arg))
                    .collect()
            })
            .unwrap_or_default()
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn convert_function(&mut self, idx: NodeIndex, is_arrow: bool) -> IRNode {
        let Some(func) = self
            .arena
            .get(idx)
            .and_then(|node| self.arena.get_function(node))
        else {
            return IRNode::Raw(self.source_slice(idx));
        };

        let parameters: Vec<IRParam> = func
            .parameters
            .iter()
            .map(|param| self.convert_parameter(param))
            .collect();

        let body_is_block = self
            .arena
            .get(func.body)
            .is_some_and(|body| body.kind == syntax_kind_ext::BLOCK);

        self.enter_var_scope();
        let body = if body_is_block {
            let statements = self
                .arena
                .get(func.body)
                .and_then(|body| self.arena.get_block(body))
                .map(|block| self.convert_statements(&block.statements))
                .unwrap_or_default();
            let temps = self.exit_var_scope();
            with_hoisted_temps(temps, statements)
        } else {
            let expression = self.convert_expression(func.body);
            let temps = self.exit_var_scope();
            if temps.is_empty() {
                return IRNode::arrow(parameters, expression);
            }
            // A concise body cannot hold the declaration
            with_hoisted_temps(temps, vec![IRNode::ret(Some(expression))])
        };

        if is_arrow {
            IRNode::arrow(parameters, IRNode::block(body))
        } else {
            let name = self.arena.identifier_text(func.name).map(str::to_string);
            IRNode::func_expr(name, parameters, body)
        }
    }

    fn convert_parameter(&mut self, idx: NodeIndex) -> IRParam {
        let Some(param) = self
            .arena
            .get(idx)
            .and_then(|node| self.arena.get_parameter(node))
        else {
            return IRParam::new(self.source_slice(idx));
        };

        // Destructuring patterns are carried through as written
        let name = match self.arena.identifier_text(param.name) {
            Some(name) => name.to_string(),
            None => self.source_slice(param.name),
        };
        let mut ir_param = if param.dot_dot_dot_token {
            IRParam::rest(name)
        } else {
            IRParam::new(name)
        };
        if param.initializer.is_some() {
            let initializer = param.initializer;
            ir_param = ir_param.with_default(self.convert_expression(initializer));
        }
        ir_param
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Source text covered by `idx`.
    fn source_slice(&self, idx: NodeIndex) -> String {
        let span = self.arena.span_of(idx);
        self.arena
            .source_text()
            .map(|text| span.slice(text).to_string())
            .unwrap_or_default()
    }
}

impl ExpressionLowering for AstToIr<'_> {
    fn lower(&mut self, idx: NodeIndex) -> Result<IRNode, RewriteError> {
        // Only an overflow inside `idx` fails this operand
        let earlier = self.depth_exceeded.take();
        let ir = self.convert_expression(idx);
        let exceeded = std::mem::replace(&mut self.depth_exceeded, earlier);
        match exceeded {
            Some(node) => Err(RewriteError::new(RewriteErrorKind::NestingTooDeep, node, "")),
            None => Ok(ir),
        }
    }
}

fn with_hoisted_temps(temps: Vec<String>, mut body: Vec<IRNode>) -> Vec<IRNode> {
    if !temps.is_empty() {
        body.insert(0, IRNode::var_names(temps));
    }
    body
}

/// Printed form of an operator token stored as a `u16` kind.
fn operator_text(kind: u16) -> &'static str {
    const OPERATORS: &[SyntaxKind] = &[
        SyntaxKind::EqualsToken,
        SyntaxKind::BarBarToken,
        SyntaxKind::AmpersandAmpersandToken,
        SyntaxKind::QuestionQuestionToken,
        SyntaxKind::EqualsEqualsToken,
        SyntaxKind::ExclamationEqualsToken,
        SyntaxKind::EqualsEqualsEqualsToken,
        SyntaxKind::ExclamationEqualsEqualsToken,
        SyntaxKind::LessThanToken,
        SyntaxKind::GreaterThanToken,
        SyntaxKind::LessThanEqualsToken,
        SyntaxKind::GreaterThanEqualsToken,
        SyntaxKind::PlusToken,
        SyntaxKind::MinusToken,
        SyntaxKind::AsteriskToken,
        SyntaxKind::SlashToken,
        SyntaxKind::PercentToken,
        SyntaxKind::ExclamationToken,
        SyntaxKind::TypeOfKeyword,
        SyntaxKind::VoidKeyword,
    ];
    OPERATORS
        .iter()
        .find(|op| **op as u16 == kind)
        .and_then(|op| token_to_string(*op))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/ast_to_ir.rs"]
mod tests;

//! Thin Node Architecture
//!
//! Each node is a small fixed-size header (`Node`) holding kind, flags,
//! position, and an index into a typed data pool. The pools live on
//! `NodeArena`; the `get_*` accessors check the node kind before indexing so a
//! caller can never read a pool with the wrong node.
//!
//! The arena is read-only once parsing finishes: transforms never mutate it,
//! they produce a separate IR.

use super::base::{NodeIndex, NodeList};
use super::syntax_kind_ext::*;
use chainc_common::Span;
use chainc_scanner::SyntaxKind;
use std::sync::Arc;

/// A thin node header.
///
/// - `kind`: `SyntaxKind` value or a `syntax_kind_ext` constant
/// - `flags`: `node_flags` bits
/// - `pos`/`end`: byte offsets in source (token start, not full start)
/// - `data_index`: index into the kind's pool (`NO_DATA` = none)
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Node {
    pub kind: u16,
    pub flags: u16,
    pub pos: u32,
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.pos, self.end)
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind as u16
    }
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Data for identifier nodes
#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data for string and numeric literals
#[derive(Clone, Debug)]
pub struct LiteralData {
    /// Cooked value (string contents without quotes, or numeric source text)
    pub text: String,
    /// Source text including quotes
    pub raw_text: String,
}

/// Data for binary and assignment expressions
#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16, // SyntaxKind
    pub right: NodeIndex,
}

/// Data for prefix unary expressions
#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator: u16, // SyntaxKind
    pub operand: NodeIndex,
}

/// Data for call/new expressions
#[derive(Clone, Debug)]
pub struct CallExprData {
    pub expression: NodeIndex,
    /// `None` only for `new Foo` without an argument list
    pub arguments: Option<NodeList>,
}

/// Data for property/element access
#[derive(Clone, Debug)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}

/// Data for conditional expressions (`a ? b : c`)
#[derive(Clone, Debug)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Data for parenthesized expressions
#[derive(Clone, Debug)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

/// Data for function expressions and arrow functions
#[derive(Clone, Debug)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// A `BLOCK` node, or any expression for concise arrow bodies
    pub body: NodeIndex,
    pub equals_greater_than_token: bool,
}

/// Data for parameters
#[derive(Clone, Debug)]
pub struct ParameterData {
    pub dot_dot_dot_token: bool,
    /// Identifier or binding pattern
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for object/array binding patterns
#[derive(Clone, Debug)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

/// Data for binding elements (`a`, `b: c = 1`, `...rest`)
#[derive(Clone, Debug)]
pub struct BindingElementData {
    pub dot_dot_dot_token: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for array literals
#[derive(Clone, Debug)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

/// Data for spread elements
#[derive(Clone, Debug)]
pub struct SpreadData {
    pub expression: NodeIndex,
}

/// Data for blocks
#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Data for variable statements (`var`/`let`/`const`; see `node_flags`)
#[derive(Clone, Debug)]
pub struct VariableData {
    pub declarations: NodeList,
}

/// Data for a single variable declaration
#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for expression statements
#[derive(Clone, Debug)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

/// Data for return statements
#[derive(Clone, Debug)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

/// Data for the source file root
#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub file_name: String,
    pub text: Arc<str>,
    pub statements: NodeList,
}

// =============================================================================
// Arena
// =============================================================================

#[derive(Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub functions: Vec<FunctionData>,
    pub parameters: Vec<ParameterData>,
    pub binding_patterns: Vec<BindingPatternData>,
    pub binding_elements: Vec<BindingElementData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub spread_data: Vec<SpreadData>,
    pub blocks: Vec<BlockData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub return_data: Vec<ReturnData>,
    pub source_files: Vec<SourceFileData>,
}

impl NodeArena {
    /// Get a thin node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get identifier data for a node.
    /// Returns None if node is not an identifier or has no data.
    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.is(SyntaxKind::Identifier) {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get literal data for a node.
    #[inline]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        if node.has_data()
            && (node.is(SyntaxKind::StringLiteral) || node.is(SyntaxKind::NumericLiteral))
        {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get binary expression data (including assignments).
    #[inline]
    pub fn get_binary_expr(&self, node: &Node) -> Option<&BinaryExprData> {
        if node.has_data() && node.kind == BINARY_EXPRESSION {
            self.binary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get prefix unary expression data.
    #[inline]
    pub fn get_unary_expr(&self, node: &Node) -> Option<&UnaryExprData> {
        if node.has_data() && node.kind == PREFIX_UNARY_EXPRESSION {
            self.unary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get call expression data (call or new).
    #[inline]
    pub fn get_call_expr(&self, node: &Node) -> Option<&CallExprData> {
        if node.has_data() && (node.kind == CALL_EXPRESSION || node.kind == NEW_EXPRESSION) {
            self.call_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get access expression data (property access or element access).
    #[inline]
    pub fn get_access_expr(&self, node: &Node) -> Option<&AccessExprData> {
        if node.has_data()
            && (node.kind == PROPERTY_ACCESS_EXPRESSION || node.kind == ELEMENT_ACCESS_EXPRESSION)
        {
            self.access_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get conditional expression data (ternary: a ? b : c).
    #[inline]
    pub fn get_conditional_expr(&self, node: &Node) -> Option<&ConditionalExprData> {
        if node.has_data() && node.kind == CONDITIONAL_EXPRESSION {
            self.conditional_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_parenthesized(&self, node: &Node) -> Option<&ParenthesizedData> {
        if node.has_data() && node.kind == PARENTHESIZED_EXPRESSION {
            self.parenthesized.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get function data (function expression or arrow function).
    #[inline]
    pub fn get_function(&self, node: &Node) -> Option<&FunctionData> {
        if node.has_data() && (node.kind == FUNCTION_EXPRESSION || node.kind == ARROW_FUNCTION) {
            self.functions.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_parameter(&self, node: &Node) -> Option<&ParameterData> {
        if node.has_data() && node.kind == PARAMETER {
            self.parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binding_pattern(&self, node: &Node) -> Option<&BindingPatternData> {
        if node.has_data()
            && (node.kind == OBJECT_BINDING_PATTERN || node.kind == ARRAY_BINDING_PATTERN)
        {
            self.binding_patterns.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binding_element(&self, node: &Node) -> Option<&BindingElementData> {
        if node.has_data() && node.kind == BINDING_ELEMENT {
            self.binding_elements.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get array literal data.
    #[inline]
    pub fn get_literal_expr(&self, node: &Node) -> Option<&LiteralExprData> {
        if node.has_data() && node.kind == ARRAY_LITERAL_EXPRESSION {
            self.literal_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_spread(&self, node: &Node) -> Option<&SpreadData> {
        if node.has_data() && node.kind == SPREAD_ELEMENT {
            self.spread_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_block(&self, node: &Node) -> Option<&BlockData> {
        if node.has_data() && node.kind == BLOCK {
            self.blocks.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable(&self, node: &Node) -> Option<&VariableData> {
        if node.has_data() && node.kind == VARIABLE_STATEMENT {
            self.variables.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable_declaration(&self, node: &Node) -> Option<&VariableDeclarationData> {
        if node.has_data() && node.kind == VARIABLE_DECLARATION {
            self.variable_declarations.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_expression_statement(&self, node: &Node) -> Option<&ExprStatementData> {
        if node.has_data() && node.kind == EXPRESSION_STATEMENT {
            self.expr_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_return_statement(&self, node: &Node) -> Option<&ReturnData> {
        if node.has_data() && node.kind == RETURN_STATEMENT {
            self.return_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_source_file(&self, node: &Node) -> Option<&SourceFileData> {
        if node.has_data() && node.kind == SOURCE_FILE {
            self.source_files.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Identifier text of `idx`, if it is an identifier.
    pub fn identifier_text(&self, idx: NodeIndex) -> Option<&str> {
        let node = self.get(idx)?;
        self.get_identifier(node)
            .map(|ident| ident.escaped_text.as_str())
    }

    /// Span of `idx`, or an empty span for `NodeIndex::NONE`.
    pub fn span_of(&self, idx: NodeIndex) -> Span {
        self.get(idx).map_or(Span::default(), Node::span)
    }

    /// Source text of the (single) source file, if one has been parsed.
    pub fn source_text(&self) -> Option<&str> {
        self.source_files.first().map(|file| &*file.text)
    }

    /// Direct children of a node in source order.
    pub fn get_children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(idx) else {
            return Vec::new();
        };
        let mut children = Vec::new();
        let mut push = |child: NodeIndex| {
            if child.is_some() {
                children.push(child);
            }
        };

        match node.kind {
            k if k == BINARY_EXPRESSION => {
                if let Some(data) = self.get_binary_expr(node) {
                    push(data.left);
                    push(data.right);
                }
            }
            k if k == PREFIX_UNARY_EXPRESSION => {
                if let Some(data) = self.get_unary_expr(node) {
                    push(data.operand);
                }
            }
            k if k == CALL_EXPRESSION || k == NEW_EXPRESSION => {
                if let Some(data) = self.get_call_expr(node) {
                    push(data.expression);
                    if let Some(args) = &data.arguments {
                        args.iter().for_each(&mut push);
                    }
                }
            }
            k if k == PROPERTY_ACCESS_EXPRESSION || k == ELEMENT_ACCESS_EXPRESSION => {
                if let Some(data) = self.get_access_expr(node) {
                    push(data.expression);
                    push(data.name_or_argument);
                }
            }
            k if k == CONDITIONAL_EXPRESSION => {
                if let Some(data) = self.get_conditional_expr(node) {
                    push(data.condition);
                    push(data.when_true);
                    push(data.when_false);
                }
            }
            k if k == PARENTHESIZED_EXPRESSION => {
                if let Some(data) = self.get_parenthesized(node) {
                    push(data.expression);
                }
            }
            k if k == FUNCTION_EXPRESSION || k == ARROW_FUNCTION => {
                if let Some(data) = self.get_function(node) {
                    push(data.name);
                    data.parameters.iter().for_each(&mut push);
                    push(data.body);
                }
            }
            k if k == PARAMETER => {
                if let Some(data) = self.get_parameter(node) {
                    push(data.name);
                    push(data.initializer);
                }
            }
            k if k == OBJECT_BINDING_PATTERN || k == ARRAY_BINDING_PATTERN => {
                if let Some(data) = self.get_binding_pattern(node) {
                    data.elements.iter().for_each(&mut push);
                }
            }
            k if k == BINDING_ELEMENT => {
                if let Some(data) = self.get_binding_element(node) {
                    push(data.property_name);
                    push(data.name);
                    push(data.initializer);
                }
            }
            k if k == ARRAY_LITERAL_EXPRESSION => {
                if let Some(data) = self.get_literal_expr(node) {
                    data.elements.iter().for_each(&mut push);
                }
            }
            k if k == SPREAD_ELEMENT => {
                if let Some(data) = self.get_spread(node) {
                    push(data.expression);
                }
            }
            k if k == BLOCK => {
                if let Some(data) = self.get_block(node) {
                    data.statements.iter().for_each(&mut push);
                }
            }
            k if k == VARIABLE_STATEMENT => {
                if let Some(data) = self.get_variable(node) {
                    data.declarations.iter().for_each(&mut push);
                }
            }
            k if k == VARIABLE_DECLARATION => {
                if let Some(data) = self.get_variable_declaration(node) {
                    push(data.name);
                    push(data.initializer);
                }
            }
            k if k == EXPRESSION_STATEMENT => {
                if let Some(data) = self.get_expression_statement(node) {
                    push(data.expression);
                }
            }
            k if k == RETURN_STATEMENT => {
                if let Some(data) = self.get_return_statement(node) {
                    push(data.expression);
                }
            }
            k if k == SOURCE_FILE => {
                if let Some(data) = self.get_source_file(node) {
                    data.statements.iter().for_each(&mut push);
                }
            }
            _ => {}
        }

        children
    }
}

//! NodeArena creation methods (add_* methods).

use super::base::NodeIndex;
use super::node::*;
use super::node_flags;
use chainc_scanner::SyntaxKind;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for a source of `text_len` bytes.
    pub fn with_capacity(text_len: usize) -> NodeArena {
        // Roughly one node per four bytes of JavaScript
        let capacity = text_len / 4;
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(capacity);
        arena.identifiers = Vec::with_capacity(capacity / 3);
        arena.access_exprs = Vec::with_capacity(capacity / 8);
        arena.call_exprs = Vec::with_capacity(capacity / 8);
        arena.source_files = Vec::with_capacity(1);
        arena
    }

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeIndex(index)
    }

    /// Add a data-less node (keywords used as expressions, empty statements).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    /// OR `flags` into an existing node's flags.
    pub fn set_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.nodes.get_mut(index.0 as usize) {
            node.flags |= flags;
        }
    }

    /// Add an empty identifier standing in for a node that failed to parse.
    pub fn add_missing(&mut self, pos: u32) -> NodeIndex {
        let index = self.add_identifier(pos, pos, String::new());
        self.set_flags(index, node_flags::MISSING);
        index
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, escaped_text: String) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData { escaped_text });
        self.push_node(Node::with_data(
            SyntaxKind::Identifier as u16,
            pos,
            end,
            data_index,
        ))
    }

    /// Add a string or numeric literal node.
    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_binary_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: BinaryExprData,
    ) -> NodeIndex {
        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_unary_expr(&mut self, kind: u16, pos: u32, end: u32, data: UnaryExprData) -> NodeIndex {
        let data_index = self.unary_exprs.len() as u32;
        self.unary_exprs.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_call_expr(&mut self, kind: u16, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        let data_index = self.call_exprs.len() as u32;
        self.call_exprs.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_access_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: AccessExprData,
    ) -> NodeIndex {
        let data_index = self.access_exprs.len() as u32;
        self.access_exprs.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_conditional_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ConditionalExprData,
    ) -> NodeIndex {
        let data_index = self.conditional_exprs.len() as u32;
        self.conditional_exprs.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_parenthesized(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ParenthesizedData,
    ) -> NodeIndex {
        let data_index = self.parenthesized.len() as u32;
        self.parenthesized.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_function(&mut self, kind: u16, pos: u32, end: u32, data: FunctionData) -> NodeIndex {
        let data_index = self.functions.len() as u32;
        self.functions.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_parameter(&mut self, kind: u16, pos: u32, end: u32, data: ParameterData) -> NodeIndex {
        let data_index = self.parameters.len() as u32;
        self.parameters.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_binding_pattern(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: BindingPatternData,
    ) -> NodeIndex {
        let data_index = self.binding_patterns.len() as u32;
        self.binding_patterns.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_binding_element(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: BindingElementData,
    ) -> NodeIndex {
        let data_index = self.binding_elements.len() as u32;
        self.binding_elements.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_literal_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: LiteralExprData,
    ) -> NodeIndex {
        let data_index = self.literal_exprs.len() as u32;
        self.literal_exprs.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_spread(&mut self, kind: u16, pos: u32, end: u32, data: SpreadData) -> NodeIndex {
        let data_index = self.spread_data.len() as u32;
        self.spread_data.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_block(&mut self, kind: u16, pos: u32, end: u32, data: BlockData) -> NodeIndex {
        let data_index = self.blocks.len() as u32;
        self.blocks.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_variable(&mut self, kind: u16, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        let data_index = self.variables.len() as u32;
        self.variables.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_variable_declaration(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: VariableDeclarationData,
    ) -> NodeIndex {
        let data_index = self.variable_declarations.len() as u32;
        self.variable_declarations.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_expr_statement(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ExprStatementData,
    ) -> NodeIndex {
        let data_index = self.expr_statements.len() as u32;
        self.expr_statements.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_return(&mut self, kind: u16, pos: u32, end: u32, data: ReturnData) -> NodeIndex {
        let data_index = self.return_data.len() as u32;
        self.return_data.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_source_file(&mut self, kind: u16, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }
}

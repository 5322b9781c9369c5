//! IR Printer - Emits JavaScript from IR nodes
//!
//! Parentheses are derived from operator precedence: an operand is wrapped
//! only when its own precedence is lower than its position requires.
//! Statements are printed one per line with four-space indentation.

use super::ir::{IRDeclarator, IRNode, IRParam};

mod precedence {
    pub const ASSIGNMENT: u8 = 2;
    pub const CONDITIONAL: u8 = 3;
    pub const COALESCE: u8 = 4;
    pub const LOGICAL_OR: u8 = 5;
    pub const LOGICAL_AND: u8 = 6;
    pub const EQUALITY: u8 = 10;
    pub const RELATIONAL: u8 = 11;
    pub const ADDITIVE: u8 = 13;
    pub const MULTIPLICATIVE: u8 = 14;
    pub const UNARY: u8 = 16;
    /// `new Foo` without an argument list
    pub const NEW_WITHOUT_ARGUMENTS: u8 = 17;
    /// Member access, calls, `new Foo()`
    pub const MEMBER: u8 = 18;
    pub const PRIMARY: u8 = 20;
}

const INDENT_UNIT: &str = "    ";

/// Printer that converts IR nodes to JavaScript source.
#[derive(Default)]
pub struct IRPrinter {
    output: String,
    indent_level: u32,
}

impl IRPrinter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a node and return the printed text.
    #[must_use]
    pub fn emit_to_string(node: &IRNode) -> String {
        let mut printer = Self::new();
        printer.emit(node);
        printer.output
    }

    pub fn emit(&mut self, node: &IRNode) {
        self.emit_node(node);
    }

    #[must_use]
    pub fn get_output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn take_output(self) -> String {
        self.output
    }

    // =========================================================================
    // Writer
    // =========================================================================

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT_UNIT);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn emit_node(&mut self, node: &IRNode) {
        match node {
            IRNode::Sequence(statements) => {
                for (i, statement) in statements.iter().enumerate() {
                    if i > 0 {
                        self.write_line();
                        self.write_indent();
                    }
                    self.emit_node(statement);
                }
            }
            IRNode::VarDeclList {
                keyword,
                declarations,
            } => {
                self.write(keyword.as_str());
                self.write(" ");
                self.emit_declarators(declarations);
                self.write(";");
            }
            IRNode::ExpressionStatement(expr) => {
                // A leading `function` keyword would start a declaration
                if starts_with_function_keyword(expr) {
                    self.write("(");
                    self.emit_expression(expr, precedence::ASSIGNMENT);
                    self.write(")");
                } else {
                    self.emit_expression(expr, precedence::ASSIGNMENT);
                }
                self.write(";");
            }
            IRNode::ReturnStatement(expr) => {
                self.write("return");
                if let Some(expr) = expr {
                    self.write(" ");
                    self.emit_expression(expr, precedence::ASSIGNMENT);
                }
                self.write(";");
            }
            IRNode::Block(statements) => self.emit_block(statements),
            IRNode::EmptyStatement => self.write(";"),
            _ => self.emit_expression(node, 0),
        }
    }

    fn emit_block(&mut self, statements: &[IRNode]) {
        if statements.is_empty() {
            self.write("{ }");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for statement in statements {
            self.write_indent();
            self.emit_node(statement);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_declarators(&mut self, declarations: &[IRDeclarator]) {
        for (i, declarator) in declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&declarator.name);
            if let Some(init) = &declarator.initializer {
                self.write(" = ");
                self.emit_expression(init, precedence::ASSIGNMENT);
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Emit `node`, parenthesized if it binds looser than `min_precedence`.
    fn emit_expression(&mut self, node: &IRNode, min_precedence: u8) {
        if expression_precedence(node) < min_precedence {
            self.write("(");
            self.emit_expression_inner(node);
            self.write(")");
        } else {
            self.emit_expression_inner(node);
        }
    }

    fn emit_expression_inner(&mut self, node: &IRNode) {
        match node {
            IRNode::NumericLiteral(text) => self.write(text),
            IRNode::StringLiteral(value) => {
                let quoted = quote_string(value);
                self.write(&quoted);
            }
            IRNode::BooleanLiteral(true) => self.write("true"),
            IRNode::BooleanLiteral(false) => self.write("false"),
            IRNode::NullLiteral => self.write("null"),
            IRNode::Undefined => self.write("void 0"),
            IRNode::Identifier(name) => self.write(name),
            IRNode::This => self.write("this"),

            IRNode::BinaryExpr {
                left,
                operator,
                right,
            } => self.emit_binary(left, operator, right),

            IRNode::PrefixUnaryExpr { operator, operand } => {
                self.write(operator);
                if operator.chars().all(|c| c.is_ascii_alphabetic()) {
                    self.write(" ");
                } else if let IRNode::PrefixUnaryExpr {
                    operator: inner, ..
                } = operand.as_ref()
                    && (operator == "-" || operator == "+")
                    && inner == operator
                {
                    // `- -x`, not `--x`
                    self.write(" ");
                }
                self.emit_expression(operand, precedence::UNARY);
            }

            IRNode::CallExpr { callee, arguments } => {
                self.emit_expression(callee, precedence::MEMBER);
                self.emit_arguments(arguments);
            }
            IRNode::OptionalCall { callee, arguments } => {
                self.emit_expression(callee, precedence::MEMBER);
                self.write("?.");
                self.emit_arguments(arguments);
            }
            IRNode::NewExpr {
                callee,
                arguments,
                explicit_arguments,
            } => {
                self.write("new ");
                if contains_call_in_member_chain(callee) {
                    self.write("(");
                    self.emit_expression(callee, 0);
                    self.write(")");
                } else {
                    self.emit_expression(callee, precedence::MEMBER);
                }
                if *explicit_arguments || !arguments.is_empty() {
                    self.emit_arguments(arguments);
                }
            }

            IRNode::PropertyAccess { object, property } => {
                self.emit_member_object(object);
                self.write(".");
                self.write(property);
            }
            IRNode::OptionalPropertyAccess { object, property } => {
                self.emit_member_object(object);
                self.write("?.");
                self.write(property);
            }
            IRNode::ElementAccess { object, index } => {
                self.emit_member_object(object);
                self.write("[");
                self.emit_expression(index, 0);
                self.write("]");
            }
            IRNode::OptionalElementAccess { object, index } => {
                self.emit_member_object(object);
                self.write("?.[");
                self.emit_expression(index, 0);
                self.write("]");
            }

            IRNode::ConditionalExpr {
                condition,
                when_true,
                when_false,
            } => {
                self.emit_expression(condition, precedence::COALESCE);
                self.write(" ? ");
                self.emit_expression(when_true, precedence::ASSIGNMENT);
                self.write(" : ");
                self.emit_expression(when_false, precedence::ASSIGNMENT);
            }

            IRNode::Parenthesized(inner) => {
                self.write("(");
                self.emit_expression(inner, 0);
                self.write(")");
            }

            IRNode::ArrayLiteral(elements) => {
                self.write("[");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(element, precedence::ASSIGNMENT);
                }
                // A trailing hole needs its own comma: `[a, ,]`
                if matches!(elements.last(), Some(IRNode::OmittedExpression)) {
                    self.write(",");
                }
                self.write("]");
            }
            IRNode::OmittedExpression => {}
            IRNode::SpreadElement(expr) => {
                self.write("...");
                self.emit_expression(expr, precedence::ASSIGNMENT);
            }

            IRNode::FunctionExpr {
                name,
                parameters,
                body,
            } => {
                self.write("function ");
                if let Some(name) = name {
                    self.write(name);
                }
                self.write("(");
                self.emit_parameters(parameters);
                self.write(") ");
                self.emit_block(body);
            }
            IRNode::ArrowFunction { parameters, body } => {
                match parameters.as_slice() {
                    [single] if single.is_simple() => self.write(&single.name),
                    _ => {
                        self.write("(");
                        self.emit_parameters(parameters);
                        self.write(")");
                    }
                }
                self.write(" => ");
                match body.as_ref() {
                    IRNode::Block(statements) => self.emit_block(statements),
                    expr => self.emit_expression(expr, precedence::ASSIGNMENT),
                }
            }

            IRNode::Raw(text) => self.write(text),

            // Statements in expression position (not produced by transforms)
            IRNode::VarDeclList { .. }
            | IRNode::ExpressionStatement(_)
            | IRNode::ReturnStatement(_)
            | IRNode::Block(_)
            | IRNode::EmptyStatement
            | IRNode::Sequence(_) => self.emit_node(node),
        }
    }

    fn emit_binary(&mut self, left: &IRNode, operator: &str, right: &IRNode) {
        let prec = binary_precedence(operator);
        if operator == "=" {
            // Right-associative
            self.emit_expression(left, precedence::MEMBER);
            self.write(" = ");
            self.emit_expression(right, precedence::ASSIGNMENT);
            return;
        }

        self.emit_binary_operand(left, operator, prec);
        self.write(" ");
        self.write(operator);
        self.write(" ");
        self.emit_binary_operand(right, operator, prec + 1);
    }

    fn emit_binary_operand(&mut self, operand: &IRNode, operator: &str, min_precedence: u8) {
        // `??` cannot be mixed with `||`/`&&` without parentheses
        if mixes_coalesce_with_logical(operator, operand) {
            self.write("(");
            self.emit_expression(operand, 0);
            self.write(")");
        } else {
            self.emit_expression(operand, min_precedence);
        }
    }

    fn emit_member_object(&mut self, object: &IRNode) {
        // `1.toString` would lex as a decimal point
        if let IRNode::NumericLiteral(text) = object
            && text.bytes().all(|b| b.is_ascii_digit() || b == b'_')
        {
            self.write("(");
            self.write(text);
            self.write(")");
            return;
        }
        self.emit_expression(object, precedence::MEMBER);
    }

    fn emit_arguments(&mut self, arguments: &[IRNode]) {
        self.write("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(argument, precedence::ASSIGNMENT);
        }
        self.write(")");
    }

    fn emit_parameters(&mut self, parameters: &[IRParam]) {
        for (i, param) in parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.rest {
                self.write("...");
            }
            self.write(&param.name);
            if let Some(default) = &param.default_value {
                self.write(" = ");
                self.emit_expression(default, precedence::ASSIGNMENT);
            }
        }
    }
}

/// Precedence of an expression node; higher binds tighter.
fn expression_precedence(node: &IRNode) -> u8 {
    match node {
        IRNode::BinaryExpr { operator, .. } => binary_precedence(operator),
        IRNode::ConditionalExpr { .. } => precedence::CONDITIONAL,
        IRNode::ArrowFunction { .. } | IRNode::SpreadElement(_) => precedence::ASSIGNMENT,
        IRNode::PrefixUnaryExpr { .. } => precedence::UNARY,
        IRNode::NewExpr {
            explicit_arguments,
            arguments,
            ..
        } if !*explicit_arguments && arguments.is_empty() => precedence::NEW_WITHOUT_ARGUMENTS,
        IRNode::NewExpr { .. }
        | IRNode::CallExpr { .. }
        | IRNode::OptionalCall { .. }
        | IRNode::PropertyAccess { .. }
        | IRNode::OptionalPropertyAccess { .. }
        | IRNode::ElementAccess { .. }
        | IRNode::OptionalElementAccess { .. } => precedence::MEMBER,
        // `void 0` is a unary expression
        IRNode::Undefined => precedence::UNARY,
        _ => precedence::PRIMARY,
    }
}

fn binary_precedence(operator: &str) -> u8 {
    match operator {
        "=" => precedence::ASSIGNMENT,
        "??" => precedence::COALESCE,
        "||" => precedence::LOGICAL_OR,
        "&&" => precedence::LOGICAL_AND,
        "==" | "!=" | "===" | "!==" => precedence::EQUALITY,
        "<" | ">" | "<=" | ">=" => precedence::RELATIONAL,
        "+" | "-" => precedence::ADDITIVE,
        "*" | "/" | "%" => precedence::MULTIPLICATIVE,
        _ => precedence::ASSIGNMENT,
    }
}

fn mixes_coalesce_with_logical(operator: &str, operand: &IRNode) -> bool {
    let IRNode::BinaryExpr {
        operator: inner, ..
    } = operand
    else {
        return false;
    };
    let is_logical = |op: &str| op == "||" || op == "&&";
    (operator == "??" && is_logical(inner)) || (is_logical(operator) && inner == "??")
}

/// Whether the printed expression would begin with `function`.
fn starts_with_function_keyword(node: &IRNode) -> bool {
    match node {
        IRNode::FunctionExpr { .. } => true,
        IRNode::CallExpr { callee, .. } | IRNode::OptionalCall { callee, .. } => {
            starts_with_function_keyword(callee)
        }
        IRNode::PropertyAccess { object, .. }
        | IRNode::OptionalPropertyAccess { object, .. }
        | IRNode::ElementAccess { object, .. }
        | IRNode::OptionalElementAccess { object, .. } => starts_with_function_keyword(object),
        IRNode::BinaryExpr { left, .. } => starts_with_function_keyword(left),
        IRNode::ConditionalExpr { condition, .. } => starts_with_function_keyword(condition),
        _ => false,
    }
}

/// `new (a.b())()` needs parentheses or the call's arguments bind to `new`.
fn contains_call_in_member_chain(node: &IRNode) -> bool {
    match node {
        IRNode::CallExpr { .. } | IRNode::OptionalCall { .. } => true,
        IRNode::PropertyAccess { object, .. }
        | IRNode::OptionalPropertyAccess { object, .. }
        | IRNode::ElementAccess { object, .. }
        | IRNode::OptionalElementAccess { object, .. } => contains_call_in_member_chain(object),
        _ => false,
    }
}

/// Quote a cooked string value as a double-quoted JavaScript literal.
fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                quoted.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[path = "../../tests/ir_printer.rs"]
mod tests;

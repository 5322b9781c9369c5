//! Expression parsing.
//!
//! Precedence, loosest first: assignment and arrow functions, conditional,
//! binary operators (precedence climbing), prefix unary, then
//! left-hand-side expressions (member access, calls, `new`) and primaries.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::ParserState;
use super::{node_flags, syntax_kind_ext};
use chainc_common::diagnostic_messages;
use chainc_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Entry points
    // =========================================================================

    /// Parse an expression (general entry point).
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        self.parse_assignment_expression()
    }

    /// Parse `a = b`, an arrow function, or a conditional expression.
    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.arena.add_missing(self.token_pos());
        }

        let result = if self.look_ahead_is_arrow_function() {
            self.parse_arrow_function()
        } else {
            let start_pos = self.token_pos();
            let left = self.parse_conditional_expression();
            if self.is_token(SyntaxKind::EqualsToken) {
                self.next_token();
                let right = self.parse_assignment_expression();
                self.arena.add_binary_expr(
                    syntax_kind_ext::BINARY_EXPRESSION,
                    start_pos,
                    self.prev_token_end(),
                    BinaryExprData {
                        left,
                        operator_token: SyntaxKind::EqualsToken as u16,
                        right,
                    },
                )
            } else {
                left
            }
        };

        self.exit_recursion();
        result
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let condition = self.parse_binary_expression(1);
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }

        let when_true = self.parse_assignment_expression();
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();

        self.arena.add_conditional_expr(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    // =========================================================================
    // Binary and unary expressions
    // =========================================================================

    /// Parse a binary expression with precedence climbing.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut left = self.parse_unary_expression();

        loop {
            let precedence = binary_operator_precedence(self.token());
            if precedence == 0 || precedence < min_precedence {
                break;
            }

            let operator = self.token();
            self.next_token();
            let right = self.parse_binary_expression(precedence + 1);

            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.prev_token_end(),
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }

        left
    }

    /// Parse `!x`, `-x`, `+x`, `typeof x`, `void x`.
    fn parse_unary_expression(&mut self) -> NodeIndex {
        if !is_unary_operator(self.token()) {
            return self.parse_left_hand_side_expression();
        }
        if !self.enter_recursion() {
            return self.arena.add_missing(self.token_pos());
        }

        let start_pos = self.token_pos();
        let operator = self.token();
        self.next_token();
        let operand = self.parse_unary_expression();
        self.exit_recursion();

        self.arena.add_unary_expr(
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            UnaryExprData {
                operator: operator as u16,
                operand,
            },
        )
    }

    // =========================================================================
    // Left-hand-side expressions
    // =========================================================================

    fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_member_and_call_tail(start_pos, expression, true)
    }

    /// `new Callee(args)`; the callee is a member expression without calls.
    fn parse_new_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword);

        let callee_start = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_member_and_call_tail(callee_start, callee, false);

        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };

        self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            CallExprData {
                expression,
                arguments,
            },
        )
    }

    fn parse_member_and_call_tail(
        &mut self,
        start_pos: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    expression = self.parse_property_access(start_pos, expression, false);
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenBracketToken => {
                            self.parse_element_access(start_pos, expression, true)
                        }
                        SyntaxKind::OpenParenToken => self.parse_call(start_pos, expression, true),
                        _ => self.parse_property_access(start_pos, expression, true),
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.parse_element_access(start_pos, expression, false);
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    expression = self.parse_call(start_pos, expression, false);
                }
                _ => break,
            }
        }
        expression
    }

    /// Parse the name after `.` or `?.`.
    fn parse_property_access(
        &mut self,
        start_pos: u32,
        expression: NodeIndex,
        question_dot: bool,
    ) -> NodeIndex {
        let name = self.parse_identifier_name();
        let access = self.arena.add_access_expr(
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            AccessExprData {
                expression,
                name_or_argument: name,
                question_dot_token: question_dot,
            },
        );
        if question_dot {
            self.arena.set_flags(access, node_flags::OPTIONAL_CHAIN);
        }
        access
    }

    fn parse_element_access(
        &mut self,
        start_pos: u32,
        expression: NodeIndex,
        question_dot: bool,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let argument = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseBracketToken);

        let access = self.arena.add_access_expr(
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            AccessExprData {
                expression,
                name_or_argument: argument,
                question_dot_token: question_dot,
            },
        );
        if question_dot {
            self.arena.set_flags(access, node_flags::OPTIONAL_CHAIN);
        }
        access
    }

    fn parse_call(&mut self, start_pos: u32, expression: NodeIndex, question_dot: bool) -> NodeIndex {
        let arguments = self.parse_argument_list();
        let call = self.arena.add_call_expr(
            syntax_kind_ext::CALL_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            CallExprData {
                expression,
                arguments: Some(arguments),
            },
        );
        if question_dot {
            self.arena.set_flags(call, node_flags::OPTIONAL_CHAIN);
        }
        call
    }

    /// Parse `(a, ...b, c)`.
    fn parse_argument_list(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            arguments.push(self.parse_spread_or_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::from_vec(arguments)
    }

    fn parse_spread_or_expression(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_assignment_expression();
        }
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_assignment_expression();
        self.arena.add_spread(
            syntax_kind_ext::SPREAD_ELEMENT,
            start_pos,
            self.prev_token_end(),
            SpreadData { expression },
        )
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::ThisKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let kind = self.token() as u16;
                let start_pos = self.token_pos();
                let end_pos = self.token_end();
                self.next_token();
                self.arena.add_token(kind, start_pos, end_pos)
            }
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral => self.parse_literal(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::Unknown => {
                // Already reported by the scanner hook; skip it
                let pos = self.token_pos();
                self.next_token();
                self.arena.add_missing(pos)
            }
            _ => self.missing_expression(),
        }
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::Identifier) {
            let pos = self.token_pos();
            self.error_at_current_token(&diagnostic_messages::IDENTIFIER_EXPECTED, &[]);
            return self.arena.add_missing(pos);
        }
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let text = self.scanner.get_token_value_ref().to_string();
        self.next_token();
        self.arena.add_identifier(start_pos, end_pos, text)
    }

    /// Identifier after `.`; reserved words are allowed (`a.new`, `a.this`).
    fn parse_identifier_name(&mut self) -> NodeIndex {
        if !self.token().is_identifier_or_keyword() {
            let pos = self.token_pos();
            self.error_at_current_token(&diagnostic_messages::IDENTIFIER_EXPECTED, &[]);
            return self.arena.add_missing(pos);
        }
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let text = self.scanner.get_token_text().to_string();
        self.next_token();
        self.arena.add_identifier(start_pos, end_pos, text)
    }

    fn parse_literal(&mut self) -> NodeIndex {
        let kind = self.token() as u16;
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let data = LiteralData {
            text: self.scanner.get_token_value_ref().to_string(),
            raw_text: self.scanner.get_token_text().to_string(),
        };
        self.next_token();
        self.arena.add_literal(kind, start_pos, end_pos, data)
    }

    fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);

        self.arena.add_parenthesized(
            syntax_kind_ext::PARENTHESIZED_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            ParenthesizedData { expression },
        )
    }

    /// Parse `[a, , ...b]`.
    fn parse_array_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);

        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let pos = self.token_pos();
                elements.push(
                    self.arena
                        .add_token(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos),
                );
                self.next_token();
                continue;
            }
            elements.push(self.parse_spread_or_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);

        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            LiteralExprData {
                elements: NodeList::from_vec(elements),
            },
        )
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `function name?(params) { body }`
    fn parse_function_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::FunctionKeyword);

        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let parameters = self.parse_parameter_list();
        let body = self.parse_block();

        self.arena.add_function(
            syntax_kind_ext::FUNCTION_EXPRESSION,
            start_pos,
            self.prev_token_end(),
            FunctionData {
                name,
                parameters,
                body,
                equals_greater_than_token: false,
            },
        )
    }

    /// `x => ...` or `(...) => ...`
    fn look_ahead_is_arrow_function(&mut self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => self.look_ahead(|state| {
                state.next_token();
                state.is_token(SyntaxKind::EqualsGreaterThanToken)
                    && !state.has_preceding_line_break()
            }),
            SyntaxKind::OpenParenToken => self.look_ahead(|state| {
                // Skip to the matching `)` and check for `=>`
                let mut depth = 0u32;
                loop {
                    match state.token() {
                        SyntaxKind::OpenParenToken
                        | SyntaxKind::OpenBracketToken
                        | SyntaxKind::OpenBraceToken => depth += 1,
                        SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CloseBraceToken => {
                            depth = depth.saturating_sub(1);
                            if depth == 0 {
                                state.next_token();
                                return state.is_token(SyntaxKind::EqualsGreaterThanToken);
                            }
                        }
                        SyntaxKind::EndOfFileToken => return false,
                        _ => {}
                    }
                    state.next_token();
                }
            }),
            _ => false,
        }
    }

    fn parse_arrow_function(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();

        let parameters = if self.is_token(SyntaxKind::Identifier) {
            let param_start = self.token_pos();
            let name = self.parse_identifier();
            let parameter = self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                param_start,
                self.prev_token_end(),
                ParameterData {
                    dot_dot_dot_token: false,
                    name,
                    initializer: NodeIndex::NONE,
                },
            );
            NodeList::from_vec(vec![parameter])
        } else {
            self.parse_parameter_list()
        };

        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);

        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_assignment_expression()
        };

        self.arena.add_function(
            syntax_kind_ext::ARROW_FUNCTION,
            start_pos,
            self.prev_token_end(),
            FunctionData {
                name: NodeIndex::NONE,
                parameters,
                body,
                equals_greater_than_token: true,
            },
        )
    }

    /// Parse `(a, b = 1, { c }, ...rest)`.
    fn parse_parameter_list(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::from_vec(parameters)
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = self.parse_binding_name();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };

        self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            start_pos,
            self.prev_token_end(),
            ParameterData {
                dot_dot_dot_token,
                name,
                initializer,
            },
        )
    }

    /// Identifier, `{ ... }` or `[ ... ]` binding target.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.arena.add_missing(self.token_pos());
        }
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_object_binding_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.exit_recursion();

        self.arena.add_binding_pattern(
            syntax_kind_ext::OBJECT_BINDING_PATTERN,
            start_pos,
            self.prev_token_end(),
            BindingPatternData {
                elements: NodeList::from_vec(elements),
            },
        )
    }

    /// `a`, `a = 1`, `a: b`, `'a': [b]`, `...rest`
    fn parse_object_binding_element(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);

        let (property_name, name) = if dot_dot_dot_token {
            (NodeIndex::NONE, self.parse_identifier())
        } else {
            let key = match self.token() {
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal(),
                _ => self.parse_identifier_name(),
            };
            if self.parse_optional(SyntaxKind::ColonToken) {
                (key, self.parse_binding_name())
            } else {
                (NodeIndex::NONE, key)
            }
        };

        let initializer = if !dot_dot_dot_token && self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };

        self.arena.add_binding_element(
            syntax_kind_ext::BINDING_ELEMENT,
            start_pos,
            self.prev_token_end(),
            BindingElementData {
                dot_dot_dot_token,
                property_name,
                name,
                initializer,
            },
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.arena.add_missing(self.token_pos());
        }
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);

        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let pos = self.token_pos();
                elements.push(
                    self.arena
                        .add_token(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos),
                );
                self.next_token();
                continue;
            }

            let element_start = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer =
                if !dot_dot_dot_token && self.parse_optional(SyntaxKind::EqualsToken) {
                    self.parse_assignment_expression()
                } else {
                    NodeIndex::NONE
                };
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                element_start,
                self.prev_token_end(),
                BindingElementData {
                    dot_dot_dot_token,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                },
            ));

            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.exit_recursion();

        self.arena.add_binding_pattern(
            syntax_kind_ext::ARRAY_BINDING_PATTERN,
            start_pos,
            self.prev_token_end(),
            BindingPatternData {
                elements: NodeList::from_vec(elements),
            },
        )
    }
}

/// Binding power of a binary operator; 0 for anything else.
fn binary_operator_precedence(token: SyntaxKind) -> u8 {
    match token {
        SyntaxKind::QuestionQuestionToken => 1,
        SyntaxKind::BarBarToken => 2,
        SyntaxKind::AmpersandAmpersandToken => 3,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 4,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken => 5,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 6,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 7,
        _ => 0,
    }
}

fn is_unary_operator(token: SyntaxKind) -> bool {
    matches!(
        token,
        SyntaxKind::ExclamationToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
    )
}

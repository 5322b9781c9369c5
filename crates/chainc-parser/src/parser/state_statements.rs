//! Statement parsing and the source-file entry point.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::ParserState;
use super::{node_flags, syntax_kind_ext};
use chainc_common::diagnostic_messages;
use chainc_scanner::{SyntaxKind, token_to_string};
use std::sync::Arc;
use tracing::debug;

impl ParserState {
    /// Parse a source file
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();

        let statements = self.parse_statements(SyntaxKind::EndOfFileToken);
        let end_pos = self.token_end();

        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            errors = self.parse_diagnostics.len(),
            "parsed source file"
        );

        let data = SourceFileData {
            file_name: self.file_name.clone(),
            text: Arc::from(self.scanner.source_text()),
            statements,
        };
        self.arena
            .add_source_file(syntax_kind_ext::SOURCE_FILE, 0, end_pos, data)
    }

    /// Parse statements until `terminator` (or end of file).
    fn parse_statements(&mut self, terminator: SyntaxKind) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(terminator) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let start_pos = self.token_pos();
            let statement = self.parse_statement();
            statements.push(statement);

            // Always make progress, even on a token no statement can start with
            if self.token_pos() == start_pos && !self.is_token(SyntaxKind::EndOfFileToken) {
                let text = token_to_string(self.token())
                    .unwrap_or_else(|| self.scanner.get_token_text())
                    .to_string();
                self.error_at_current_token(&diagnostic_messages::UNEXPECTED_TOKEN, &[&text]);
                self.next_token();
            }
        }
        NodeList::from_vec(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement()
            }
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse a block statement
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.arena.add_missing(self.token_pos());
        }

        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statements(SyntaxKind::CloseBraceToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.exit_recursion();

        self.arena.add_block(
            syntax_kind_ext::BLOCK,
            start_pos,
            self.prev_token_end(),
            BlockData { statements },
        )
    }

    fn parse_empty_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        self.parse_expected(SyntaxKind::SemicolonToken);
        self.arena
            .add_token(syntax_kind_ext::EMPTY_STATEMENT, start_pos, end_pos)
    }

    /// Parse variable statement (var/let/const)
    fn parse_variable_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_semicolon();

        let statement = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_STATEMENT,
            start_pos,
            self.prev_token_end(),
            VariableData {
                declarations: NodeList::from_vec(declarations),
            },
        );
        self.arena.set_flags(statement, flags);
        statement
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let name = self.parse_identifier();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };

        self.arena.add_variable_declaration(
            syntax_kind_ext::VARIABLE_DECLARATION,
            start_pos,
            self.prev_token_end(),
            VariableDeclarationData { name, initializer },
        )
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::ReturnKeyword);

        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();

        self.arena.add_return(
            syntax_kind_ext::RETURN_STATEMENT,
            start_pos,
            self.prev_token_end(),
            ReturnData { expression },
        )
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();

        self.arena.add_expr_statement(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start_pos,
            self.prev_token_end(),
            ExprStatementData { expression },
        )
    }

    /// Automatic semicolon insertion: `;`, `}`, end of file, or a line break.
    fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    fn parse_semicolon(&mut self) {
        if self.can_parse_semicolon() {
            self.parse_optional(SyntaxKind::SemicolonToken);
        } else {
            self.parse_expected(SyntaxKind::SemicolonToken);
        }
    }
}

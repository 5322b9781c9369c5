//! Parser state: token cursor, diagnostics, and recursion guard.
//!
//! Parsing methods are split across `state_expressions.rs` and
//! `state_statements.rs`; this file holds the shared plumbing.

use super::node::NodeArena;
use chainc_common::diagnostics::{DiagnosticMessage, diagnostic_messages};
use chainc_common::{Diagnostic, format_message, limits};
use chainc_scanner::{ScannerState, SyntaxKind, token_flags, token_to_string};
use tracing::trace;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

impl ParseDiagnostic {
    #[must_use]
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        Diagnostic::error(
            file.to_string(),
            self.start,
            self.length,
            self.message.clone(),
            self.code,
        )
    }
}

/// Recursive-descent parser over a single source text.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    pub parse_diagnostics: Vec<ParseDiagnostic>,
    last_token_end: u32,
    recursion_depth: u32,
    /// Start of the last reported error; suppresses cascades at one position
    last_error_pos: Option<u32>,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let arena = NodeArena::with_capacity(source_text.len());
        ParserState {
            scanner: ScannerState::new(source_text),
            arena,
            file_name,
            current_token: SyntaxKind::Unknown,
            parse_diagnostics: Vec::new(),
            last_token_end: 0,
            recursion_depth: 0,
            last_error_pos: None,
        }
    }

    #[must_use]
    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    #[must_use]
    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    #[must_use]
    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn source_text(&self) -> &str {
        self.scanner.source_text()
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    /// End of the previous token, used as the end position of a finished node.
    #[inline]
    pub(crate) fn prev_token_end(&self) -> u32 {
        self.last_token_end
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.last_token_end = self.scanner.get_token_end();
        self.current_token = self.scanner.scan();

        if self.scanner.has_unterminated_comment() {
            self.error_at_current_token(&diagnostic_messages::TOKEN_EXPECTED, &["*/"]);
        }
        match self.current_token {
            SyntaxKind::NumericLiteral
                if self.scanner.get_token_flags() & token_flags::MISSING_DIGITS != 0 =>
            {
                self.error_at_current_token(&diagnostic_messages::HEXADECIMAL_DIGIT_EXPECTED, &[]);
            }
            SyntaxKind::StringLiteral if self.scanner.is_unterminated() => {
                self.error_at_current_token(&diagnostic_messages::UNTERMINATED_STRING_LITERAL, &[]);
            }
            SyntaxKind::Unknown => {
                self.error_at_current_token(&diagnostic_messages::INVALID_CHARACTER, &[]);
            }
            _ => {}
        }
        self.current_token
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "'x' expected." without advancing.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = token_to_string(kind).unwrap_or("token");
        self.error_at_current_token(&diagnostic_messages::TOKEN_EXPECTED, &[text]);
        false
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Run `f` and rewind the scanner afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let saved_token = self.current_token;
        let saved_last_end = self.last_token_end;
        let saved_diagnostics = self.parse_diagnostics.len();
        let saved_error_pos = self.last_error_pos;

        let result = f(self);

        self.scanner.restore_state(snapshot);
        self.current_token = saved_token;
        self.last_token_end = saved_last_end;
        self.parse_diagnostics.truncate(saved_diagnostics);
        self.last_error_pos = saved_error_pos;
        result
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at_current_token(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, args);
    }

    pub(crate) fn parse_error_at(
        &mut self,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) {
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        trace!(start, code = message.code, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: format_message(message.message, args),
            code: message.code,
        });
    }

    /// Report an unexpected token and produce a placeholder node.
    pub(crate) fn missing_expression(&mut self) -> super::NodeIndex {
        let pos = self.token_pos();
        self.error_at_current_token(&diagnostic_messages::EXPRESSION_EXPECTED, &[]);
        self.arena.add_missing(pos)
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Enter a nested construct. Returns false (after reporting) once
    /// `MAX_PARSE_DEPTH` is exceeded.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= limits::MAX_PARSE_DEPTH {
            self.error_at_current_token(&diagnostic_messages::NESTING_TOO_DEEP, &[]);
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }
}

#[cfg(test)]
#[path = "../../tests/state_tests.rs"]
mod tests;

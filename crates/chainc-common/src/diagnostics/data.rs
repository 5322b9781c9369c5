//! Diagnostic message table.
//!
//! Codes 1xxx are syntax errors, 9xxx are safe-chain rewrite errors.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const EXPRESSION_EXPECTED: u32 = 1001;
    pub const TOKEN_EXPECTED: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const UNEXPECTED_TOKEN: u32 = 1004;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1005;
    pub const INVALID_CHARACTER: u32 = 1006;
    pub const NESTING_TOO_DEEP: u32 = 1007;
    pub const HEXADECIMAL_DIGIT_EXPECTED: u32 = 1008;

    pub const WRONG_ARGUMENT_COUNT: u32 = 9001;
    pub const SECOND_ARGUMENT_NOT_FUNCTION: u32 = 9002;
    pub const BODY_NOT_EXPRESSION: u32 = 9003;
    pub const WRONG_PARAMETER_COUNT: u32 = 9004;
    pub const PARAMETER_NOT_IDENTIFIER: u32 = 9005;
    pub const ROOT_MISMATCH: u32 = 9006;
    pub const UNSUPPORTED_OPERATION: u32 = 9007;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    const fn error(code: u32, message: &'static str) -> DiagnosticMessage {
        DiagnosticMessage {
            code,
            category: DiagnosticCategory::Error,
            message,
        }
    }

    pub const EXPRESSION_EXPECTED: DiagnosticMessage =
        error(diagnostic_codes::EXPRESSION_EXPECTED, "Expression expected.");
    pub const TOKEN_EXPECTED: DiagnosticMessage =
        error(diagnostic_codes::TOKEN_EXPECTED, "'{0}' expected.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage =
        error(diagnostic_codes::IDENTIFIER_EXPECTED, "Identifier expected.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage =
        error(diagnostic_codes::UNEXPECTED_TOKEN, "Unexpected token '{0}'.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = error(
        diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        "Unterminated string literal.",
    );
    pub const INVALID_CHARACTER: DiagnosticMessage =
        error(diagnostic_codes::INVALID_CHARACTER, "Invalid character.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = error(
        diagnostic_codes::NESTING_TOO_DEEP,
        "Expression is nested too deeply.",
    );
    pub const HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = error(
        diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED,
        "Hexadecimal digit expected.",
    );

    pub const WRONG_ARGUMENT_COUNT: DiagnosticMessage = error(
        diagnostic_codes::WRONG_ARGUMENT_COUNT,
        "The `{0}` function takes exactly two arguments.",
    );
    pub const SECOND_ARGUMENT_NOT_FUNCTION: DiagnosticMessage = error(
        diagnostic_codes::SECOND_ARGUMENT_NOT_FUNCTION,
        "The second argument supplied to `{0}` must be an arrow function.",
    );
    pub const BODY_NOT_EXPRESSION: DiagnosticMessage = error(
        diagnostic_codes::BODY_NOT_EXPRESSION,
        "The body of the arrow function supplied to `{0}` must be a single expression (without curly braces).",
    );
    pub const WRONG_PARAMETER_COUNT: DiagnosticMessage = error(
        diagnostic_codes::WRONG_PARAMETER_COUNT,
        "The arrow function supplied to `{0}` must take exactly one parameter.",
    );
    pub const PARAMETER_NOT_IDENTIFIER: DiagnosticMessage = error(
        diagnostic_codes::PARAMETER_NOT_IDENTIFIER,
        "The parameter supplied to `{0}` must be an identifier.",
    );
    pub const ROOT_MISMATCH: DiagnosticMessage = error(
        diagnostic_codes::ROOT_MISMATCH,
        "The parameter of the arrow function supplied to `{0}` must match the base of the body expression.",
    );
    pub const UNSUPPORTED_OPERATION: DiagnosticMessage = error(
        diagnostic_codes::UNSUPPORTED_OPERATION,
        "`{0}` callbacks may only access properties on the callback parameter.",
    );
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::EXPRESSION_EXPECTED,
    diagnostic_messages::TOKEN_EXPECTED,
    diagnostic_messages::IDENTIFIER_EXPECTED,
    diagnostic_messages::UNEXPECTED_TOKEN,
    diagnostic_messages::UNTERMINATED_STRING_LITERAL,
    diagnostic_messages::INVALID_CHARACTER,
    diagnostic_messages::NESTING_TOO_DEEP,
    diagnostic_messages::HEXADECIMAL_DIGIT_EXPECTED,
    diagnostic_messages::WRONG_ARGUMENT_COUNT,
    diagnostic_messages::SECOND_ARGUMENT_NOT_FUNCTION,
    diagnostic_messages::BODY_NOT_EXPRESSION,
    diagnostic_messages::WRONG_PARAMETER_COUNT,
    diagnostic_messages::PARAMETER_NOT_IDENTIFIER,
    diagnostic_messages::ROOT_MISMATCH,
    diagnostic_messages::UNSUPPORTED_OPERATION,
];

//! Parser module: thin-node arena and recursive-descent `ParserState`.

pub mod base;
pub mod node;
mod node_arena;
mod state;
mod state_expressions;
mod state_statements;

pub use base::{NodeIndex, NodeList};
pub use node::*;
pub use state::{ParseDiagnostic, ParserState};

/// Node kinds that are not tokens.
///
/// Values start above `SyntaxKind::LastToken` so a node kind never collides
/// with a token kind stored in the same `u16`.
pub mod syntax_kind_ext {
    use chainc_scanner::SyntaxKind;

    const BASE: u16 = SyntaxKind::LastToken as u16 + 1;

    pub const SOURCE_FILE: u16 = BASE;
    // Names and patterns
    pub const PARAMETER: u16 = BASE + 1;
    pub const OBJECT_BINDING_PATTERN: u16 = BASE + 2;
    pub const ARRAY_BINDING_PATTERN: u16 = BASE + 3;
    pub const BINDING_ELEMENT: u16 = BASE + 4;
    // Expressions
    pub const ARRAY_LITERAL_EXPRESSION: u16 = BASE + 5;
    pub const SPREAD_ELEMENT: u16 = BASE + 6;
    pub const OMITTED_EXPRESSION: u16 = BASE + 7;
    pub const PROPERTY_ACCESS_EXPRESSION: u16 = BASE + 8;
    pub const ELEMENT_ACCESS_EXPRESSION: u16 = BASE + 9;
    pub const CALL_EXPRESSION: u16 = BASE + 10;
    pub const NEW_EXPRESSION: u16 = BASE + 11;
    pub const PARENTHESIZED_EXPRESSION: u16 = BASE + 12;
    pub const FUNCTION_EXPRESSION: u16 = BASE + 13;
    pub const ARROW_FUNCTION: u16 = BASE + 14;
    pub const PREFIX_UNARY_EXPRESSION: u16 = BASE + 15;
    pub const BINARY_EXPRESSION: u16 = BASE + 16;
    pub const CONDITIONAL_EXPRESSION: u16 = BASE + 17;
    // Statements
    pub const BLOCK: u16 = BASE + 18;
    pub const VARIABLE_STATEMENT: u16 = BASE + 19;
    pub const VARIABLE_DECLARATION: u16 = BASE + 20;
    pub const EXPRESSION_STATEMENT: u16 = BASE + 21;
    pub const RETURN_STATEMENT: u16 = BASE + 22;
    pub const EMPTY_STATEMENT: u16 = BASE + 23;
}

/// Bits stored in `Node::flags`.
pub mod node_flags {
    pub const NONE: u16 = 0;
    /// Variable statement declared with `let`
    pub const LET: u16 = 1 << 0;
    /// Variable statement declared with `const`
    pub const CONST: u16 = 1 << 1;
    /// Access or call written with `?.`
    pub const OPTIONAL_CHAIN: u16 = 1 << 2;
    /// Placeholder created during error recovery
    pub const MISSING: u16 = 1 << 3;
}

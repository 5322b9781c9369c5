//! Centralized limits and thresholds for the chainc compiler.
//!
//! These bound recursion in the parser, the chain decomposer, and the
//! lowering pass so that adversarial input fails with a diagnostic instead of
//! overflowing the stack.

/// Maximum nesting depth the parser accepts for expressions and statements.
///
/// ```javascript
/// ((((((((((((((((((((( /* ... 256 levels ... */ x )))))))))))))))))))));
/// ```
pub const MAX_PARSE_DEPTH: u32 = 256;

/// Maximum number of links in a single accessor chain.
///
/// A chain longer than this is reported as an unsupported operation on the
/// node where the limit was hit.
pub const MAX_CHAIN_DEPTH: u32 = 1_000;

/// Maximum recursion depth for AST-to-IR lowering.
pub const MAX_LOWERING_DEPTH: u32 = 500;

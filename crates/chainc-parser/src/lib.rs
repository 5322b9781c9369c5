//! JavaScript expression parser and AST types for the chainc compiler.
//!
//! The AST is a read-only thin-node arena (`parser::NodeArena`): every node is
//! a small `Node` header addressed by `NodeIndex`, with per-category data in
//! typed pools. `parser::ParserState` builds it from source text.

pub mod parser;
pub mod syntax;

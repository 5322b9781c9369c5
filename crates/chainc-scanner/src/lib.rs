//! JavaScript scanner/tokenizer for the chainc compiler.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types (and, above `FIRST_NODE`, node kinds)
//! - `ScannerState` - Tokenizer state machine with snapshot/restore look-ahead
//! - `char_codes` - Character classification utilities

pub mod char_codes;
mod scanner_impl;
mod syntax_kind;

pub use scanner_impl::{ScannerSnapshot, ScannerState, token_flags};
pub use syntax_kind::{SyntaxKind, keyword_kind, token_to_string};

//! Syntax Utilities
//!
//! Helpers over the AST shared by the parser's consumers.

pub mod transform_utils;

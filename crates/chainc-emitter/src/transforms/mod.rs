//! Transforms: AST lowering, the IR, its printer, and the safe-chain rewrite.

pub mod ast_to_ir;
pub mod ir;
pub mod ir_printer;
pub mod safe_chain;

//! Safe-access chain rewriting for the chainc compiler.
//!
//! Pipeline: the parsed `NodeArena` is lowered to `IRNode`s by `AstToIr`;
//! when a `SafeChainPass` drives the lowering, every `idx(input, p => p.a.b)`
//! call site is replaced with a nested null-guarded conditional that reuses a
//! single hoisted temporary. `IRPrinter` turns the result back into
//! JavaScript.

pub mod compile;
pub mod safe_chain_pass;
pub mod temp_names;
pub mod transforms;

pub use compile::{CompileOutput, compile_source};
pub use safe_chain_pass::{SafeChainOptions, SafeChainOutput, SafeChainPass};
pub use temp_names::{TempNameProvider, UniqueNameGenerator};
pub use transforms::ast_to_ir::AstToIr;
pub use transforms::ir::IRNode;
pub use transforms::ir_printer::IRPrinter;

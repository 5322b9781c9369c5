//! Source-to-source entry point: parse, rewrite, print.

use crate::safe_chain_pass::{SafeChainOptions, SafeChainPass};
use crate::temp_names::UniqueNameGenerator;
use crate::transforms::ir_printer::IRPrinter;
use chainc_common::Diagnostic;
use chainc_parser::parser::ParserState;
use chainc_parser::syntax::transform_utils::collect_identifier_names;
use tracing::debug;

/// Output of compiling one file.
#[derive(Debug)]
pub struct CompileOutput {
    /// Rewritten JavaScript; `None` when the file did not parse.
    pub code: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub rewritten_sites: usize,
}

impl CompileOutput {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse `source`, rewrite its call sites, and print the result.
///
/// Syntax errors stop compilation before any rewriting. Rejected call sites
/// are reported but do not stop the file from being printed.
#[must_use]
pub fn compile_source(file_name: &str, source: &str, options: &SafeChainOptions) -> CompileOutput {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();

    if !parser.get_diagnostics().is_empty() {
        let diagnostics: Vec<Diagnostic> = parser
            .get_diagnostics()
            .iter()
            .map(|diag| diag.to_diagnostic(file_name))
            .collect();
        debug!(file = file_name, errors = diagnostics.len(), "parse failed");
        return CompileOutput {
            code: None,
            diagnostics,
            rewritten_sites: 0,
        };
    }

    let arena = parser.into_arena();
    let names = UniqueNameGenerator::with_reserved(collect_identifier_names(&arena));
    let output = SafeChainPass::new(&arena, options, &names)
        .with_file_name(file_name)
        .run(root);

    CompileOutput {
        code: Some(IRPrinter::emit_to_string(&output.program)),
        diagnostics: output.diagnostics,
        rewritten_sites: output.rewritten_sites,
    }
}

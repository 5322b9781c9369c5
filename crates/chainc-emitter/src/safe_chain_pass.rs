//! Safe-Chain Pass
//!
//! Converts a parsed program to IR, replacing every call whose callee is one
//! of `SafeChainOptions::callee_names` with a guarded conditional:
//!
//! ```javascript
//! const name = idx(props, p => p.user.name);
//! ```
//!
//! becomes
//!
//! ```javascript
//! var _ref;
//! const name = (_ref = props) != null ? (_ref = _ref.user) != null ? _ref.name : _ref : _ref;
//! ```
//!
//! Nested call sites are rewritten innermost-first. A call site that cannot
//! be rewritten is reported as a diagnostic and left exactly as written,
//! including any call sites nested inside it.

use crate::temp_names::TempNameProvider;
use crate::transforms::ast_to_ir::AstToIr;
use crate::transforms::ir::IRNode;
use crate::transforms::safe_chain::{RewriteContext, RewriteError, RewriteErrorKind, rewrite};
use chainc_common::Diagnostic;
use chainc_parser::parser::{NodeArena, NodeIndex};
use serde::Deserialize;
use tracing::debug;

/// Settings for call-site discovery and temporary naming.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SafeChainOptions {
    /// Identifiers that mark a call as a safe-access call site.
    pub callee_names: Vec<String>,
    /// Base for generated temporary names (`ref` gives `_ref`, `_ref2`, ...).
    pub temp_hint: String,
}

impl Default for SafeChainOptions {
    fn default() -> Self {
        Self {
            callee_names: vec!["idx".to_string()],
            temp_hint: "ref".to_string(),
        }
    }
}

/// Result of running the pass over one file.
#[derive(Debug)]
pub struct SafeChainOutput {
    pub program: IRNode,
    pub diagnostics: Vec<Diagnostic>,
    pub rewritten_sites: usize,
}

/// Per-file rewriting state carried by `AstToIr` during conversion.
pub(crate) struct CallSiteRewriter<'a> {
    options: &'a SafeChainOptions,
    provider: &'a dyn TempNameProvider,
    file_name: &'a str,
    /// Temporaries declared per open function scope, innermost last
    scopes: Vec<Vec<String>>,
    diagnostics: Vec<Diagnostic>,
    rewritten_sites: usize,
}

pub struct SafeChainPass<'a> {
    arena: &'a NodeArena,
    options: &'a SafeChainOptions,
    provider: &'a dyn TempNameProvider,
    file_name: String,
}

impl<'a> SafeChainPass<'a> {
    pub fn new(
        arena: &'a NodeArena,
        options: &'a SafeChainOptions,
        provider: &'a dyn TempNameProvider,
    ) -> Self {
        let file_name = arena
            .source_files
            .first()
            .map(|file| file.file_name.clone())
            .unwrap_or_default();
        Self {
            arena,
            options,
            provider,
            file_name,
        }
    }

    /// Override the file name diagnostics are reported against.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Convert the source file at `root`, rewriting every call site.
    pub fn run(&self, root: NodeIndex) -> SafeChainOutput {
        let rewriter = CallSiteRewriter {
            options: self.options,
            provider: self.provider,
            file_name: &self.file_name,
            scopes: Vec::new(),
            diagnostics: Vec::new(),
            rewritten_sites: 0,
        };
        let mut converter = AstToIr::new(self.arena).with_rewriter(rewriter);
        let program = converter.convert_source_file(root);

        let overflow = converter.depth_exceeded();
        let Some(mut rewriter) = converter.rewriter.take() else {
            return SafeChainOutput {
                program,
                diagnostics: Vec::new(),
                rewritten_sites: 0,
            };
        };
        if let Some(node) = overflow {
            let error = RewriteError::new(RewriteErrorKind::NestingTooDeep, node, "");
            rewriter
                .diagnostics
                .push(error.to_diagnostic(&self.file_name, self.arena));
        }

        debug!(
            file = %self.file_name,
            rewritten = rewriter.rewritten_sites,
            errors = rewriter.diagnostics.len(),
            "safe-chain pass finished"
        );
        SafeChainOutput {
            program,
            diagnostics: rewriter.diagnostics,
            rewritten_sites: rewriter.rewritten_sites,
        }
    }
}

// =============================================================================
// Call-site hooks used by AstToIr
// =============================================================================

impl AstToIr<'_> {
    /// Whether a call with this callee is a safe-access call site.
    pub(crate) fn is_call_site(&self, callee: NodeIndex) -> bool {
        let Some(rewriter) = &self.rewriter else {
            return false;
        };
        self.arena
            .identifier_text(callee)
            .is_some_and(|name| rewriter.options.callee_names.iter().any(|c| c == name))
    }

    pub(crate) fn enter_var_scope(&mut self) {
        if let Some(rewriter) = &mut self.rewriter {
            rewriter.scopes.push(Vec::new());
        }
    }

    /// Close the innermost scope and return the temporaries it must declare.
    pub(crate) fn exit_var_scope(&mut self) -> Vec<String> {
        self.rewriter
            .as_mut()
            .and_then(|rewriter| rewriter.scopes.pop())
            .unwrap_or_default()
    }

    /// Rewrite the call site at `call`, or keep it verbatim and record why not.
    pub(crate) fn rewrite_call_site(&mut self, call: NodeIndex) -> IRNode {
        let arena = self.arena;
        let Some(rewriter) = &mut self.rewriter else {
            return AstToIr::new(arena).convert_expression(call);
        };
        if rewriter.scopes.is_empty() {
            rewriter.scopes.push(Vec::new());
        }
        let provider = rewriter.provider;
        let temp_hint = rewriter.options.temp_hint.clone();
        let declared_mark = rewriter.scopes.last().map_or(0, Vec::len);
        let sites_mark = rewriter.rewritten_sites;

        let ctx = RewriteContext {
            arena,
            provider,
            temp_hint: &temp_hint,
        };
        let result = rewrite(&ctx, call, self);

        let Some(rewriter) = &mut self.rewriter else {
            return AstToIr::new(arena).convert_expression(call);
        };
        match result {
            Ok(result) => {
                if let Some(temp) = result.temp_declaration {
                    debug!(file = %rewriter.file_name, temp = %temp.name, "rewrote call site");
                    if let Some(scope) = rewriter.scopes.last_mut() {
                        scope.push(temp.name);
                    }
                }
                rewriter.rewritten_sites += 1;
                result.replacement
            }
            Err(error) => {
                // Drop whatever nested sites declared; the call is kept as written
                if let Some(scope) = rewriter.scopes.last_mut() {
                    scope.truncate(declared_mark);
                }
                rewriter.rewritten_sites = sites_mark;
                debug!(file = %rewriter.file_name, code = error.kind.code(), "call site rejected");
                let mut diagnostic = error.to_diagnostic(rewriter.file_name, arena);
                if error.node != call {
                    let span = arena.span_of(call);
                    diagnostic = diagnostic.with_related(
                        rewriter.file_name.to_string(),
                        span.start,
                        span.len(),
                        format!("The `{}` call is left unchanged.", error.callee),
                    );
                }
                rewriter.diagnostics.push(diagnostic);
                AstToIr::new(arena).convert_expression(call)
            }
        }
    }
}

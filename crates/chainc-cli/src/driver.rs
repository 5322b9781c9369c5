use anyhow::{Context, Result, bail};
use chainc_common::Diagnostic;
use chainc_emitter::{CompileOutput, SafeChainOptions, compile_source};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use crate::args::CliArgs;
use crate::config::resolve_options;

/// Display name used for `--expr` input.
pub const INLINE_FILE_NAME: &str = "<expr>";

/// One rewritten input.
#[derive(Debug)]
pub struct CompiledFile {
    /// Name used in diagnostics (the path as given, or `<expr>`).
    pub name: String,
    pub source: String,
    pub output: CompileOutput,
}

impl CompiledFile {
    /// Rewritten code, unless the file produced any diagnostic.
    pub fn emit_text(&self) -> Option<&str> {
        if self.output.diagnostics.is_empty() {
            self.output.code.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct CompilationResult {
    pub files: Vec<CompiledFile>,
    pub emitted_files: Vec<PathBuf>,
}

impl CompilationResult {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| &file.output.diagnostics)
    }

    pub fn has_diagnostics(&self) -> bool {
        self.files
            .iter()
            .any(|file| !file.output.diagnostics.is_empty())
    }
}

/// Run a full compilation for the given arguments.
///
/// Files with diagnostics are not written.
pub fn compile(args: &CliArgs) -> Result<CompilationResult> {
    let options = resolve_options(args)?;

    let files = match &args.expr {
        Some(source) => vec![compile_inline(source, &options)],
        None if args.files.is_empty() => bail!("no input files; pass FILE arguments or --expr"),
        None => compile_files(&args.files, &options)?,
    };

    let emitted_files = match &args.out_dir {
        Some(out_dir) => write_outputs(&files, out_dir)?,
        None => Vec::new(),
    };

    Ok(CompilationResult {
        files,
        emitted_files,
    })
}

pub fn compile_inline(source: &str, options: &SafeChainOptions) -> CompiledFile {
    CompiledFile {
        name: INLINE_FILE_NAME.to_string(),
        source: source.to_string(),
        output: compile_source(INLINE_FILE_NAME, source, options),
    }
}

/// Read and rewrite `paths` in parallel, keeping input order.
pub fn compile_files(paths: &[PathBuf], options: &SafeChainOptions) -> Result<Vec<CompiledFile>> {
    paths
        .par_iter()
        .map(|path| -> Result<CompiledFile> {
            let name = path.display().to_string();
            let _span = info_span!("compile_file", file = %name).entered();
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let output = compile_source(&name, &source, options);
            debug!(
                sites = output.rewritten_sites,
                diagnostics = output.diagnostics.len(),
                "compiled"
            );
            Ok(CompiledFile {
                name,
                source,
                output,
            })
        })
        .collect()
}

/// Where `input` is written under `out_dir`.
pub fn output_path(out_dir: &Path, input: &str) -> Result<PathBuf> {
    let file_name = Path::new(input)
        .file_name()
        .with_context(|| format!("cannot derive an output name from {input}"))?;
    Ok(out_dir.join(file_name))
}

fn write_outputs(files: &[CompiledFile], out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create directory {}", out_dir.display()))?;

    let mut outputs = Vec::new();
    let mut seen = FxHashSet::default();
    for file in files {
        let Some(text) = file.emit_text() else {
            continue;
        };
        let path = output_path(out_dir, &file.name)?;
        if !seen.insert(path.clone()) {
            bail!("more than one input writes {}", path.display());
        }
        outputs.push((path, text));
    }

    outputs.par_iter().try_for_each(|(path, text)| -> Result<()> {
        std::fs::write(path, with_trailing_newline(text))
            .with_context(|| format!("failed to write {}", path.display()))
    })?;

    Ok(outputs.into_iter().map(|(path, _)| path).collect())
}

pub fn with_trailing_newline(text: &str) -> String {
    let mut contents = text.to_string();
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents
}

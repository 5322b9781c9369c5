use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the chainc binary.
#[derive(Parser, Debug)]
#[command(
    name = "chainc",
    version,
    about = "Rewrites idx() safe-access chains into null-guarded conditionals"
)]
pub struct CliArgs {
    // ==================== Input ====================
    /// Rewrite an inline snippet instead of files.
    #[arg(
        short = 'e',
        long = "expr",
        value_name = "SOURCE",
        conflicts_with_all = ["files", "out_dir"]
    )]
    pub expr: Option<String>,

    // ==================== Output ====================
    /// Write each rewritten file into this directory instead of stdout.
    #[arg(long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Enable color in diagnostic output.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub pretty: Option<bool>,

    // ==================== Rewriting ====================
    /// Function name that marks a safe-access call site (repeatable).
    #[arg(long = "callee", value_name = "NAME")]
    pub callees: Vec<String>,

    /// Base name for generated temporaries.
    #[arg(long = "tempHint", alias = "temp-hint", value_name = "HINT")]
    pub temp_hint: Option<String>,

    /// JSON file with `calleeNames` and `tempHint` settings.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // ==================== Input Files ====================
    /// Input files to rewrite.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

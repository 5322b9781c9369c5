//! Rewrite settings from a JSON config file and the command line.

use anyhow::{Context, Result};
use chainc_emitter::SafeChainOptions;
use std::path::Path;

use crate::args::CliArgs;

/// Parse a JSON config (`{"calleeNames": [...], "tempHint": "..."}`).
pub fn parse_config(source: &str) -> Result<SafeChainOptions> {
    let options: SafeChainOptions = serde_json::from_str(source)?;
    validate_options(&options)?;
    Ok(options)
}

pub fn load_config(path: &Path) -> Result<SafeChainOptions> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Combine the config file (if any) with command-line overrides.
///
/// `--callee` replaces the configured callee list; it does not extend it.
pub fn resolve_options(args: &CliArgs) -> Result<SafeChainOptions> {
    let mut options = match &args.config {
        Some(path) => load_config(path)?,
        None => SafeChainOptions::default(),
    };

    if !args.callees.is_empty() {
        options.callee_names = args.callees.clone();
    }
    if let Some(hint) = &args.temp_hint {
        options.temp_hint = hint.clone();
    }

    validate_options(&options)?;
    Ok(options)
}

fn validate_options(options: &SafeChainOptions) -> Result<()> {
    if options.callee_names.is_empty() {
        anyhow::bail!("at least one callee name is required");
    }
    if let Some(name) = options
        .callee_names
        .iter()
        .find(|name| !is_identifier(name))
    {
        anyhow::bail!("callee name '{name}' is not a valid identifier");
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use chainc_cli::args::CliArgs;
use chainc_cli::driver;
use chainc_cli::reporter::Reporter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;

fn main() -> Result<()> {
    // Zero cost unless CHAINC_LOG or RUST_LOG is set.
    chainc_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let result = driver::compile(&args)?;

    if args.out_dir.is_none() {
        let multiple = result.files.len() > 1;
        for file in &result.files {
            let Some(text) = file.emit_text() else {
                continue;
            };
            if multiple {
                println!("// {}", file.name);
            }
            print!("{}", driver::with_trailing_newline(text));
        }
    }

    if result.has_diagnostics() {
        let pretty = args
            .pretty
            .unwrap_or_else(|| std::io::stderr().is_terminal());
        let mut reporter = Reporter::new(pretty);
        for file in &result.files {
            reporter.add_source(file.name.as_str(), file.source.as_str());
        }
        let diagnostics: Vec<_> = result.diagnostics().cloned().collect();
        eprint!("{}", reporter.render(&diagnostics));
        std::process::exit(EXIT_DIAGNOSTICS);
    }

    std::process::exit(EXIT_SUCCESS);
}

use clap::Parser;

use super::args::CliArgs;

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["chainc"]).expect("default args should parse");

    assert!(args.expr.is_none());
    assert!(args.out_dir.is_none());
    assert!(args.pretty.is_none());
    assert!(args.callees.is_empty());
    assert!(args.temp_hint.is_none());
    assert!(args.config.is_none());
    assert!(args.files.is_empty());
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "chainc",
        "--outDir",
        "dist",
        "--callee",
        "idx",
        "--callee",
        "get",
        "--tempHint",
        "tmp",
        "--config",
        "chainc.json",
        "--pretty",
        "src/a.js",
        "src/b.js",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.out_dir.as_deref(), Some(std::path::Path::new("dist")));
    assert_eq!(args.callees, vec!["idx", "get"]);
    assert_eq!(args.temp_hint.as_deref(), Some("tmp"));
    assert_eq!(
        args.config.as_deref(),
        Some(std::path::Path::new("chainc.json"))
    );
    assert_eq!(args.pretty, Some(true));
    assert_eq!(
        args.files,
        vec![
            std::path::PathBuf::from("src/a.js"),
            std::path::PathBuf::from("src/b.js")
        ]
    );
}

#[test]
fn parses_kebab_case_aliases_and_explicit_pretty() {
    let args = CliArgs::try_parse_from([
        "chainc",
        "--out-dir",
        "out",
        "--temp-hint",
        "t",
        "--pretty",
        "false",
        "a.js",
    ])
    .expect("aliases should parse");

    assert_eq!(args.out_dir.as_deref(), Some(std::path::Path::new("out")));
    assert_eq!(args.temp_hint.as_deref(), Some("t"));
    assert_eq!(args.pretty, Some(false));
}

#[test]
fn inline_expression_excludes_files_and_out_dir() {
    let args = CliArgs::try_parse_from(["chainc", "-e", "idx(a, p => p.b)"])
        .expect("inline source should parse");
    assert_eq!(args.expr.as_deref(), Some("idx(a, p => p.b)"));

    assert!(CliArgs::try_parse_from(["chainc", "-e", "a", "file.js"]).is_err());
    assert!(CliArgs::try_parse_from(["chainc", "-e", "a", "--outDir", "dist"]).is_err());
}

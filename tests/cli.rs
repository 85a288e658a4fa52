//! CLI-level tests: parse real argument lists and run them against temp files.

use clap::Parser;
use hookforge_core::cli::{execute, Cli};
use std::io::Write;
use tempfile::NamedTempFile;

const SOURCE: &str = r#"
function hello(name) { return "hi " + name; }
var app = { user: { getName: function () { return "n"; } } };
app.user.getName();
hello("x");
"#;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("hookforge").chain(args.iter().copied()))?;
    execute(&cli)
}

#[test]
fn paths_lists_default_function_paths() {
    let file = source_file(SOURCE);
    let path = file.path().to_str().unwrap();
    let out = run(&["paths", path]).unwrap();
    assert!(out.starts_with("1 hook paths"));
    assert!(out.contains("[function] hello (declaration) params=1"));
}

#[test]
fn paths_json_is_an_analysis_object() {
    let file = source_file(SOURCE);
    let path = file.path().to_str().unwrap();
    let out = run(&["paths", path, "--kind", "all", "--json"]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["mode"], "exact");
    let catalog = json["catalog"].as_array().unwrap();
    assert!(catalog
        .iter()
        .any(|p| p["kind"] == "method" && p["text"] == "app.user.getName"));
}

#[test]
fn config_file_is_applied_and_flags_win() {
    let file = source_file(SOURCE);
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{"kind": "method", "targetSubstring": "nothing"}}"#).unwrap();

    let path = file.path().to_str().unwrap();
    let config_path = config.path().to_str().unwrap();

    let out = run(&["paths", path, "--config", config_path]).unwrap();
    assert!(out.starts_with("0 hook paths"));

    let out = run(&["paths", path, "--config", config_path, "--target", "getName"]).unwrap();
    assert!(out.contains("[method] app.user.getName (function_call) args=0"));
}

#[test]
fn regex_prints_pattern_and_explanation() {
    let file = source_file(SOURCE);
    let path = file.path().to_str().unwrap();
    let out = run(&["regex", path, "--kind", "method", "--explain"]).unwrap();
    assert!(out.starts_with(r"app\.user\.getName(?:\(.*?\))?"));
    assert!(out.contains("Mode: exact"));
}

#[test]
fn regex_on_empty_catalog_fails() {
    let file = source_file(SOURCE);
    let path = file.path().to_str().unwrap();
    let err = run(&["regex", path, "--target", "nope"]).unwrap_err();
    assert!(err.to_string().contains("no hook paths survived filtering"));
}

#[test]
fn smart_reports_chain_and_patterns() {
    let file = source_file(SOURCE);
    let path = file.path().to_str().unwrap();
    let out = run(&["smart", path, "user.getName()"]).unwrap();
    assert!(out.contains("Chain:  app.user.getName"));
    assert!(out.contains(r"Smart:  [A-Za-z$_0-9]{1,3}\.user\.getName\(\)"));
}

#[test]
fn smart_rejects_zero_keep_tail() {
    let file = source_file(SOURCE);
    let path = file.path().to_str().unwrap();
    let err = run(&["smart", path, "getName()", "--keep-tail", "0"]).unwrap_err();
    assert!(err.to_string().contains("keep-tail"));
}

#[test]
fn test_reads_input_file() {
    let input = source_file("a.b(); a.b(1);");
    let path = input.path().to_str().unwrap();
    let out = run(&["test", "--pattern", r"a\.b\(.*?\)", "--input", path, "--json"]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["matches"].as_array().unwrap().len(), 2);
    assert_eq!(json["engine"], "linear");
}

#[test]
fn cases_all_pass_for_flexible_pattern() {
    let file = source_file("window['MyApp']['run'](); other.call();");
    let path = file.path().to_str().unwrap();
    let out = run(&["cases", path, "--kind", "method", "--flexible"]).unwrap();
    assert!(out.contains("[match] computed access - run"));
    assert!(!out.contains("FAIL"));
}

#[test]
fn validate_reports_parse_errors() {
    let good = source_file("var x = 1;");
    let out = run(&["validate", good.path().to_str().unwrap()]).unwrap();
    assert!(out.ends_with(": ok\n"));

    let bad = source_file("var x = ;\n");
    let err = run(&["validate", bad.path().to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn missing_file_is_an_error() {
    let err = run(&["paths", "/no/such/file.js"]).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read source"));
}

//! Integration test: walks Go projects on disk through `Analyzer`.

use std::fs;
use std::path::{Path, PathBuf};

use depcheck_core::{Config, LintResult, RuleConfig, RulesConfig};
use depcheck_go::{Analyzer, AnalyzerError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("fixture file has a parent")).unwrap();
    fs::write(path, content).unwrap();
}

fn deny_all_legacy() -> Config {
    let mut config = Config::new();
    config.rules = RulesConfig {
        allow: vec![],
        deny: vec![RuleConfig::new(".*", "legacy")],
    };
    config
}

// ── Fixture project ──

#[test]
fn layered_fixture_reports_every_violation_in_order() {
    let root = fixture("layered");
    let config = Config::from_file(&root.join("depcheck.toml")).unwrap();
    let analyzer = Analyzer::builder()
        .root(&root)
        .config(config)
        .build()
        .unwrap();

    let result = analyzer.analyze().unwrap();

    assert_eq!(result.files_checked, 5);
    insta::assert_snapshot!(compact(&result), @r"
    domain/pkg1/a.go:7:2: [DEP001] domain may only import fmt, errors and other domain packages
    domain/pkg2/b.go:3:8: [DEP001] domain may only import fmt, errors and other domain packages
    domain/pkg2/b.go:3:8: [DEP002] the legacy package is frozen
    handler/http/h.go:6:2: [DEP002] the legacy package is frozen
    usecase/pkg1/c.go:5:2: [DEP002] import example.com/layered/handler/http is not allowed
    ");
}

#[test]
fn layered_fixture_counts_by_rule() {
    let root = fixture("layered");
    let config = Config::from_file(&root.join("depcheck.toml")).unwrap();
    let result = Analyzer::builder()
        .root(&root)
        .config(config)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    let counts = result.count_by_rule();
    assert_eq!(counts.get("allow-import"), Some(&2));
    assert_eq!(counts.get("deny-import"), Some(&3));
}

#[test]
fn no_rules_means_every_file_passes() {
    let result = Analyzer::builder()
        .root(fixture("layered"))
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert!(!result.has_violations());
    assert_eq!(result.files_checked, 5);
}

// ── Walking ──

#[test]
fn files_are_visited_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "z/z.go", "package z\n\nimport \"legacy\"\n");
    write(dir.path(), "a/a.go", "package a\n\nimport \"legacy\"\n");
    write(dir.path(), "m.go", "package m\n\nimport \"legacy\"\n");

    let result = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    let files: Vec<_> = result
        .violations
        .iter()
        .map(|v| v.location.file.clone())
        .collect();
    assert_eq!(
        files,
        vec![
            PathBuf::from("a/a.go"),
            PathBuf::from("m.go"),
            PathBuf::from("z/z.go")
        ]
    );
}

#[test]
fn gitignored_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".gitignore", "generated/\n");
    write(dir.path(), "generated/gen.go", "package gen\n\nimport \"legacy\"\n");
    write(dir.path(), "main.go", "package main\n");

    let result = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 1);
    assert!(!result.has_violations());
}

#[test]
fn gitignore_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".gitignore", "generated/\n");
    write(dir.path(), "generated/gen.go", "package gen\n\nimport \"legacy\"\n");

    let result = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .respect_gitignore(false)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.violations.len(), 1);
}

#[test]
fn cli_style_excludes_apply() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "internal/mocks/m.go", "package mocks\n\nimport \"legacy\"\n");
    write(dir.path(), "main.go", "package main\n\nimport \"legacy\"\n");

    let result = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .exclude("**/mocks/**")
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations[0].location.file, PathBuf::from("main.go"));
}

#[test]
fn non_go_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.txt", "import \"legacy\"\n");
    write(dir.path(), "main.go", "package main\n");

    let result = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 1);
}

#[test]
fn broken_file_aborts_only_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "broken.go",
        "package main\n\nimport \"legacy\"\n\nfunc main( {\n",
    );

    let lenient = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .build()
        .unwrap()
        .analyze()
        .unwrap();
    assert_eq!(lenient.violations.len(), 1);

    let strict = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .fail_on_parse_error(true)
        .build()
        .unwrap()
        .analyze();
    assert!(matches!(strict, Err(AnalyzerError::Parse { .. })));
}

#[test]
fn empty_exclude_list_checks_vendor() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "vendor/x/x.go", "package x\n\nimport \"legacy\"\n");

    let config =
        Config::parse("[analyzer]\nexclude = []\n\n[[deny]]\nfrom = \".*\"\nto = \"legacy\"\n")
            .unwrap();
    let result = Analyzer::builder()
        .root(dir.path())
        .config(config)
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(
        result.violations[0].location.file,
        PathBuf::from("vendor/x/x.go")
    );
}

#[test]
fn non_utf8_file_is_skipped_without_losing_others() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.go", "package a\n\nimport \"legacy\"\n");
    let bad = dir.path().join("b.go");
    fs::write(&bad, b"package b\n\xff\xfe\n").unwrap();

    let result = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].location.file, PathBuf::from("a.go"));

    let strict = Analyzer::builder()
        .root(dir.path())
        .config(deny_all_legacy())
        .fail_on_parse_error(true)
        .build()
        .unwrap()
        .analyze();
    assert!(matches!(strict, Err(AnalyzerError::Parse { .. })));
}

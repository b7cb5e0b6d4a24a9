//! List rules command implementation.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use depcheck_core::{load_setting, Rule, RuleKind, Setting};

use crate::config_resolver::ConfigSource;

/// Runs the list-rules command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let setting = load_setting(config.rules()).context("Invalid rule pattern")?;

    println!("Rules from {source}:\n");
    print!("{}", render(&setting));

    if setting.is_empty() {
        println!("\nRun `depcheck init` to create a depcheck.toml.");
    }
    Ok(())
}

fn render(setting: &Setting) -> String {
    let mut out = String::new();
    section(&mut out, RuleKind::Allow, setting.allow());
    out.push('\n');
    section(&mut out, RuleKind::Deny, setting.deny());
    out
}

fn section(out: &mut String, kind: RuleKind, rules: &[Rule]) {
    let _ = writeln!(out, "{} ({}, {} rule(s))", kind.name(), kind.code(), rules.len());
    if rules.is_empty() {
        out.push_str("  (none)\n");
        return;
    }

    let _ = writeln!(out, "  {:<4} {:<24} {:<24} Message", "#", "From", "To");
    for (i, rule) in rules.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:<4} {:<24} {:<24} {}",
            i,
            rule.from_pattern().as_str(),
            rule.to_pattern().as_str(),
            rule.configured_message().unwrap_or("(default)")
        );
    }
}

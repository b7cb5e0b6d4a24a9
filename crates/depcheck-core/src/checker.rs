//! Import evaluation.
//!
//! For every import of a file, the applicable allow rules are walked in
//! order and the first one the import does NOT satisfy is reported; then
//! the applicable deny rules are walked and the first one the import DOES
//! satisfy is reported. The two checks never suppress each other, so one
//! import yields zero, one or two diagnostics.

use tracing::debug;

use crate::index::{ApplicableRules, RuleIndex};
use crate::rule::{Rule, RuleKind};
use crate::setting::Setting;
use crate::types::{Diagnostic, Import};

/// Evaluates a single import against the rules applicable to its file.
///
/// Yields at most one allow diagnostic followed by at most one deny
/// diagnostic. An empty rule list of either kind performs no check.
pub fn evaluate(
    import: &Import,
    rules: &ApplicableRules<'_>,
) -> impl Iterator<Item = Diagnostic> {
    let allow = rules
        .allow
        .iter()
        .find(|r| !r.satisfied_by(&import.path))
        .map(|r| diagnostic(import, r, RuleKind::Allow));

    let deny = rules
        .deny
        .iter()
        .find(|r| r.satisfied_by(&import.path))
        .map(|r| diagnostic(import, r, RuleKind::Deny));

    allow.into_iter().chain(deny)
}

/// Checks every import of one file and returns the violations in import order.
///
/// `relative_path` is the file path relative to the project root; `imports`
/// must be in source order with already unquoted paths.
#[must_use]
pub fn check_file(setting: &Setting, relative_path: &str, imports: &[Import]) -> Vec<Diagnostic> {
    let rules = RuleIndex::new(setting).applicable(relative_path);
    if rules.is_empty() {
        debug!("No rules apply to {relative_path}");
        return Vec::new();
    }

    debug!(
        "{relative_path}: {} allow / {} deny rule(s) apply",
        rules.allow.len(),
        rules.deny.len()
    );

    imports
        .iter()
        .flat_map(|import| evaluate(import, &rules))
        .collect()
}

fn diagnostic(import: &Import, rule: &Rule, kind: RuleKind) -> Diagnostic {
    Diagnostic {
        span: import.span,
        kind,
        message: rule.message(&import.path).into_owned(),
    }
}

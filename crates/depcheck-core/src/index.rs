//! Per-file rule selection.

use crate::rule::Rule;
use crate::setting::Setting;

/// Returns the rules whose from-pattern matches `relative_path`, in order.
#[must_use]
pub fn select<'a>(relative_path: &str, rules: &'a [Rule]) -> Vec<&'a Rule> {
    rules.iter().filter(|r| r.applies_to(relative_path)).collect()
}

/// Selects the rules that govern a given file.
#[derive(Debug, Clone, Copy)]
pub struct RuleIndex<'a> {
    setting: &'a Setting,
}

impl<'a> RuleIndex<'a> {
    /// Creates an index over a compiled setting.
    #[must_use]
    pub fn new(setting: &'a Setting) -> Self {
        Self { setting }
    }

    /// Returns the allow and deny rules applicable to `relative_path`.
    #[must_use]
    pub fn applicable(&self, relative_path: &str) -> ApplicableRules<'a> {
        ApplicableRules {
            allow: select(relative_path, self.setting.allow()),
            deny: select(relative_path, self.setting.deny()),
        }
    }
}

/// The subset of a [`Setting`] whose from-patterns match one file.
#[derive(Debug, Clone, Default)]
pub struct ApplicableRules<'a> {
    /// Applicable allow rules, in configuration order.
    pub allow: Vec<&'a Rule>,
    /// Applicable deny rules, in configuration order.
    pub deny: Vec<&'a Rule>,
}

impl ApplicableRules<'_> {
    /// Returns true when no rule governs the file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }
}

//! Compiled rule sets.
//!
//! A [`Setting`] is built once per run from a [`RulesConfig`] and then only
//! read. Every pattern is compiled up front, so a bad regex aborts the run
//! before any file is looked at.

use tracing::debug;

use crate::config::{ConfigError, RuleConfig, RulesConfig};
use crate::pattern::Pattern;
use crate::rule::{Rule, RuleKind};

/// The full, compiled rule configuration: ordered allow and deny rules.
#[derive(Debug, Clone, Default)]
pub struct Setting {
    allow: Vec<Rule>,
    deny: Vec<Rule>,
}

impl Setting {
    /// Creates a setting from compiled rules.
    ///
    /// Each list is evaluated with its own polarity, whatever the
    /// [`RuleKind`] of the rules placed in it.
    #[must_use]
    pub fn new(allow: Vec<Rule>, deny: Vec<Rule>) -> Self {
        Self { allow, deny }
    }

    /// Allow rules in configuration order.
    #[must_use]
    pub fn allow(&self) -> &[Rule] {
        &self.allow
    }

    /// Deny rules in configuration order.
    #[must_use]
    pub fn deny(&self) -> &[Rule] {
        &self.deny
    }

    /// Returns true if there are no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }

    /// Total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allow.len() + self.deny.len()
    }
}

/// Compiles every rule in `config` into a [`Setting`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] for the first from/to pattern
/// that is not a valid regular expression, in configuration order
/// (allow list first).
pub fn load_setting(config: &RulesConfig) -> Result<Setting, ConfigError> {
    let allow = compile_list(RuleKind::Allow, &config.allow)?;
    let deny = compile_list(RuleKind::Deny, &config.deny)?;
    debug!(
        "Loaded {} allow rule(s) and {} deny rule(s)",
        allow.len(),
        deny.len()
    );
    Ok(Setting::new(allow, deny))
}

fn compile_list(kind: RuleKind, entries: &[RuleConfig]) -> Result<Vec<Rule>, ConfigError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| compile_entry(kind, entry, i))
        .collect()
}

fn compile_entry(kind: RuleKind, entry: &RuleConfig, index: usize) -> Result<Rule, ConfigError> {
    let ctx = format!("{kind}[{index}]");
    let from = Pattern::compile(&entry.from).map_err(|e| ConfigError::InvalidPattern {
        context: format!("{ctx}.from"),
        source: e,
    })?;
    let to = Pattern::compile(&entry.to).map_err(|e| ConfigError::InvalidPattern {
        context: format!("{ctx}.to"),
        source: e,
    })?;
    Ok(Rule::new(kind, from, to, entry.message.clone()))
}

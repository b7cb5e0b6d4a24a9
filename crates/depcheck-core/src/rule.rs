//! Allow and deny rules.

use std::borrow::Cow;
use std::fmt;

use crate::pattern::{Pattern, PatternError};

/// Which list a rule belongs to, and therefore the polarity of its check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Whitelist: imports must match the to-pattern.
    Allow,
    /// Blacklist: imports must not match the to-pattern.
    Deny,
}

impl RuleKind {
    /// Returns the report code for violations of this kind.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Allow => "DEP001",
            Self::Deny => "DEP002",
        }
    }

    /// Returns the kebab-case rule name used in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Allow => "allow-import",
            Self::Deny => "deny-import",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

/// A single dependency rule.
///
/// The from-pattern selects the files the rule governs (matched against the
/// file path relative to the project root); the to-pattern decides whether a
/// given import path complies. Rules are immutable once compiled.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    from: Pattern,
    to: Pattern,
    message: Option<String>,
}

impl Rule {
    /// Creates a rule from already compiled patterns.
    #[must_use]
    pub fn new(kind: RuleKind, from: Pattern, to: Pattern, message: Option<String>) -> Self {
        Self {
            kind,
            from,
            to,
            message,
        }
    }

    /// Compiles both patterns and creates a rule.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for the first pattern that fails to compile.
    pub fn compile(
        kind: RuleKind,
        from: &str,
        to: &str,
        message: Option<String>,
    ) -> Result<Self, PatternError> {
        Ok(Self::new(
            kind,
            Pattern::compile(from)?,
            Pattern::compile(to)?,
            message,
        ))
    }

    /// Returns the rule kind.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Returns the file-path pattern.
    #[must_use]
    pub fn from_pattern(&self) -> &Pattern {
        &self.from
    }

    /// Returns the import-path pattern.
    #[must_use]
    pub fn to_pattern(&self) -> &Pattern {
        &self.to
    }

    /// Returns the configured message, if any.
    #[must_use]
    pub fn configured_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether this rule governs the file at `relative_path`.
    #[must_use]
    pub fn applies_to(&self, relative_path: &str) -> bool {
        self.from.matches(relative_path)
    }

    /// Whether `import_path` matches the to-pattern.
    #[must_use]
    pub fn satisfied_by(&self, import_path: &str) -> bool {
        self.to.matches(import_path)
    }

    /// Message reported when `import_path` violates this rule.
    ///
    /// Falls back to `import <path> is not allowed` when no message (or an
    /// empty one) is configured.
    #[must_use]
    pub fn message(&self, import_path: &str) -> Cow<'_, str> {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => Cow::Borrowed(m),
            _ => Cow::Owned(format!("import {import_path} is not allowed")),
        }
    }
}

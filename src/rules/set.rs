//! Rule sets and scope inheritance.

use std::collections::TryReserveError;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::Rule;

pub const DEFAULT_OUTPUT_FORMAT: OutputFormat = OutputFormat::Json;
pub const DEFAULT_ALLOW_TEXT: &str = "true";
pub const DEFAULT_DENY_TEXT: &str = "false";

/// Errors raised while building a scope's rules.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rule list could not grow.
    #[error("failed to allocate rule list: {0}")]
    Allocation(#[from] TryReserveError),
}

/// How the verdict text is wrapped in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{"status":"<text>"}`
    #[default]
    Json,
    /// `<text>` as is.
    Text,
}

impl OutputFormat {
    /// Interpret an `output_format` value. Only the exact string `"json"`
    /// selects JSON; every other value means plain text.
    pub fn from_directive(value: &str) -> Self {
        if value == "json" {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Settings a scope declares itself, before inheritance.
#[derive(Debug, Clone, Default)]
pub struct ScopeRules {
    rules: Option<Vec<Rule>>,
    output_format: Option<OutputFormat>,
    allow_text: Option<String>,
    deny_text: Option<String>,
}

impl ScopeRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token, creating the rule list on first use.
    pub fn add_rule(&mut self, token: impl Into<Box<str>>) -> Result<(), ConfigError> {
        let rules = self.rules.get_or_insert_with(Vec::new);
        rules.try_reserve(1)?;
        rules.push(Rule::new(token));
        Ok(())
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = Some(format);
    }

    pub fn set_allow_text(&mut self, text: impl Into<String>) {
        self.allow_text = Some(text.into());
    }

    pub fn set_deny_text(&mut self, text: impl Into<String>) {
        self.deny_text = Some(text.into());
    }

    /// Number of rules declared by this scope itself.
    pub fn rule_count(&self) -> usize {
        self.rules.as_ref().map_or(0, Vec::len)
    }

    /// Effective rule set of a nested scope.
    pub fn merge(&self, parent: &RuleSet) -> RuleSet {
        self.resolve(Some(parent))
    }

    /// Resolve this scope against an optional parent.
    ///
    /// Each setting is taken from this scope if declared, else from the
    /// parent's effective value, else from the built-in default. With no own
    /// rules the parent's list is shared, not copied.
    pub fn resolve(&self, parent: Option<&RuleSet>) -> RuleSet {
        let rules: Arc<[Rule]> = match self.rules.as_deref() {
            Some(own) if !own.is_empty() => Arc::from(own),
            _ => parent
                .map(|p| Arc::clone(&p.rules))
                .unwrap_or_else(|| Arc::from(Vec::new())),
        };

        RuleSet {
            rules,
            output_format: self
                .output_format
                .or(parent.map(|p| p.output_format))
                .unwrap_or(DEFAULT_OUTPUT_FORMAT),
            allow_text: inherit_text(
                self.allow_text.as_deref(),
                parent.map(|p| &p.allow_text),
                DEFAULT_ALLOW_TEXT,
            ),
            deny_text: inherit_text(
                self.deny_text.as_deref(),
                parent.map(|p| &p.deny_text),
                DEFAULT_DENY_TEXT,
            ),
        }
    }
}

fn inherit_text(own: Option<&str>, parent: Option<&Arc<str>>, default: &str) -> Arc<str> {
    match (own, parent) {
        (Some(text), _) => Arc::from(text),
        (None, Some(text)) => Arc::clone(text),
        (None, None) => Arc::from(default),
    }
}

/// The effective, read-only rules of one scope.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    rules: Arc<[Rule]>,
    output_format: OutputFormat,
    allow_text: Arc<str>,
    deny_text: Arc<str>,
}

impl Default for RuleSet {
    fn default() -> Self {
        ScopeRules::new().resolve(None)
    }
}

impl RuleSet {
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn allow_text(&self) -> &str {
        &self.allow_text
    }

    pub fn deny_text(&self) -> &str {
        &self.deny_text
    }

    /// First rule matching `query`.
    pub fn find(&self, query: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(query))
    }

    /// Text reported for a matched or unmatched query.
    pub fn text_for(&self, matched: bool) -> &str {
        if matched {
            &self.allow_text
        } else {
            &self.deny_text
        }
    }

    /// True if both sets point at the same rule list.
    pub fn shares_rules_with(&self, other: &RuleSet) -> bool {
        Arc::ptr_eq(&self.rules, &other.rules)
    }
}

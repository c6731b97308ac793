//! Scope lookup.
//!
//! # Responsibilities
//! - Resolve the configured scope tree into effective RuleSets
//! - Look up the scope serving a request path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical location counts)
//! - Unmatched paths fall back to the server scope, never to a location

use serde::Serialize;

use crate::config::schema::{LocationConfig, ScopeConfig};
use crate::routing::matcher::PathPrefixMatcher;
use crate::rules::{ConfigError, RuleSet};

/// Name of the outermost scope.
pub const SERVER_SCOPE: &str = "server";

/// A resolved scope.
#[derive(Debug, Clone, Serialize)]
pub struct Scope {
    name: String,
    enabled: bool,
    rules: RuleSet,
}

impl Scope {
    /// `"server"` or the location path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether checks are served for this scope.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

#[derive(Debug, Serialize)]
struct Location {
    #[serde(skip)]
    matcher: PathPrefixMatcher,
    #[serde(flatten)]
    scope: Scope,
}

/// All scopes of a configuration, resolved and ready for lookup.
#[derive(Debug, Serialize)]
pub struct ScopeTable {
    server: Scope,
    /// Longest prefix first.
    locations: Vec<Location>,
}

impl ScopeTable {
    /// Resolve the server scope and every nested location.
    pub fn from_config(server: &ScopeConfig) -> Result<Self, ConfigError> {
        let rules = server.to_scope_rules()?.resolve(None);

        let mut locations = Vec::new();
        collect_locations(&server.locations, &rules, &mut locations)?;
        // Stable sort: equal prefixes keep declaration order.
        locations.sort_by(|a, b| b.matcher.prefix().len().cmp(&a.matcher.prefix().len()));

        Ok(Self {
            server: Scope {
                name: SERVER_SCOPE.to_string(),
                enabled: server.enabled,
                rules,
            },
            locations,
        })
    }

    /// Scope serving `path`.
    pub fn lookup(&self, path: &str) -> &Scope {
        self.locations
            .iter()
            .find(|location| location.matcher.matches(path))
            .map(|location| &location.scope)
            .unwrap_or(&self.server)
    }

    pub fn server(&self) -> &Scope {
        &self.server
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }
}

fn collect_locations(
    configs: &[LocationConfig],
    parent: &RuleSet,
    out: &mut Vec<Location>,
) -> Result<(), ConfigError> {
    for config in configs {
        let rules = config.scope.to_scope_rules()?.merge(parent);
        collect_locations(&config.scope.locations, &rules, out)?;

        tracing::debug!(
            location = %config.path,
            enabled = config.scope.enabled,
            rules = rules.rules().len(),
            "Location scope resolved"
        );

        out.push(Location {
            matcher: PathPrefixMatcher::new(config.path.as_str()),
            scope: Scope {
                name: config.path.clone(),
                enabled: config.scope.enabled,
                rules,
            },
        });
    }
    Ok(())
}

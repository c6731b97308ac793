//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::rules::{ConfigError, OutputFormat, ScopeRules};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address, concurrency).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Server scope and its nested locations.
    pub server: ScopeConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum requests processed at the same time (backpressure).
    pub max_concurrent_requests: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_concurrent_requests: 10_000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Largest request body that is drained before answering, in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Filter settings of one scope.
///
/// Unset values are inherited from the enclosing scope when the scope tree
/// is resolved; `enabled` is not inherited.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScopeConfig {
    /// Serve allow/deny checks for requests in this scope.
    pub enabled: bool,

    /// Allowed tokens, matched against the whole query string.
    pub agents: Vec<String>,

    /// "json" (default) or any other value for plain text.
    pub output_format: Option<String>,

    /// Text reported for an allowed query (default "true").
    pub allow_text: Option<String>,

    /// Text reported for a denied query (default "false").
    pub deny_text: Option<String>,

    /// Nested path scopes.
    pub locations: Vec<LocationConfig>,
}

impl ScopeConfig {
    /// Explicit settings of this scope, ready to be merged with its parent.
    pub fn to_scope_rules(&self) -> Result<ScopeRules, ConfigError> {
        let mut scope = ScopeRules::new();
        for agent in &self.agents {
            scope.add_rule(agent.as_str())?;
        }
        if let Some(format) = &self.output_format {
            scope.set_output_format(OutputFormat::from_directive(format));
        }
        if let Some(text) = &self.allow_text {
            scope.set_allow_text(text.as_str());
        }
        if let Some(text) = &self.deny_text {
            scope.set_deny_text(text.as_str());
        }
        Ok(scope)
    }
}

/// A path-prefix scope nested in the server or another location.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Path prefix (e.g., "/check").
    pub path: String,

    #[serde(flatten)]
    pub scope: ScopeConfig,
}

impl LocationConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            scope: ScopeConfig::default(),
        }
    }
}

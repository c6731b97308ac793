//! Allow-list rules and per-scope resolution.
//!
//! # Data Flow
//! ```text
//! config scope (agents, output_format, allow_text, deny_text)
//!     → set.rs ScopeRules (explicit values only, built with add_rule)
//!     → ScopeRules::merge(parent RuleSet)
//!     → RuleSet (effective, immutable, shared by every request)
//! ```
//!
//! # Design Decisions
//! - A scope without rules shares its parent's rule list (`Arc<[Rule]>`)
//! - Text and format settings inherit independently of the rule list
//! - Nothing here is mutated once the server starts accepting requests

pub mod rule;
pub mod set;

pub use rule::Rule;
pub use set::{
    ConfigError, OutputFormat, RuleSet, ScopeRules, DEFAULT_ALLOW_TEXT, DEFAULT_DENY_TEXT,
    DEFAULT_OUTPUT_FORMAT,
};

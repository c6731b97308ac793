//! Scope lookup subsystem.
//!
//! # Data Flow
//! ```text
//! Scope Compilation (at startup and on reload):
//!     [server] + nested [[locations]]
//!     → merge every child with its parent's RuleSet
//!     → flatten, sort by prefix length
//!     → freeze as immutable ScopeTable
//!
//! Incoming Request (path)
//!     → router.rs (scope lookup)
//!     → matcher.rs (path prefix test)
//!     → Return: matched location scope or the server scope
//! ```
//!
//! # Design Decisions
//! - Scopes resolved once, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Longest prefix wins, the server scope is the fallback

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{Scope, ScopeTable, SERVER_SCOPE};

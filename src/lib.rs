//! Query-string allow-list gate.
//!
//! Answers every GET/HEAD request with an allow or deny verdict, depending on
//! whether its raw query string equals one of the configured tokens.

pub mod check;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod rules;

pub use config::GateConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

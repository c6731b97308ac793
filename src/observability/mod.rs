//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request and reload produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID attached to every per-request event
//! - Metrics are cheap (atomic increments)
//! - RUST_LOG overrides the configured log level

pub mod logging;
pub mod metrics;

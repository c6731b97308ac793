//! Allow/deny decision for a single request.
//!
//! # Data Flow
//! ```text
//! method + raw query string + effective RuleSet
//!     → evaluator.rs (method/query checks, linear token scan)
//!     → response.rs (status, text/plain, Content-Length, body)
//!     → axum Response
//! ```
//!
//! # Design Decisions
//! - Pure: no I/O, same input always renders the same bytes
//! - The verdict travels in the body; status stays 200 for allow and deny
//! - Content type is `text/plain` even for the JSON body

pub mod evaluator;
pub mod response;

pub use evaluator::{evaluate, render, Verdict};
pub use response::{CheckResponse, CONTENT_TYPE_TEXT};

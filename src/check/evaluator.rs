//! Request evaluation against a rule set.

use axum::body::Bytes;
use axum::http::{Method, StatusCode};

use crate::check::response::CheckResponse;
use crate::rules::{OutputFormat, RuleSet};

/// Outcome of matching one query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub matched: bool,
}

impl Verdict {
    /// Match `query` against every rule in order.
    pub fn of(query: &str, rules: &RuleSet) -> Self {
        Self {
            matched: rules.find(query).is_some(),
        }
    }

    /// Label used in logs and metrics.
    pub fn label(self) -> &'static str {
        if self.matched {
            "allow"
        } else {
            "deny"
        }
    }
}

/// Render the response body for a verdict.
///
/// The configured text is inserted as is; it is not escaped for JSON.
pub fn render(verdict: Verdict, rules: &RuleSet) -> String {
    let text = rules.text_for(verdict.matched);
    match rules.output_format() {
        OutputFormat::Json => format!("{{\"status\":\"{text}\"}}"),
        OutputFormat::Text => text.to_owned(),
    }
}

/// Decide the response for a request.
///
/// Only GET and HEAD are served (405 otherwise), and the query string must
/// be present and non-empty (400 otherwise). Any request that gets this far
/// is answered with 200; HEAD responses keep the Content-Length of the body
/// they would have carried.
pub fn evaluate(method: &Method, query: Option<&str>, rules: &RuleSet) -> CheckResponse {
    if *method != Method::GET && *method != Method::HEAD {
        return CheckResponse::rejected(StatusCode::METHOD_NOT_ALLOWED);
    }

    let query = match query {
        Some(q) if !q.is_empty() => q,
        _ => return CheckResponse::rejected(StatusCode::BAD_REQUEST),
    };

    let verdict = Verdict::of(query, rules);
    let body = Bytes::from(render(verdict, rules));

    CheckResponse::decided(verdict, body, *method == Method::HEAD)
}

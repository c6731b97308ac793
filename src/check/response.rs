//! Response descriptor produced by the evaluator.

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::check::evaluator::Verdict;

/// Content type of every verdict response, JSON bodies included.
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Status, headers and body of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResponse {
    status: StatusCode,
    verdict: Option<Verdict>,
    content_length: Option<usize>,
    body: Bytes,
}

impl CheckResponse {
    /// Status-only response for a request that never reached matching.
    pub(crate) fn rejected(status: StatusCode) -> Self {
        Self {
            status,
            verdict: None,
            content_length: None,
            body: Bytes::new(),
        }
    }

    /// 200 response carrying a rendered verdict. With `header_only` the
    /// body is dropped but its length is kept.
    pub(crate) fn decided(verdict: Verdict, body: Bytes, header_only: bool) -> Self {
        Self {
            status: StatusCode::OK,
            verdict: Some(verdict),
            content_length: Some(body.len()),
            body: if header_only { Bytes::new() } else { body },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.verdict.map(|_| CONTENT_TYPE_TEXT)
    }

    pub fn content_length(&self) -> Option<usize> {
        self.content_length
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl IntoResponse for CheckResponse {
    fn into_response(self) -> Response {
        let content_type = self.content_type();
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        if let Some(content_type) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        if let Some(len) = self.content_length {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
        }

        response
    }
}

//! Wrike webhook verification handshakes.
//!
//! When a webhook is registered Wrike proves the endpoint is reachable by
//! sending a request carrying one of two headers. The value must come back
//! unchanged: `x-request-token` in the response body, `x-hook-secret` in the
//! `X-Hook-Secret` response header. Handshakes are answered before the body
//! is looked at.

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

pub const REQUEST_TOKEN_HEADER: &str = "x-request-token";
pub const HOOK_SECRET_HEADER: &str = "x-hook-secret";

/// A verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handshake {
    /// Echo the token as the response body.
    RequestToken(HeaderValue),

    /// Echo the secret in the `X-Hook-Secret` response header.
    HookSecret(HeaderValue),
}

impl Handshake {
    /// Detect a handshake. The request token wins when both headers are present;
    /// empty header values do not count.
    pub fn detect(headers: &HeaderMap) -> Option<Self> {
        let present = |name: &str| headers.get(name).filter(|v| !v.is_empty()).cloned();

        present(REQUEST_TOKEN_HEADER)
            .map(Self::RequestToken)
            .or_else(|| present(HOOK_SECRET_HEADER).map(Self::HookSecret))
    }

    /// Short name for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequestToken(_) => "request_token",
            Self::HookSecret(_) => "hook_secret",
        }
    }
}

impl IntoResponse for Handshake {
    fn into_response(self) -> Response {
        match self {
            Self::RequestToken(token) => (
                StatusCode::OK,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                )],
                token.as_bytes().to_vec(),
            )
                .into_response(),
            Self::HookSecret(secret) => {
                let mut response = StatusCode::OK.into_response();
                response.headers_mut().insert(HOOK_SECRET_HEADER, secret);
                response
            }
        }
    }
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;

//! Status and header resolution.
//!
//! The HTTP exchange succeeding and the GraphQL operation succeeding are
//! separate things. Nothing here looks at `errors`: only the transport
//! fragment can move the status away from the default.

use crate::config::TransportConfig;
use gqlhttp_core::PartialHttpResponse;
use http::header::HeaderMap;
use http::StatusCode;

/// The resolved head of an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHead {
    pub status: StatusCode,
    pub status_message: Option<String>,
    pub headers: HeaderMap,
}

/// The fragment's status if it has one, otherwise `default`.
pub fn resolve_status(http: Option<&PartialHttpResponse>, default: StatusCode) -> StatusCode {
    http.and_then(|http| http.status).unwrap_or(default)
}

/// The fragment's headers if it has any, otherwise an empty map.
pub fn resolve_headers(http: Option<&PartialHttpResponse>) -> HeaderMap {
    http.and_then(|http| http.headers.clone())
        .unwrap_or_default()
}

/// Resolves the full response head, consuming the fragment.
///
/// Each field falls back on its own, so a fragment that only carries headers
/// still gets the default status.
pub fn resolve(http: Option<PartialHttpResponse>, config: &TransportConfig) -> ResolvedHead {
    let status = resolve_status(http.as_ref(), config.default_status);
    let headers = resolve_headers(http.as_ref());

    ResolvedHead {
        status,
        status_message: http.and_then(|http| http.status_message),
        headers,
    }
}

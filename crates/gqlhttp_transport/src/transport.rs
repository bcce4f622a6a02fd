//! The request pipeline: invoke, materialize, resolve.

use crate::body::{materialize, ResponseBody};
use crate::config::TransportConfig;
use crate::engine::{invoke, ExecutionEngine};
use crate::policy::resolve;
use gqlhttp_core::{EngineResult, OperationRequest};
use http::header::{HeaderMap, HeaderValue, IntoHeaderName};
use http::{Method, StatusCode};
use tracing::debug;

/// An incoming request, already shaped by the framework adapter.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub url: Option<String>,
    /// The operation parsed out of the body or query string.
    pub parsed_request: OperationRequest,
}

impl HttpRequest {
    /// Creates a request with no headers and no URL.
    pub fn new(method: Method, parsed_request: OperationRequest) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            url: None,
            parsed_request,
        }
    }

    /// Creates a `POST` request.
    pub fn post(parsed_request: OperationRequest) -> Self {
        Self::new(Method::POST, parsed_request)
    }

    /// Creates a `GET` request.
    pub fn get(parsed_request: OperationRequest) -> Self {
        Self::new(Method::GET, parsed_request)
    }

    /// Builds a request from the parts of an `http::Request`.
    pub fn from_parts(parts: http::request::Parts, parsed_request: OperationRequest) -> Self {
        Self {
            method: parts.method,
            headers: parts.headers,
            url: Some(parts.uri.to_string()),
            parsed_request,
        }
    }

    /// Adds a header value.
    pub fn with_header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// The response handed back to the framework adapter.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub status_message: Option<String>,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl HttpResponse {
    /// The numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Converts into an `http::Response`. The status message has no place in
    /// `http::Response` and is dropped.
    pub fn into_http(self) -> http::Response<ResponseBody> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl From<HttpResponse> for http::Response<ResponseBody> {
    fn from(response: HttpResponse) -> Self {
        response.into_http()
    }
}

/// Runs one operation for an HTTP request with the default configuration.
///
/// See [`process_http_request_with`].
pub async fn process_http_request<E>(engine: &E, request: &HttpRequest) -> EngineResult<HttpResponse>
where
    E: ExecutionEngine + ?Sized,
{
    process_http_request_with(engine, request, &TransportConfig::default()).await
}

/// Runs one operation for an HTTP request.
///
/// A failing engine call is returned unchanged; mapping it to a status such
/// as 500 is up to the caller. GraphQL errors inside a successful call are
/// part of the body and do not affect the status.
pub async fn process_http_request_with<E>(
    engine: &E,
    request: &HttpRequest,
    config: &TransportConfig,
) -> EngineResult<HttpResponse>
where
    E: ExecutionEngine + ?Sized,
{
    debug!(method = %request.method, url = ?request.url, "processing GraphQL request");

    let invocation = invoke(engine, &request.parsed_request, config.seed()).await?;
    let (body, http) = materialize(invocation);
    let head = resolve(http, config);

    debug!(
        status = head.status.as_u16(),
        incremental = body.is_incremental(),
        "resolved response"
    );

    Ok(HttpResponse {
        status: head.status,
        status_message: head.status_message,
        headers: head.headers,
        body,
    })
}

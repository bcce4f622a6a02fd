//! The transport fragment: the side channel an engine uses to ask the HTTP
//! layer for a particular status or set of headers.
//!
//! The fragment is never part of a GraphQL result. Engines receive it as an
//! out-parameter ([`ResponseInit`]) and write into it while resolving; engines
//! that speak raw JSON embed it as an `http` member, which
//! [`ResponseWithHttp::from_json`] strips off.

use crate::error::{EngineError, EngineResult};
use crate::response::ExecutionResult;
use http::header::{HeaderMap, HeaderName, HeaderValue, IntoHeaderName};
use http::StatusCode;
use serde_json::Value;
use tracing::warn;

/// Name of the member carrying the fragment in a JSON response.
pub const HTTP_FIELD: &str = "http";

/// Transport hints written by the engine.
///
/// Every field is optional and resolves on its own: a fragment with headers
/// but no status still gets the default status, and the other way round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialHttpResponse {
    pub status: Option<StatusCode>,
    pub status_message: Option<String>,
    pub headers: Option<HeaderMap>,
}

impl PartialHttpResponse {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a header, replacing earlier values.
    pub fn with_header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    /// Decodes a fragment from its JSON form.
    ///
    /// Returns `None` if the value is not an object. `status`, `statusMessage`
    /// and `headers` are decoded independently; an entry that does not decode
    /// is dropped with a warning.
    pub fn from_json(value: Value) -> Option<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            Value::Null => return None,
            other => {
                warn!("ignoring non-object transport fragment: {}", other);
                return None;
            }
        };

        let status = object.remove("status").and_then(decode_status);
        let status_message = match object.remove("statusMessage") {
            Some(Value::String(message)) => Some(message),
            Some(Value::Null) | None => None,
            Some(other) => {
                warn!("ignoring non-string statusMessage: {}", other);
                None
            }
        };
        let headers = object.remove("headers").and_then(decode_headers);

        Some(Self {
            status,
            status_message,
            headers,
        })
    }
}

fn decode_status(value: Value) -> Option<StatusCode> {
    let status = value
        .as_u64()
        .and_then(|code| u16::try_from(code).ok())
        .and_then(|code| StatusCode::from_u16(code).ok());
    if status.is_none() && !value.is_null() {
        warn!("ignoring invalid status in transport fragment: {}", value);
    }
    status
}

fn decode_headers(value: Value) -> Option<HeaderMap> {
    let entries = match value {
        Value::Object(entries) => entries,
        Value::Null => return None,
        other => {
            warn!("ignoring non-object headers in transport fragment: {}", other);
            return None;
        }
    };

    let mut headers = HeaderMap::with_capacity(entries.len());
    for (name, value) in entries {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            warn!("ignoring invalid header name {:?}", name);
            continue;
        };
        let values = match value {
            Value::Array(values) => values,
            single => vec![single],
        };
        // Keys differing only in case name the same header; the later key wins.
        let mut replaced = false;
        for value in values {
            match decode_header_value(&value) {
                Some(value) if !replaced => {
                    headers.insert(name.clone(), value);
                    replaced = true;
                }
                Some(value) => {
                    headers.append(name.clone(), value);
                }
                None => warn!("ignoring invalid value for header {}: {}", name, value),
            }
        }
    }
    Some(headers)
}

fn decode_header_value(value: &Value) -> Option<HeaderValue> {
    match value {
        Value::String(s) => HeaderValue::from_str(s).ok(),
        Value::Number(n) => HeaderValue::from_str(&n.to_string()).ok(),
        Value::Bool(b) => Some(HeaderValue::from_static(if *b { "true" } else { "false" })),
        _ => None,
    }
}

/// The response-context seed handed to the engine.
///
/// Owned by a single invocation. The engine mutates it in place; whatever it
/// holds once the call returns is the authoritative fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseInit {
    pub http: Option<PartialHttpResponse>,
}

impl ResponseInit {
    /// Creates a seed with no fragment at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a seed whose fragment carries the given headers.
    pub fn with_headers(headers: HeaderMap) -> Self {
        Self {
            http: Some(PartialHttpResponse {
                headers: Some(headers),
                ..PartialHttpResponse::default()
            }),
        }
    }

    /// Returns the fragment, creating an empty one if the seed has none.
    pub fn http_mut(&mut self) -> &mut PartialHttpResponse {
        self.http.get_or_insert_with(PartialHttpResponse::default)
    }

    /// Requests a response status.
    pub fn set_status(&mut self, status: StatusCode) {
        self.http_mut().status = Some(status);
    }

    /// Requests a header, replacing earlier values.
    pub fn set_header<K: IntoHeaderName>(&mut self, name: K, value: HeaderValue) {
        self.http_mut()
            .headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
    }

    /// Requests an additional value for a header.
    pub fn append_header<K: IntoHeaderName>(&mut self, name: K, value: HeaderValue) {
        self.http_mut()
            .headers
            .get_or_insert_with(HeaderMap::new)
            .append(name, value);
    }

    /// Removes the fragment entirely and returns it.
    pub fn clear_http(&mut self) -> Option<PartialHttpResponse> {
        self.http.take()
    }
}

/// An execution result travelling together with its transport fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseWithHttp {
    pub result: ExecutionResult,
    pub http: Option<PartialHttpResponse>,
}

impl ResponseWithHttp {
    /// Pairs a result with a fragment.
    pub fn new(result: ExecutionResult, http: Option<PartialHttpResponse>) -> Self {
        Self { result, http }
    }

    /// Splits a raw JSON response into the logical result and the fragment
    /// found under its `http` member.
    ///
    /// The member is removed before the rest is decoded, so it can never end
    /// up in the result.
    pub fn from_json(value: Value) -> EngineResult<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(EngineError::invalid_response(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let http = object
            .remove(HTTP_FIELD)
            .and_then(PartialHttpResponse::from_json);
        let result = serde_json::from_value(Value::Object(object)).map_err(|e| {
            EngineError::invalid_response("response does not match the GraphQL format")
                .with_source(e)
        })?;

        Ok(Self { result, http })
    }

    /// Separates the fragment from the logical result.
    pub fn into_parts(self) -> (ExecutionResult, Option<PartialHttpResponse>) {
        (self.result, self.http)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use http::header::{CACHE_CONTROL, CONTENT_TYPE};
    use serde_json::json;

    #[test]
    fn test_from_json_strips_http_member() {
        let split = ResponseWithHttp::from_json(json!({
            "data": { "books": [] },
            "http": { "status": 404, "headers": { "Cache-Control": "no-store" } }
        }))
        .unwrap();

        let (result, http) = split.into_parts();
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({ "data": { "books": [] } }));

        let http = http.unwrap();
        assert_eq!(http.status, Some(StatusCode::NOT_FOUND));
        assert_eq!(http.headers.unwrap()[CACHE_CONTROL], "no-store");
    }

    #[test]
    fn test_sub_fields_fall_back_independently() {
        let http = PartialHttpResponse::from_json(json!({
            "status": "teapot",
            "headers": { "x-trace": ["a", "b"], "bad header": "x" }
        }))
        .unwrap();

        assert_eq!(http.status, None);
        let headers = http.headers.unwrap();
        assert_eq!(headers.get_all("x-trace").iter().count(), 2);
        assert_eq!(headers.len(), 2);

        let http = PartialHttpResponse::from_json(json!({ "status": 201 })).unwrap();
        assert_eq!(http.status, Some(StatusCode::CREATED));
        assert_eq!(http.headers, None);
    }

    #[test]
    fn test_header_keys_are_case_insensitive() {
        let http = PartialHttpResponse::from_json(json!({
            "headers": {
                "Cache-Control": "no-store",
                "cache-control": "max-age=60",
                "X-Trace": ["a", "b"]
            }
        }))
        .unwrap();

        let headers = http.headers.unwrap();
        let cache_control: Vec<_> = headers.get_all(CACHE_CONTROL).iter().collect();
        assert_eq!(cache_control, ["max-age=60"]);
        assert_eq!(headers.get_all("x-trace").iter().count(), 2);
    }

    #[test]
    fn test_out_of_range_status_is_dropped() {
        let http = PartialHttpResponse::from_json(json!({ "status": 70000 })).unwrap();
        assert_eq!(http.status, None);
    }

    #[test]
    fn test_non_object_response_is_an_engine_error() {
        let err = ResponseWithHttp::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidResponse);
        assert!(err.message.contains("an array"));
    }

    #[test]
    fn test_seed_mutation() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut init = ResponseInit::with_headers(headers);

        init.set_status(StatusCode::ACCEPTED);
        init.append_header("x-cache", HeaderValue::from_static("miss"));

        let http = init.http.clone().unwrap();
        assert_eq!(http.status, Some(StatusCode::ACCEPTED));
        assert_eq!(http.headers.unwrap().len(), 2);

        assert!(init.clear_http().is_some());
        assert_eq!(init, ResponseInit::new());
    }
}

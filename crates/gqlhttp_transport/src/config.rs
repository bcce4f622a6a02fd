//! Transport configuration.

use gqlhttp_core::ResponseInit;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::StatusCode;

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Status used when the engine does not ask for one.
    pub default_status: StatusCode,
    /// `content-type` placed in every response-context seed. `None` hands the
    /// engine a seed without any fragment.
    pub content_type: Option<HeaderValue>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self {
            default_status: StatusCode::OK,
            content_type: Some(HeaderValue::from_static("application/json")),
        }
    }

    /// Sets the default status.
    pub fn default_status(mut self, status: StatusCode) -> Self {
        self.default_status = status;
        self
    }

    /// Sets the seeded content type.
    pub fn content_type(mut self, content_type: HeaderValue) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Stops seeding a content type.
    pub fn no_content_type(mut self) -> Self {
        self.content_type = None;
        self
    }

    /// Builds a fresh seed for one invocation.
    pub fn seed(&self) -> ResponseInit {
        match &self.content_type {
            Some(content_type) => {
                let mut headers = HeaderMap::new();
                headers.insert(CONTENT_TYPE, content_type.clone());
                ResponseInit::with_headers(headers)
            }
            None => ResponseInit::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_carries_json_content_type() {
        let seed = TransportConfig::new().seed();
        let http = seed.http.unwrap();

        assert_eq!(http.status, None);
        assert_eq!(http.headers.unwrap()["content-type"], "application/json");
    }

    #[test]
    fn test_seed_without_content_type() {
        let seed = TransportConfig::new().no_content_type().seed();
        assert!(seed.http.is_none());
    }

    #[test]
    fn test_each_seed_is_fresh() {
        let config = TransportConfig::new();
        let mut first = config.seed();
        first.set_status(StatusCode::NOT_FOUND);

        assert_eq!(config.seed().http.unwrap().status, None);
    }
}

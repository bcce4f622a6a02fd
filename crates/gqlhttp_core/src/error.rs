//! Errors raised when the execution engine itself fails.
//!
//! GraphQL errors produced while resolving an operation are data and live in
//! [`crate::response::GraphQLError`]. The types here describe the case where
//! the engine could not produce a response at all.

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Typed codes for engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The schema could not be built or is misconfigured.
    SchemaError,
    /// The engine failed while executing the operation.
    ExecutionError,
    /// The engine answered with something that is not a GraphQL response.
    InvalidResponse,
    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SchemaError => "SCHEMA_ERROR",
            Self::ExecutionError => "EXECUTION_ERROR",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// The HTTP status a caller should answer with when it maps this failure
    /// onto the transport.
    pub const fn suggested_status(&self) -> StatusCode {
        match self {
            Self::SchemaError | Self::ExecutionError | Self::InvalidResponse | Self::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure of the delegated execution call.
///
/// This is fatal for the current request. The transport never retries and
/// never turns it into a GraphQL error; it is handed back to the caller as is.
#[derive(Error, Debug)]
#[error("[{code}] {message}")]
pub struct EngineError {
    /// Typed error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Underlying cause reported by the engine.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EngineError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SchemaError, message)
    }

    /// Creates an execution error.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExecutionError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidResponse, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Shorthand for `self.code.suggested_status()`.
    pub fn suggested_status(&self) -> StatusCode {
        self.code.suggested_status()
    }
}

/// Type alias for engine results.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = EngineError::schema("Query type is missing");
        assert_eq!(err.to_string(), "[SCHEMA_ERROR] Query type is missing");
    }

    #[test]
    fn test_error_source_is_kept() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = EngineError::internal("loading schema").with_source(io);

        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("disk gone"));
    }

    #[test]
    fn test_suggested_status() {
        assert_eq!(
            EngineError::execution("boom").suggested_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

//! HTTP transport for GraphQL execution.
//!
//! Sits between an HTTP framework and a GraphQL engine. The framework adapter
//! hands over an [`HttpRequest`] with the operation already parsed; this crate
//! runs the operation once and returns an [`HttpResponse`] whose body is a
//! lazy stream of result frames.
//!
//! # Example
//!
//! ```ignore
//! use gqlhttp_transport::{process_http_request, HttpRequest};
//! use gqlhttp_core::OperationRequest;
//! use futures::StreamExt;
//!
//! let request = HttpRequest::post(OperationRequest::new("query { books { author } }"));
//! let mut response = process_http_request(&engine, &request).await?;
//!
//! assert_eq!(response.status_code(), 200);
//! while let Some(frame) = response.body.next().await {
//!     write_json(&frame);
//! }
//! ```
//!
//! Engines influence the response through the [`ResponseInit`] seed they
//! receive, e.g. `init.set_status(StatusCode::NOT_FOUND)`.
//!
//! [`ResponseInit`]: gqlhttp_core::ResponseInit

pub mod body;
pub mod config;
pub mod engine;
pub mod policy;
pub mod transport;

pub use body::{materialize, FrameSender, ResponseBody, SendError};
pub use config::TransportConfig;
pub use engine::{invoke, ExecutionEngine, ExecutionResponse, Invocation, Json, JsonExecutionEngine};
pub use policy::{resolve, resolve_headers, resolve_status, ResolvedHead};
pub use transport::{process_http_request, process_http_request_with, HttpRequest, HttpResponse};

// Re-export the types engines and adapters need
pub use async_trait::async_trait;
pub use gqlhttp_core::{
    EngineError, EngineResult, ErrorCode, ExecutionResult, GraphQLError, OperationRequest,
    PartialHttpResponse, PathSegment, ResponseInit,
};

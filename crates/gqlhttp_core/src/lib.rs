//! Core data model for gqlhttp.
//!
//! Transport-agnostic shapes for a GraphQL operation and its result, plus the
//! transport fragment that lets an execution engine influence the HTTP
//! response without leaking into the GraphQL payload.

pub mod error;
pub mod fragment;
pub mod request;
pub mod response;

pub use error::{EngineError, EngineResult, ErrorCode};
pub use fragment::{PartialHttpResponse, ResponseInit, ResponseWithHttp, HTTP_FIELD};
pub use request::OperationRequest;
pub use response::{ExecutionResult, GraphQLError, Location, PathSegment};

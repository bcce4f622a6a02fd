//! The call boundary to the GraphQL execution engine.
//!
//! The engine is a black box: it gets the operation and a response-context
//! seed, and answers with either a single result or a stream of frames. The
//! seed is an out-parameter; whatever the engine left in it when the call
//! returns is read back as the transport fragment.

use async_trait::async_trait;
use futures::stream::BoxStream;
use gqlhttp_core::{
    EngineResult, ExecutionResult, OperationRequest, PartialHttpResponse, ResponseInit,
    ResponseWithHttp,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// What an engine produced for one operation.
pub enum ExecutionResponse {
    /// A plain query or mutation: exactly one result.
    Single(ExecutionResult),
    /// Incremental delivery (`@defer`/`@stream`) or a subscription.
    Incremental(BoxStream<'static, ExecutionResult>),
}

impl ExecutionResponse {
    /// Returns true for the multi-frame variant.
    pub fn is_incremental(&self) -> bool {
        matches!(self, Self::Incremental(_))
    }
}

impl From<ExecutionResult> for ExecutionResponse {
    fn from(result: ExecutionResult) -> Self {
        Self::Single(result)
    }
}

impl fmt::Debug for ExecutionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(result) => f.debug_tuple("Single").field(result).finish(),
            Self::Incremental(_) => f.write_str("Incremental(..)"),
        }
    }
}

/// A GraphQL execution engine.
///
/// Errors raised while resolving fields belong in the returned result's
/// `errors`. `Err` means the engine could not execute at all.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    async fn execute_operation(
        &self,
        request: &OperationRequest,
        init: &mut ResponseInit,
    ) -> EngineResult<ExecutionResponse>;
}

#[async_trait]
impl<E: ExecutionEngine + ?Sized> ExecutionEngine for Arc<E> {
    async fn execute_operation(
        &self,
        request: &OperationRequest,
        init: &mut ResponseInit,
    ) -> EngineResult<ExecutionResponse> {
        (**self).execute_operation(request, init).await
    }
}

/// An engine that answers with raw JSON response documents.
///
/// The document may carry the transport fragment as an `http` member.
#[async_trait]
pub trait JsonExecutionEngine: Send + Sync {
    async fn execute_json(
        &self,
        request: &OperationRequest,
        init: &mut ResponseInit,
    ) -> EngineResult<serde_json::Value>;
}

/// Adapts a [`JsonExecutionEngine`] to [`ExecutionEngine`].
///
/// An `http` member embedded in the document replaces the seed.
#[derive(Debug, Clone, Default)]
pub struct Json<E>(pub E);

#[async_trait]
impl<E: JsonExecutionEngine> ExecutionEngine for Json<E> {
    async fn execute_operation(
        &self,
        request: &OperationRequest,
        init: &mut ResponseInit,
    ) -> EngineResult<ExecutionResponse> {
        let document = self.0.execute_json(request, init).await?;
        let (result, http) = ResponseWithHttp::from_json(document)?.into_parts();
        if http.is_some() {
            init.http = http;
        }
        Ok(ExecutionResponse::Single(result))
    }
}

/// The outcome of a successful engine call.
#[derive(Debug)]
pub struct Invocation {
    pub response: ExecutionResponse,
    /// The seed's fragment as the engine left it.
    pub http: Option<PartialHttpResponse>,
}

/// Calls the engine exactly once.
///
/// The seed is taken by value so it cannot outlive this invocation or be
/// handed to another request.
pub async fn invoke<E>(
    engine: &E,
    request: &OperationRequest,
    mut init: ResponseInit,
) -> EngineResult<Invocation>
where
    E: ExecutionEngine + ?Sized,
{
    debug!(
        operation = request.operation_name.as_deref().unwrap_or("<anonymous>"),
        "executing operation"
    );

    let response = engine.execute_operation(request, &mut init).await?;

    Ok(Invocation {
        response,
        http: init.http,
    })
}

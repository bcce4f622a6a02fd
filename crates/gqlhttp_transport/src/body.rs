//! Response bodies.
//!
//! A body is a lazy, single-pass sequence of result frames. A plain query
//! yields one frame; incremental delivery and subscriptions yield as many as
//! the engine produces. Consumers only ever see [`ResponseBody`] as a
//! [`Stream`], so the multi-frame case needs no separate interface.

use crate::engine::{ExecutionResponse, Invocation};
use futures::stream::{BoxStream, FusedStream, Stream, StreamExt};
use futures::ready;
use gqlhttp_core::{ExecutionResult, PartialHttpResponse};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::trace;

/// The body of an HTTP response.
///
/// Not restartable: once the last frame has been taken every further poll
/// returns `None`. Dropping the body drops the underlying producer.
pub enum ResponseBody {
    /// One frame, taken on first poll.
    Single(Option<ExecutionResult>),
    /// Any number of frames. `None` once the producer is exhausted.
    Stream(Option<BoxStream<'static, ExecutionResult>>),
}

impl ResponseBody {
    /// Creates a body yielding exactly one frame.
    pub fn single(frame: ExecutionResult) -> Self {
        Self::Single(Some(frame))
    }

    /// Creates a body over a stream of frames.
    pub fn from_stream(stream: impl Stream<Item = ExecutionResult> + Send + 'static) -> Self {
        Self::Stream(Some(stream.boxed()))
    }

    /// Creates a channel-backed body and the sender feeding it.
    ///
    /// The body ends once every [`FrameSender`] has been dropped. Dropping the
    /// body closes the channel, which producers can observe through
    /// [`FrameSender::is_closed`] or [`FrameSender::closed`].
    pub fn channel(buffer: usize) -> (Self, FrameSender) {
        let (sender, receiver) = mpsc::channel(buffer);
        let stream = futures::stream::unfold(receiver, |mut receiver| async move {
            receiver.recv().await.map(|frame| (frame, receiver))
        });
        (Self::from_stream(stream), FrameSender { sender })
    }

    /// Returns true if the body may yield more than one frame.
    pub fn is_incremental(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Waits for the next frame.
    pub async fn next_frame(&mut self) -> Option<ExecutionResult> {
        self.next().await
    }

    /// Drains the remaining frames.
    pub async fn collect_frames(self) -> Vec<ExecutionResult> {
        self.collect().await
    }
}

impl From<ExecutionResponse> for ResponseBody {
    fn from(response: ExecutionResponse) -> Self {
        match response {
            ExecutionResponse::Single(result) => Self::single(result),
            ExecutionResponse::Incremental(stream) => Self::Stream(Some(stream)),
        }
    }
}

impl Stream for ResponseBody {
    type Item = ExecutionResult;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut() {
            Self::Single(frame) => {
                let frame = frame.take();
                if frame.is_some() {
                    trace!("yielding single frame");
                }
                Poll::Ready(frame)
            }
            Self::Stream(slot) => {
                let Some(stream) = slot.as_mut() else {
                    return Poll::Ready(None);
                };
                let frame = ready!(stream.as_mut().poll_next(cx));
                match &frame {
                    Some(_) => trace!("yielding incremental frame"),
                    None => *slot = None,
                }
                Poll::Ready(frame)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Single(frame) => {
                let n = usize::from(frame.is_some());
                (n, Some(n))
            }
            Self::Stream(Some(stream)) => stream.size_hint(),
            Self::Stream(None) => (0, Some(0)),
        }
    }
}

impl FusedStream for ResponseBody {
    fn is_terminated(&self) -> bool {
        matches!(self, Self::Single(None) | Self::Stream(None))
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(frame) => f.debug_tuple("Single").field(frame).finish(),
            Self::Stream(Some(_)) => f.write_str("Stream(..)"),
            Self::Stream(None) => f.write_str("Stream(done)"),
        }
    }
}

/// Splits an invocation into the client-facing body and the transport
/// fragment.
///
/// The fragment is moved out; nothing of it reaches the body.
pub fn materialize(invocation: Invocation) -> (ResponseBody, Option<PartialHttpResponse>) {
    let Invocation { response, http } = invocation;
    (ResponseBody::from(response), http)
}

/// Feeds frames into a channel-backed [`ResponseBody`].
#[derive(Debug, Clone)]
pub struct FrameSender {
    sender: mpsc::Sender<ExecutionResult>,
}

impl FrameSender {
    /// Sends a frame, waiting for buffer space.
    pub async fn send(&self, frame: ExecutionResult) -> Result<(), SendError> {
        self.sender.send(frame).await.map_err(|_| SendError::Closed)
    }

    /// Checks if the body has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Resolves once the body has been dropped.
    pub async fn closed(&self) {
        self.sender.closed().await;
    }
}

/// Error when sending frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// The body has been dropped.
    Closed,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Closed => write!(f, "response body dropped"),
        }
    }
}

impl std::error::Error for SendError {}

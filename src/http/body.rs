//! Response body type shared by every handler
//!
//! Buffered and streamed responses both travel as one boxed body so the
//! router can return a single concrete type.

use bytes::Bytes;
use futures_util::Stream;
use http_body_util::{combinators::UnsyncBoxBody, BodyExt, Empty, Full, StreamBody};
use hyper::body::Frame;
use std::convert::Infallible;

pub type ResponseBody = UnsyncBoxBody<Bytes, Infallible>;

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new().boxed_unsync()
}

pub fn full<T: Into<Bytes>>(chunk: T) -> ResponseBody {
    Full::new(chunk.into()).boxed_unsync()
}

/// Each item becomes one frame on the wire, written as soon as it is yielded
pub fn streamed<S>(frames: S) -> ResponseBody
where
    S: Stream<Item = Result<Frame<Bytes>, Infallible>> + Send + 'static,
{
    StreamBody::new(frames).boxed_unsync()
}

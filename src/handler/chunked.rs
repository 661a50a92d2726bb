//! Chunked streaming response
//!
//! Three fixed segments, one second apart, each written as its own frame.

use crate::http::{self, body, response::TEXT_PLAIN, ResponseBody};
use bytes::Bytes;
use futures_util::{stream, Stream};
use hyper::body::Frame;
use hyper::Response;
use std::convert::Infallible;
use std::time::Duration;

pub const CHUNKS: [&str; 3] = ["Chunk 1\n", "Chunk 2\n", "Chunk 3\n"];
pub const CHUNK_INTERVAL: Duration = Duration::from_secs(1);

/// Lazily yields `CHUNKS`, pausing `interval` before every segment but the first
pub fn chunk_frames(
    interval: Duration,
) -> impl Stream<Item = Result<Frame<Bytes>, Infallible>> + Send {
    stream::unfold(0usize, move |index| async move {
        let chunk: &'static str = *CHUNKS.get(index)?;
        if index > 0 {
            tokio::time::sleep(interval).await;
        }
        Some((Ok(Frame::data(Bytes::from_static(chunk.as_bytes()))), index + 1))
    })
}

pub fn handle() -> Response<ResponseBody> {
    // No Content-Length is set, so hyper falls back to Transfer-Encoding: chunked
    let frames = body::streamed(chunk_frames(CHUNK_INTERVAL));
    http::build_streaming_response(TEXT_PLAIN, frames)
}

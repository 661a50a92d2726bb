//! Echo endpoint: reflect the request back as JSON

use super::rejection::Rejection;
use super::snapshot::RequestSnapshot;
use crate::http::{self, ResponseBody};
use crate::logger;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::http::request::Parts;
use hyper::{Response, StatusCode};

pub async fn handle<B>(parts: Parts, body: B, max_body_size: u64) -> Response<ResponseBody>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let raw = match read_body(body, max_body_size).await {
        Ok(raw) => raw,
        Err(rejection) => return rejection.into_response(),
    };

    let snapshot = RequestSnapshot::capture(&parts, raw).await;
    http::build_json_response(StatusCode::OK, &snapshot)
}

/// Buffer the whole body, up to `max_body_size` bytes
///
/// A body that breaks off mid-read is reflected as empty rather than failing.
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, Rejection>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_warning(&format!(
                "Echo body exceeded {max_body_size} bytes, rejecting"
            ));
            Err(Rejection::PayloadTooLarge)
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read echo body: {e}"));
            Ok(Bytes::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::Request;

    async fn echo_json(
        request: Request<Full<Bytes>>,
        limit: u64,
    ) -> (StatusCode, serde_json::Value) {
        let (parts, body) = request.into_parts();
        let response = handle(parts, body, limit).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_reflects_every_field() {
        let request = Request::builder()
            .method("PATCH")
            .uri("/api/echo?debug=1")
            .header("X-Trace", "abc")
            .body(Full::new(Bytes::from_static(b"payload")))
            .unwrap();
        let (status, value) = echo_json(request, 1024).await;

        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["method", "path", "args", "headers", "body", "form"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(keys.len(), 6);
        assert_eq!(value["method"], "PATCH");
        assert_eq!(value["path"], "/api/echo");
        assert_eq!(value["args"]["debug"], "1");
        assert_eq!(value["headers"]["X-Trace"], "abc");
        assert_eq!(value["body"], "payload");
    }

    #[tokio::test]
    async fn test_body_over_limit_is_413() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/echo")
            .body(Full::new(Bytes::from(vec![b'a'; 64])))
            .unwrap();
        let (status, _) = echo_json(request, 16).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_empty_body() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/echo")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, value) = echo_json(request, 1024).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["method"], "DELETE");
        assert_eq!(value["body"], "");
    }
}

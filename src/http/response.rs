//! HTTP response building module
//!
//! Builders for the responses the reflector sends, decoupled from the handlers.

use super::body::{self, ResponseBody};
use bytes::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";

/// Build a buffered response with the given content type
pub fn build_response(
    status: StatusCode,
    content_type: &str,
    content: impl Into<Bytes>,
) -> Response<ResponseBody> {
    let content = content.into();
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(body::full(content.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(body::full(content))
        })
}

/// Build a plain text response
///
/// Flask answers `return "...", 400` with an HTML content type; the fixture keeps that.
pub fn build_text_response(
    status: StatusCode,
    content: impl Into<Bytes>,
) -> Response<ResponseBody> {
    build_response(status, TEXT_HTML, content)
}

/// Build JSON response
pub fn build_json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<ResponseBody> {
    match serde_json::to_vec(value) {
        Ok(mut json) => {
            json.push(b'\n');
            build_response(status, APPLICATION_JSON, json)
        }
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                APPLICATION_JSON,
                r#"{"error":"Internal server error"}"#,
            )
        }
    }
}

/// Build a response whose body is written frame by frame
pub fn build_streaming_response(
    content_type: &str,
    content: ResponseBody,
) -> Response<ResponseBody> {
    let mut response = Response::new(content);
    match content_type.parse::<HeaderValue>() {
        Ok(value) => {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        Err(e) => crate::logger::log_error(&format!("Invalid content type '{content_type}': {e}")),
    }
    response
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    build_response(StatusCode::NOT_FOUND, TEXT_PLAIN, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .header(ALLOW, allow)
        .body(body::full("405 Method Not Allowed"))
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::METHOD_NOT_ALLOWED, &e);
            Response::new(body::full("405 Method Not Allowed"))
        })
}

/// Build OPTIONS response listing the methods a route accepts
pub fn build_options_response(allow: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header(ALLOW, allow)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::OK, &e);
            Response::new(body::empty())
        })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, method
//! validation, size checks, dispatching and access logging.

use crate::config::AppState;
use crate::handler::rejection::Rejection;
use crate::handler::{chunked, delay, echo, multipart};
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, Route};
use bytes::Bytes;
use hyper::body::Body;
use hyper::header::{HeaderValue, CONTENT_LENGTH, SERVER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

pub const ROOT_GREETING: &str = "Hello from Flask Backend!\n";

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let access_entry = state
        .access_log()
        .then(|| start_access_entry(&parts, peer_addr));
    if state.debug() {
        log_request_headers(&parts);
    }

    let mut response = dispatch(parts, body, &state).await;
    set_server_header(&mut response, &state.config.http.server_name);

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn dispatch<B>(parts: Parts, body: B, state: &AppState) -> Response<ResponseBody>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    // 1. Resolve route
    let Some(route) = routing::match_route(parts.uri.path()) else {
        return http::build_404_response();
    };

    // 2. Check HTTP method
    if let Some(resp) = check_http_method(route, &parts.method) {
        return resp;
    }

    // 3. Check declared body size
    if let Some(resp) = check_body_size(&parts, state.max_body_size()) {
        return resp;
    }

    // 4. Dispatch
    match route {
        Route::Root => http::build_text_response(StatusCode::OK, ROOT_GREETING),
        Route::Echo => echo::handle(parts, body, state.max_body_size()).await,
        Route::Delay(seconds) => delay::handle(seconds).await,
        Route::Chunked => chunked::handle(),
        Route::Multipart => multipart::handle(parts, body, state.max_body_size()).await,
    }
}

/// Answer OPTIONS and reject methods the route does not serve
fn check_http_method(route: Route, method: &Method) -> Option<Response<ResponseBody>> {
    if *method == Method::OPTIONS {
        return Some(http::build_options_response(&route.allow_header()));
    }
    if route.allows(method) {
        return None;
    }
    logger::log_warning(&format!("Method not allowed: {method} for {route:?}"));
    Some(http::build_405_response(&route.allow_header()))
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(parts: &Parts, max_body_size: u64) -> Option<Response<ResponseBody>> {
    let content_length = parts.headers.get(CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(Rejection::PayloadTooLarge.into_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn start_access_entry(parts: &Parts, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = format!("{:?}", parts.version);
    entry.user_agent = parts
        .headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry
}

fn log_request_headers(parts: &Parts) {
    logger::log_debug(&format!(
        "{} {} with {} headers",
        parts.method,
        parts.uri,
        parts.headers.len()
    ));
    for (name, value) in &parts.headers {
        logger::log_debug(&format!("  {name}: {}", String::from_utf8_lossy(value.as_bytes())));
    }
}

fn set_server_header(response: &mut Response<ResponseBody>, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => logger::log_warning(&format!("Invalid server name '{server_name}': {e}")),
    }
}

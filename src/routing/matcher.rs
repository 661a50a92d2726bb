//! Route matching module
//!
//! Maps a request path onto one of the fixed reflector routes.

use hyper::Method;

const DELAY_PREFIX: &str = "/api/delay/";

static GET_ONLY: [Method; 1] = [Method::GET];
static POST_ONLY: [Method; 1] = [Method::POST];
static ECHO_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
];

/// A matched route, with any value captured from the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Echo,
    /// Requested delay in seconds
    Delay(i64),
    Chunked,
    Multipart,
}

impl Route {
    /// Methods the route handles, excluding the implicit HEAD and OPTIONS
    pub fn methods(self) -> &'static [Method] {
        match self {
            Self::Root | Self::Delay(_) | Self::Chunked => &GET_ONLY,
            Self::Echo => &ECHO_METHODS,
            Self::Multipart => &POST_ONLY,
        }
    }

    /// HEAD rides along with GET; OPTIONS is answered by the router
    pub fn allows(self, method: &Method) -> bool {
        let methods = self.methods();
        methods.contains(method) || (*method == Method::HEAD && methods.contains(&Method::GET))
    }

    /// Value for the `Allow` header
    pub fn allow_header(self) -> String {
        let methods = self.methods();
        let mut names: Vec<&str> = methods.iter().map(Method::as_str).collect();
        if methods.contains(&Method::GET) {
            names.push("HEAD");
        }
        names.push("OPTIONS");
        names.join(", ")
    }
}

/// Find the route for a path (query string already stripped)
pub fn match_route(path: &str) -> Option<Route> {
    match path {
        "/" => Some(Route::Root),
        "/api/echo" => Some(Route::Echo),
        "/api/chunked" => Some(Route::Chunked),
        "/api/multipart" => Some(Route::Multipart),
        _ => path
            .strip_prefix(DELAY_PREFIX)
            .and_then(parse_seconds)
            .map(Route::Delay),
    }
}

/// Parse an unsigned decimal path segment
///
/// Anything other than ASCII digits does not match. Digit strings beyond
/// `i64::MAX` saturate, so they still fail the range check instead of 404ing.
fn parse_seconds(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(segment.parse::<i64>().unwrap_or(i64::MAX))
}

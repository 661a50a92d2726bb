//! Request snapshot reflected by the echo endpoint

use crate::http::form::{self, FlatMap};
use crate::logger;
use bytes::Bytes;
use hyper::http::request::Parts;
use hyper::HeaderMap;
use serde::{Serialize, Serializer};
use std::collections::btree_map::Entry;

/// Everything the echo endpoint reports about one request
#[derive(Debug, Clone, Serialize)]
pub struct RequestSnapshot {
    pub method: String,
    /// Path without the query string
    pub path: String,
    pub args: FlatMap,
    pub headers: FlatMap,
    #[serde(serialize_with = "serialize_lossy")]
    pub body: Bytes,
    /// Urlencoded or multipart text fields, empty for any other body
    pub form: FlatMap,
}

impl RequestSnapshot {
    pub async fn capture(parts: &Parts, body: Bytes) -> Self {
        let form = decode_form(&parts.headers, &body).await;
        Self {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            args: form::parse_query(parts.uri.query()),
            headers: flatten_headers(&parts.headers),
            body,
            form,
        }
    }
}

async fn decode_form(headers: &HeaderMap, body: &Bytes) -> FlatMap {
    match form::media_type(headers).as_deref() {
        Some(form::FORM_URLENCODED) => form::parse_urlencoded(body),
        Some(form::MULTIPART_FORM_DATA) => {
            let Some(boundary) = form::multipart_boundary(headers) else {
                return FlatMap::new();
            };
            form::multipart_text_fields(body.clone(), boundary)
                .await
                .unwrap_or_else(|e| {
                    logger::log_debug(&format!("Echo: unreadable multipart body: {e}"));
                    FlatMap::new()
                })
        }
        _ => FlatMap::new(),
    }
}

/// One entry per header name; repeated headers are joined with `", "`
fn flatten_headers(headers: &HeaderMap) -> FlatMap {
    let mut flat = FlatMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        match flat.entry(canonical_header_name(name.as_str())) {
            Entry::Occupied(mut entry) => {
                let joined = entry.get_mut();
                joined.push_str(", ");
                joined.push_str(&value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value.into_owned());
            }
        }
    }
    flat
}

/// `x-request-id` -> `X-Request-Id`
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                let mut word = first.to_ascii_uppercase().to_string();
                word.push_str(chars.as_str());
                word
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn serialize_lossy<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

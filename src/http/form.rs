//! Query string and form body decoding
//!
//! Repeated keys collapse to the last value.

use bytes::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::HeaderMap;
use std::collections::BTreeMap;
use std::convert::Infallible;

pub type FlatMap = BTreeMap<String, String>;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Decode `a=1&b=two` pairs (query strings and urlencoded bodies)
pub fn parse_urlencoded(input: &[u8]) -> FlatMap {
    form_urlencoded::parse(input).into_owned().collect()
}

pub fn parse_query(query: Option<&str>) -> FlatMap {
    query.map(|q| parse_urlencoded(q.as_bytes())).unwrap_or_default()
}

/// Lowercased media type without parameters, e.g. `multipart/form-data`
pub fn media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next().unwrap_or_default().trim();
    Some(essence.to_ascii_lowercase())
}

/// Boundary of a `multipart/form-data` request, if it declares one
pub fn multipart_boundary(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    multer::parse_boundary(value).ok()
}

/// Text fields of an already-buffered multipart body; file parts are skipped
pub async fn multipart_text_fields(body: Bytes, boundary: String) -> multer::Result<FlatMap> {
    let stream = futures_util::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);
    let mut fields = FlatMap::new();

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        fields.insert(name, field.text().await?);
    }

    Ok(fields)
}

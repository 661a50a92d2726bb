//! Multipart upload endpoint
//!
//! ParseParts → ValidateFilePresence → ValidateFilename → Respond.
//! File contents are skipped as they stream past; only metadata is kept.

use super::rejection::Rejection;
use crate::http::form::{self, FlatMap};
use crate::http::{self, ResponseBody};
use crate::logger;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::http::request::Parts;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Form field that must carry the upload
pub const FILE_FIELD: &str = "file";

/// Reported when the file part has no `Content-Type` of its own
const DEFAULT_FILE_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultipartReport {
    pub message: &'static str,
    pub form_data: FlatMap,
    pub file_info: FileInfo,
}

/// What the parse pass found, before validation
#[derive(Debug, Default)]
struct Submission {
    form_data: FlatMap,
    file: Option<FileInfo>,
}

pub async fn handle<B>(parts: Parts, body: B, max_body_size: u64) -> Response<ResponseBody>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match receive(&parts, body, max_body_size).await {
        Ok(report) => http::build_json_response(StatusCode::OK, &report),
        Err(rejection) => rejection.into_response(),
    }
}

async fn receive<B>(
    parts: &Parts,
    body: B,
    max_body_size: u64,
) -> Result<MultipartReport, Rejection>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let Some(boundary) = form::multipart_boundary(&parts.headers) else {
        logger::log_debug("Multipart: request is not multipart/form-data");
        return Err(Rejection::MissingFilePart);
    };

    let submission = parse_parts(body, boundary, max_body_size).await?;
    validate(submission)
}

async fn parse_parts<B>(
    body: B,
    boundary: String,
    max_body_size: u64,
) -> Result<Submission, Rejection>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let stream = Limited::new(body, limit).into_data_stream();
    let mut multipart = multer::Multipart::new(stream, boundary);
    let mut submission = Submission::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(parse_failure(&e)),
        };

        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if let Some(filename) = field.file_name() {
            // Only the first `file` part counts; its bytes are never read
            if name == FILE_FIELD && submission.file.is_none() {
                submission.file = Some(FileInfo {
                    filename: filename.to_string(),
                    content_type: field.content_type().map_or_else(
                        || DEFAULT_FILE_CONTENT_TYPE.to_string(),
                        ToString::to_string,
                    ),
                });
            }
            continue;
        }

        match field.text().await {
            Ok(text) => {
                submission.form_data.insert(name, text);
            }
            Err(e) => return Err(parse_failure(&e)),
        }
    }

    Ok(submission)
}

fn validate(submission: Submission) -> Result<MultipartReport, Rejection> {
    let file_info = submission.file.ok_or(Rejection::MissingFilePart)?;
    if file_info.filename.is_empty() {
        return Err(Rejection::EmptyFilename);
    }

    Ok(MultipartReport {
        message: "Multipart data received successfully.",
        form_data: submission.form_data,
        file_info,
    })
}

/// An unreadable body counts as having no file part, unless it was too large
fn parse_failure(error: &multer::Error) -> Rejection {
    if let multer::Error::StreamReadFailed(source) = error {
        if source.is::<LengthLimitError>() {
            logger::log_warning("Multipart body exceeded the configured size limit");
            return Rejection::PayloadTooLarge;
        }
    }
    logger::log_debug(&format!("Multipart: failed to parse body: {error}"));
    Rejection::MissingFilePart
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::Request;

    const BOUNDARY: &str = "reflector-boundary";

    fn part(name: &str, filename: Option<&str>, content_type: Option<&str>, value: &str) -> String {
        let mut out = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"");
        if let Some(filename) = filename {
            out.push_str(&format!("; filename=\"{filename}\""));
        }
        out.push_str("\r\n");
        if let Some(content_type) = content_type {
            out.push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        out.push_str(&format!("\r\n{value}\r\n"));
        out
    }

    fn multipart_request(parts: &[String]) -> Request<Full<Bytes>> {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        Request::builder()
            .method("POST")
            .uri("/api/multipart")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }

    async fn run(request: Request<Full<Bytes>>, limit: u64) -> (StatusCode, String) {
        let (parts, body) = request.into_parts();
        let response = handle(parts, body, limit).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_accepts_file_and_fields() {
        let request = multipart_request(&[
            part("note", None, None, "hi"),
            part("file", Some("a.txt"), Some("text/plain"), "file contents"),
        ]);
        let (status, body) = run(request, 1 << 20).await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["message"], "Multipart data received successfully.");
        assert_eq!(value["file_info"]["filename"], "a.txt");
        assert_eq!(value["file_info"]["content_type"], "text/plain");
        assert_eq!(value["form_data"]["note"], "hi");
        assert!(!body.contains("file contents"));
    }

    #[tokio::test]
    async fn test_missing_file_part() {
        let request = multipart_request(&[part("note", None, None, "hi")]);
        assert_eq!(
            run(request, 1 << 20).await,
            (StatusCode::BAD_REQUEST, "No file part in the request\n".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_field_without_filename_is_a_form_field() {
        let request = multipart_request(&[part("file", None, None, "just text")]);
        let (status, body) = run(request, 1 << 20).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No file part in the request\n");
    }

    #[tokio::test]
    async fn test_empty_filename() {
        let request = multipart_request(&[
            part("note", None, None, "hi"),
            part("file", Some(""), Some("application/octet-stream"), ""),
        ]);
        assert_eq!(
            run(request, 1 << 20).await,
            (StatusCode::BAD_REQUEST, "No selected file\n".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_multipart_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/multipart")
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from_static(b"{}")))
            .unwrap();
        let (status, body) = run(request, 1 << 20).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No file part in the request\n");
    }

    #[tokio::test]
    async fn test_missing_content_type_defaults() {
        let request = multipart_request(&[part("file", Some("blob.bin"), None, "\x01\x02")]);
        let (status, body) = run(request, 1 << 20).await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["file_info"]["content_type"], DEFAULT_FILE_CONTENT_TYPE);
        assert_eq!(value["form_data"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_oversized_upload_is_413() {
        let big = "x".repeat(4096);
        let request = multipart_request(&[part("file", Some("big.txt"), Some("text/plain"), &big)]);
        let (status, _) = run(request, 512).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_validate_order() {
        let missing = Submission::default();
        assert_eq!(validate(missing).unwrap_err(), Rejection::MissingFilePart);

        let empty = Submission {
            form_data: FlatMap::new(),
            file: Some(FileInfo {
                filename: String::new(),
                content_type: "text/plain".to_string(),
            }),
        };
        assert_eq!(validate(empty).unwrap_err(), Rejection::EmptyFilename);
    }
}

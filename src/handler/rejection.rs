//! Client-input rejections
//!
//! The `Display` text of each variant is the exact response body.

use crate::http::{self, response::TEXT_PLAIN, ResponseBody};
use hyper::{Response, StatusCode};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Delay seconds must be non-negative.\n")]
    DelayNegative,
    #[error("Delay cannot exceed 60 seconds.\n")]
    DelayTooLong,
    #[error("No file part in the request\n")]
    MissingFilePart,
    #[error("No selected file\n")]
    EmptyFilename,
    #[error("413 Payload Too Large")]
    PayloadTooLarge,
}

impl Rejection {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn into_response(self) -> Response<ResponseBody> {
        match self {
            Self::PayloadTooLarge => {
                http::build_response(self.status(), TEXT_PLAIN, self.to_string())
            }
            _ => http::build_text_response(self.status(), self.to_string()),
        }
    }
}

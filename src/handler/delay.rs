//! Delayed responses
//!
//! Validate → Suspend → Respond. Out-of-range values are rejected before
//! any waiting happens.

use super::rejection::Rejection;
use crate::http::{self, ResponseBody};
use crate::logger;
use hyper::{Response, StatusCode};
use std::time::Duration;

pub const MAX_DELAY_SECONDS: i64 = 60;

pub fn validate_delay(seconds: i64) -> Result<Duration, Rejection> {
    if seconds < 0 {
        return Err(Rejection::DelayNegative);
    }
    if seconds > MAX_DELAY_SECONDS {
        return Err(Rejection::DelayTooLong);
    }
    Ok(Duration::from_secs(seconds.unsigned_abs()))
}

pub async fn handle(seconds: i64) -> Response<ResponseBody> {
    let delay = match validate_delay(seconds) {
        Ok(delay) => delay,
        Err(rejection) => return rejection.into_response(),
    };

    logger::log_info(&format!("Delaying response by {seconds} seconds..."));
    tokio::time::sleep(delay).await;
    logger::log_info("Delay finished.");

    http::build_text_response(
        StatusCode::OK,
        format!("Response delayed by {seconds} seconds.\n"),
    )
}

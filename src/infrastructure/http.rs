//! Shared HTTP client construction and retry policy for vendor calls.

use anyhow::Context;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use std::time::Duration;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

use crate::error::{AppError, map_reqwest_error};

/// Retries after the initial attempt.
const RETRY_ATTEMPTS: usize = 3;

/// Builds the shared vendor HTTP client.
pub fn build_client(timeout_seconds: u64) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Backoff schedule for retried vendor calls: ~500ms, 1s, 2s with jitter.
fn backoff() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(250)
        .map(jitter)
        .take(RETRY_ATTEMPTS)
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Sends a request, retrying transport failures, 429s, and 5xx responses
/// with exponential backoff.
///
/// The final response is returned as-is; callers still check the status.
///
/// # Errors
///
/// Returns [`AppError::Vendor`] when the request cannot be cloned for retry
/// or all attempts fail at the transport level.
pub async fn send_with_retry(
    vendor: &'static str,
    request: RequestBuilder,
) -> Result<Response, AppError> {
    let mut delays = backoff();

    loop {
        let attempt = request.try_clone().ok_or_else(|| {
            AppError::internal(
                "Request body is not retryable",
                json!({ "vendor": vendor }),
            )
        })?;

        let retry_in = match attempt.send().await {
            Ok(response) if is_retryable_status(response.status()) => {
                match delays.next() {
                    Some(delay) => {
                        warn!(
                            vendor,
                            status = response.status().as_u16(),
                            delay_ms = delay.as_millis() as u64,
                            "Retrying vendor request"
                        );
                        delay
                    }
                    None => return Ok(response),
                }
            }
            Ok(response) => return Ok(response),
            Err(e) if e.is_timeout() || e.is_connect() => match delays.next() {
                Some(delay) => {
                    warn!(
                        vendor,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying vendor request"
                    );
                    delay
                }
                None => return Err(map_reqwest_error(vendor, e)),
            },
            Err(e) => return Err(map_reqwest_error(vendor, e)),
        };

        tokio::time::sleep(retry_in).await;
    }
}

/// Converts a non-success response into [`AppError`], reading the body for
/// diagnostics. 401/403 map to [`AppError::Unauthorized`].
///
/// # Errors
///
/// Returns the mapped error for any non-2xx status.
pub async fn expect_success(
    vendor: &'static str,
    response: Response,
) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let details = json!({
        "vendor": vendor,
        "status": status.as_u16(),
        "body": body.chars().take(512).collect::<String>(),
    });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AppError::unauthorized(
            format!("{} rejected the request", vendor),
            details,
        ));
    }

    Err(AppError::vendor(
        format!("{} returned {}", vendor, status.as_u16()),
        details,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_schedule_length() {
        assert_eq!(backoff().count(), RETRY_ATTEMPTS);
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));

        assert!(!is_retryable_status(StatusCode::OK));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
    }
}

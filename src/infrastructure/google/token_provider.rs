//! OAuth access-token refresh for the Google APIs.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{AppError, map_reqwest_error};
use crate::infrastructure::http::{expect_success, send_with_retry};

const VENDOR: &str = "Google OAuth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Exchanges the long-lived refresh token for short-lived access tokens and
/// caches them until shortly before expiry. Shared by the Blogger and Gmail
/// clients.
pub struct GoogleTokenProvider {
    http: Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    cached: Mutex<Option<CachedToken>>,
}

impl GoogleTokenProvider {
    pub fn new(
        http: Client,
        client_id: String,
        client_secret: String,
        refresh_token: String,
    ) -> Self {
        Self {
            http,
            client_id,
            client_secret,
            refresh_token,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid access token, refreshing if the cached one is absent
    /// or about to expire.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the refresh token is rejected,
    /// [`AppError::Vendor`] on transport failure.
    pub async fn access_token(&self) -> Result<String, AppError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.access_token.clone());
        }

        let refreshed = self.refresh().await?;
        let access_token = refreshed.access_token.clone();
        *cached = Some(refreshed);

        Ok(access_token)
    }

    async fn refresh(&self) -> Result<CachedToken, AppError> {
        debug!("Refreshing Google access token");

        let request = self.http.post(TOKEN_URL).form(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ]);
        let response = send_with_retry(VENDOR, request).await?;

        // invalid_grant comes back as 400; treat any 4xx here as a
        // credentials problem rather than a vendor outage
        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::unauthorized(
                "Google refused the refresh token",
                serde_json::json!({
                    "status": status.as_u16(),
                    "body": body.chars().take(512).collect::<String>(),
                }),
            ));
        }
        let response = expect_success(VENDOR, response).await?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| map_reqwest_error(VENDOR, e))?;

        let lifetime = Duration::from_secs(token.expires_in)
            .saturating_sub(EXPIRY_MARGIN);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

//! Gmail API client implementing [`Mailer`].

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::domain::ports::Mailer;
use crate::error::AppError;
use crate::infrastructure::google::GoogleTokenProvider;
use crate::infrastructure::http::{expect_success, send_with_retry};

const VENDOR: &str = "Gmail";
const SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

pub struct GmailClient {
    http: Client,
    tokens: Arc<GoogleTokenProvider>,
}

impl GmailClient {
    pub fn new(http: Client, tokens: Arc<GoogleTokenProvider>) -> Self {
        Self { http, tokens }
    }
}

#[async_trait]
impl Mailer for GmailClient {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), AppError> {
        let access_token = self.tokens.access_token().await?;
        let raw = build_raw_message(to, subject, html);

        let request = self
            .http
            .post(SEND_URL)
            .bearer_auth(access_token)
            .json(&json!({ "raw": raw }));
        let response = send_with_retry(VENDOR, request).await?;
        expect_success(VENDOR, response).await?;

        info!(to, "Email sent");
        Ok(())
    }
}

/// Assembles the MIME message and encodes it the way the API expects
/// (base64url, no padding). The subject is RFC 2047 encoded so titles with
/// non-ASCII punctuation survive.
fn build_raw_message(to: &str, subject: &str, html: &str) -> String {
    let message = format!(
        "To: {}\r\n\
         Subject: {}\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: text/html; charset=\"utf-8\"\r\n\
         \r\n\
         {}",
        to,
        encode_subject(subject),
        html
    );

    URL_SAFE_NO_PAD.encode(message)
}

fn encode_subject(subject: &str) -> String {
    if subject.is_ascii() {
        return subject.to_string();
    }
    format!("=?utf-8?B?{}?=", STANDARD.encode(subject))
}

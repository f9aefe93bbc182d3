//! Blogger API v3 client implementing [`BlogPublisher`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domain::ports::BlogPublisher;
use crate::error::{AppError, map_reqwest_error};
use crate::infrastructure::google::GoogleTokenProvider;
use crate::infrastructure::http::{expect_success, send_with_retry};

const VENDOR: &str = "Blogger";
const API_BASE: &str = "https://www.googleapis.com/blogger/v3";

pub struct BloggerClient {
    http: Client,
    tokens: Arc<GoogleTokenProvider>,
    blog_id: String,
}

impl BloggerClient {
    pub fn new(http: Client, tokens: Arc<GoogleTokenProvider>, blog_id: String) -> Self {
        Self {
            http,
            tokens,
            blog_id,
        }
    }
}

#[async_trait]
impl BlogPublisher for BloggerClient {
    async fn publish(&self, title: &str, html: &str) -> Result<String, AppError> {
        let access_token = self.tokens.access_token().await?;

        let request = self
            .http
            .post(format!("{}/blogs/{}/posts", API_BASE, self.blog_id))
            .query(&[("isDraft", "false")])
            .bearer_auth(access_token)
            .json(&json!({
                "kind": "blogger#post",
                "title": title,
                "content": html,
            }));
        let response = send_with_retry(VENDOR, request).await?;
        let response = expect_success(VENDOR, response).await?;

        let post: PostResponse = response
            .json()
            .await
            .map_err(|e| map_reqwest_error(VENDOR, e))?;

        info!(post_id = %post.id, url = %post.url.as_deref().unwrap_or("-"), "Blogger post created");
        Ok(post.id)
    }
}

#[derive(Deserialize)]
struct PostResponse {
    id: String,
    url: Option<String>,
}

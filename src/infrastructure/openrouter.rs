//! OpenRouter chat-completion client implementing [`ContentWriter`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::ContentWriter;
use crate::error::{AppError, map_reqwest_error};
use crate::infrastructure::http::{expect_success, send_with_retry};

const VENDOR: &str = "OpenRouter";
const COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 4000;

pub struct OpenRouterClient {
    http: Client,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(http: Client, api_key: String, model: String) -> Self {
        Self {
            http,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ContentWriter for OpenRouterClient {
    async fn write_post(&self, prompt: &str) -> Result<String, AppError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let request = self
            .http
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body);
        let response = send_with_retry(VENDOR, request).await?;
        let response = expect_success(VENDOR, response).await?;

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| map_reqwest_error(VENDOR, e))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(AppError::vendor(
                "OpenRouter returned an empty completion",
                json!({ "model": self.model }),
            ));
        }

        debug!(model = %self.model, chars = content.len(), "Completion received");
        Ok(content)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

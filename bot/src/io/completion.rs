//! Completion abstraction for prompt execution.
//!
//! The [`Completion`] trait decouples the cycle from the actual model backend
//! (an OpenAI-compatible chat-completions endpoint). Tests use scripted
//! completions that return predetermined text without touching the network.

use std::env;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::ApiError;
use crate::io::config::BotConfig;

pub const SYSTEM_INSTRUCTION: &str = "You are an advanced programming assistant.";
pub const TEMPERATURE: f32 = 0.3;
pub const MAX_TOKENS: u32 = 1500;

/// Abstraction over completion backends.
pub trait Completion {
    /// Send `prompt` and return the text of the first choice.
    fn complete(&self, prompt: &str) -> Result<String, ApiError>;
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Build the request body for a single prompt.
pub fn build_request<'a>(model: &'a str, prompt: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_INSTRUCTION,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Extract the first choice's text from a successful response body.
pub fn parse_response(body: &str) -> Result<String, ApiError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|err| ApiError::Malformed(err.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Malformed("response contained no choices".to_string()))?;
    choice
        .message
        .content
        .ok_or_else(|| ApiError::Malformed("first choice has no content".to_string()))
}

/// Map a non-success HTTP status and body to an [`ApiError`].
pub fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

/// Completion backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionClient {
    http: Client,
    url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl ChatCompletionClient {
    /// Build a client from config, reading the credential from the environment.
    ///
    /// A missing credential is not an error here; it surfaces from
    /// [`Completion::complete`] as [`ApiError::MissingCredential`].
    pub fn from_config(config: &BotConfig) -> Result<Self, ApiError> {
        let api_key = env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::new(config, api_key)
    }

    pub fn new(config: &BotConfig, api_key: Option<String>) -> Result<Self, ApiError> {
        let http = build_http_client(config.request_timeout())?;
        Ok(Self {
            http,
            url: format!(
                "{}/chat/completions",
                config.api_base_url.trim_end_matches('/')
            ),
            model: config.model_identifier.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
        })
    }

    #[cfg(test)]
    fn url(&self) -> &str {
        &self.url
    }
}

fn build_http_client(timeout: Duration) -> Result<Client, ApiError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

impl Completion for ChatCompletionClient {
    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::MissingCredential {
                var: self.api_key_env.clone(),
            })?;

        info!(url = %self.url, "sending completion request");
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&build_request(&self.model, prompt))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "completion request rejected");
            return Err(status_error(status, &body));
        }

        let text = parse_response(&body)?;
        debug!(response_len = text.len(), "completion received");
        Ok(text)
    }
}

//! OpenRouter (OpenAI-compatible) chat completion client
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Typed error taxonomy
//! - 1.1.0: Try each configured model in order
//! - 1.0.0: Single-model client

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::core::Config;

const REFERER: &str = "https://t.me/writers_bot";
const TITLE: &str = "Russian Writers Bot";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: &str, content: &str) -> Self {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    pub fn system(content: &str) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: &str) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: &str) -> Self {
        Self::new("assistant", content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    /// Conversation after the system prompt, oldest first
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    Other(String),
}

impl FinishReason {
    pub fn from_api(raw: Option<&str>) -> Self {
        match raw {
            Some("stop") | Some("end_turn") | Some("eos") => FinishReason::Stop,
            Some("length") | Some("max_tokens") => FinishReason::Length,
            Some(other) => FinishReason::Other(other.to_string()),
            None => FinishReason::Other("unknown".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub finish_reason: FinishReason,
    pub model: String,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("no models configured")]
    NoModels,
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("empty completion")]
    Empty,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: Option<ApiMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

/// Parse a `/chat/completions` body
pub fn parse_completion(body: &str, model: &str) -> Result<Completion, CompletionError> {
    let parsed: ApiResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Malformed(e.to_string()))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::Malformed("no choices".to_string()))?;
    let content = choice
        .message
        .and_then(|m| m.content)
        .map(|c| c.trim().to_string())
        .unwrap_or_default();
    if content.is_empty() {
        return Err(CompletionError::Empty);
    }
    Ok(Completion {
        content,
        finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
        model: model.to_string(),
    })
}

pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    models: Vec<String>,
    timeout: Duration,
}

impl OpenRouterClient {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        models: Vec<String>,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("⚠️ Falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });
        OpenRouterClient {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            models,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.openrouter_api_key.clone(),
            &config.openrouter_base_url,
            config.models.clone(),
            Duration::from_secs(config.completion_timeout_secs),
        )
    }

    async fn complete_with_model(
        &self,
        api_key: &str,
        model: &str,
        request: &CompletionRequest,
    ) -> Result<Completion, CompletionError> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage::system(&request.system));
        messages.extend(request.messages.iter().cloned());

        let body = json!({
            "model": model,
            "messages": messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let send = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&body)
            .send();

        let response = match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => {
                return Err(CompletionError::Timeout(self.timeout.as_secs()))
            }
            Ok(Err(e)) => return Err(CompletionError::Transport(e.to_string())),
            Err(_) => return Err(CompletionError::Timeout(self.timeout.as_secs())),
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;
        if !status.is_success() {
            let body: String = text.chars().take(200).collect();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_completion(&text, model)
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let mut last_error = CompletionError::NoModels;
        for model in &self.models {
            let start = Instant::now();
            debug!("Requesting completion from {model}");
            match self.complete_with_model(api_key, model, request).await {
                Ok(completion) => {
                    info!(
                        "🤖 {model} answered in {}ms ({} chars)",
                        start.elapsed().as_millis(),
                        completion.content.chars().count()
                    );
                    return Ok(completion);
                }
                Err(e) => {
                    warn!("⚠️ Model {model} failed: {e}");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "Ты Толстой.".to_string(),
            messages: vec![ChatMessage::user("Что такое реализм?")],
            temperature: 0.8,
            max_tokens: 100,
        }
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Правда жизни. "},"finish_reason":"stop"}]}"#;
        let completion = parse_completion(body, "m").unwrap();
        assert_eq!(completion.content, "Правда жизни.");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
        assert_eq!(completion.model, "m");
    }

    #[test]
    fn test_parse_length_finish() {
        let body = r#"{"choices":[{"message":{"content":"Реализм это"},"finish_reason":"length"}]}"#;
        assert_eq!(
            parse_completion(body, "m").unwrap().finish_reason,
            FinishReason::Length
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_completion("<html>", "m"),
            Err(CompletionError::Malformed(_))
        ));
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#, "m"),
            Err(CompletionError::Malformed(_))
        ));
        assert!(matches!(
            parse_completion(r#"{"choices":[{"message":{"content":"  "}}]}"#, "m"),
            Err(CompletionError::Empty)
        ));
        assert!(matches!(
            parse_completion(r#"{"choices":[{"message":null}]}"#, "m"),
            Err(CompletionError::Empty)
        ));
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from_api(Some("stop")), FinishReason::Stop);
        assert_eq!(FinishReason::from_api(Some("max_tokens")), FinishReason::Length);
        assert_eq!(
            FinishReason::from_api(Some("content_filter")),
            FinishReason::Other("content_filter".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = OpenRouterClient::new(
            None,
            "http://127.0.0.1:9",
            vec!["a/model".to_string()],
            Duration::from_secs(1),
        );
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_no_models() {
        let client = OpenRouterClient::new(
            Some("key".to_string()),
            "http://127.0.0.1:9",
            Vec::new(),
            Duration::from_secs(1),
        );
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::NoModels));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_tries_every_model() {
        let client = OpenRouterClient::new(
            Some("key".to_string()),
            "http://127.0.0.1:9/",
            vec!["a/one".to_string(), "b/two".to_string()],
            Duration::from_secs(2),
        );
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Transport(_) | CompletionError::Timeout(_)
        ));
    }
}

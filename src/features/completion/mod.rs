//! # Feature: Completion
//!
//! Remote LLM access behind the [`CompletionClient`] trait, plus the pure
//! heuristics that detect and repair cut-off answers.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Truncation detection and continuation merge
//! - 1.0.0: OpenRouter client with ordered model fallback

pub mod client;
pub mod truncation;

pub use client::{
    ChatMessage, Completion, CompletionClient, CompletionError, CompletionRequest, FinishReason,
    OpenRouterClient,
};
pub use truncation::{continuation_request, is_incomplete, merge_continuation};

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned results in order and records every request
    #[derive(Default)]
    pub struct ScriptedClient {
        responses: Mutex<VecDeque<Result<Completion, CompletionError>>>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        pub fn new(responses: Vec<Result<Completion, CompletionError>>) -> Self {
            ScriptedClient {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn answering(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(stop(t))).collect())
        }

        pub fn failing() -> Self {
            Self::new(Vec::new())
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    pub fn stop(text: &str) -> Completion {
        Completion {
            content: text.to_string(),
            finish_reason: FinishReason::Stop,
            model: "test/model".to_string(),
        }
    }

    pub fn cut(text: &str) -> Completion {
        Completion {
            finish_reason: FinishReason::Length,
            ..stop(text)
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<Completion, CompletionError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CompletionError::Transport("script exhausted".into())))
        }
    }
}

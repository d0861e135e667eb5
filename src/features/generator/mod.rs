//! # Feature: Response Generator
//!
//! Turns a user message into a reply: cache, optional enrichment, persona prompt,
//! completion with one continuation for cut-off answers, web synthesis when the
//! model admits not knowing, then formatting. Any API failure goes through the
//! [`FallbackChain`], so a reply is always produced.
//!
//! - **Version**: 1.4.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.4.0: Cache only answers to questions asked without prior history
//! - 1.3.0: Web synthesis for "unknown" answers
//! - 1.2.0: Response cache and feedback-driven formatting
//! - 1.1.0: Continuation for truncated answers
//! - 1.0.0: Persona prompt with ordered fallbacks

pub mod fallback;

pub use fallback::{FallbackChain, FallbackContext, FallbackStrategy, APOLOGY};

use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;

use crate::core::Config;
use crate::features::cache::ResponseCache;
use crate::features::completion::{
    continuation_request, is_incomplete, merge_continuation, ChatMessage, CompletionClient,
    CompletionRequest,
};
use crate::features::enrichment::{should_search_internet, signals_unknown, synthesize_answer, Enricher};
use crate::features::feedback::FeedbackRecorder;
use crate::features::personas::{Persona, PersonaManager, PromptBuilder};
use crate::features::questions::QuestionTopic;
use crate::features::sessions::{Role, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSource {
    Api,
    /// API answer merged with one continuation
    Continued,
    Cache,
    WebSynthesis,
    Fallback(&'static str),
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSource::Api => write!(f, "api"),
            ResponseSource::Continued => write!(f, "api+continuation"),
            ResponseSource::Cache => write!(f, "cache"),
            ResponseSource::WebSynthesis => write!(f, "web"),
            ResponseSource::Fallback(name) => write!(f, "fallback:{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReply {
    pub text: String,
    pub source: ResponseSource,
}

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub max_memory: usize,
    pub history_window: usize,
    pub max_tokens: u32,
    pub temperature: f32,
    pub optimize_responses: bool,
}

impl GeneratorSettings {
    pub fn from_config(config: &Config) -> Self {
        GeneratorSettings {
            max_memory: config.max_memory,
            history_window: config.history_window,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            optimize_responses: config.optimize_responses,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            max_memory: 30,
            history_window: 12,
            max_tokens: 1500,
            temperature: 0.8,
            optimize_responses: true,
        }
    }
}

pub struct ResponseGenerator {
    client: Arc<dyn CompletionClient>,
    personas: Arc<PersonaManager>,
    enricher: Option<Enricher>,
    cache: ResponseCache,
    feedback: Arc<FeedbackRecorder>,
    fallback: FallbackChain,
    settings: GeneratorSettings,
}

impl ResponseGenerator {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        personas: Arc<PersonaManager>,
        feedback: Arc<FeedbackRecorder>,
        cache: ResponseCache,
        settings: GeneratorSettings,
    ) -> Self {
        ResponseGenerator {
            client,
            personas,
            enricher: None,
            cache,
            feedback,
            fallback: FallbackChain::default(),
            settings,
        }
    }

    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackChain) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Answer `message` and record the exchange in the session history.
    ///
    /// Never fails: API problems fall back to local answers.
    pub async fn generate_response(
        &self,
        session: &mut Session,
        persona: Option<&Persona>,
        message: &str,
    ) -> GeneratedReply {
        let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();
        let persona_key = persona.map(|p| p.key.as_str());
        info!(
            "[{request_id}] 💬 user {} asks {} ({} chars)",
            session.user_id,
            persona_key.unwrap_or("expert"),
            message.chars().count()
        );

        // Only questions asked with an empty history are served from or stored in the cache
        let cacheable = session.history.is_empty();
        let cached = if cacheable {
            self.cache.get(persona_key, message)
        } else {
            None
        };
        let reply = match cached {
            Some(text) => GeneratedReply {
                text,
                source: ResponseSource::Cache,
            },
            None => {
                self.generate_fresh(&request_id, session, persona, message, cacheable)
                    .await
            }
        };

        session.record_exchange(message, &reply.text, self.settings.max_memory);
        info!(
            "[{request_id}] ✅ replied via {} ({} chars, history {})",
            reply.source,
            reply.text.chars().count(),
            session.history.len()
        );
        reply
    }

    async fn generate_fresh(
        &self,
        request_id: &str,
        session: &Session,
        persona: Option<&Persona>,
        message: &str,
        cacheable: bool,
    ) -> GeneratedReply {
        let persona_key = persona.map(|p| p.key.as_str());
        let wants_lookup = self.enricher.is_some() && should_search_internet(message);

        let mut user_content = message.to_string();
        if let (true, Some(enricher)) = (wants_lookup, &self.enricher) {
            let subject = self.personas.find_mentioned(message);
            if let Some(context) = enricher.context_for(message, subject).await {
                debug!("[{request_id}] Enrichment added {} chars", context.chars().count());
                user_content.push_str("\n\nСправочные сведения (используй, если уместно):\n");
                user_content.push_str(&context);
            }
        }

        let request = self.build_request(session, persona, message, &user_content);
        let completion = match self.client.complete(&request).await {
            Ok(completion) => completion,
            Err(e) => {
                warn!("[{request_id}] ⚠️ Completion failed: {e}");
                return self.fall_back(persona, message);
            }
        };

        let mut text = completion.content;
        let mut source = ResponseSource::Api;

        if is_incomplete(&text, &completion.finish_reason) {
            debug!("[{request_id}] Answer from {} looks cut off, continuing", completion.model);
            match self.client.complete(&continuation_request(&request, &text)).await {
                Ok(continuation) => {
                    text = merge_continuation(&text, &continuation.content);
                    source = ResponseSource::Continued;
                }
                Err(e) => warn!("[{request_id}] ⚠️ Continuation failed, keeping partial answer: {e}"),
            }
        }

        if let (true, Some(enricher)) = (wants_lookup && signals_unknown(&text), &self.enricher) {
            let snippets = enricher.web_snippets(message).await;
            if let Some(synthesized) = synthesize_answer(message, &snippets, persona) {
                info!("[{request_id}] 🔎 Model did not know, answering from web snippets");
                text = synthesized;
                source = ResponseSource::WebSynthesis;
            }
        }

        if self.settings.optimize_responses && source != ResponseSource::WebSynthesis {
            text = self.feedback.optimize_response(&text, message);
        }

        if text.trim().is_empty() {
            warn!("[{request_id}] ⚠️ Empty answer after post-processing");
            return self.fall_back(persona, message);
        }

        if cacheable {
            self.cache.insert(persona_key, message, &text);
        }
        GeneratedReply { text, source }
    }

    fn build_request(
        &self,
        session: &Session,
        persona: Option<&Persona>,
        message: &str,
        user_content: &str,
    ) -> CompletionRequest {
        let system = PromptBuilder::new(persona)
            .with_topic(QuestionTopic::detect(message))
            .with_format_hint(Some(self.feedback.predict_format(message)))
            .build();

        let mut messages: Vec<ChatMessage> = session
            .recent(self.settings.history_window)
            .iter()
            .map(|turn| match turn.role {
                Role::User => ChatMessage::user(&turn.text),
                Role::Assistant => ChatMessage::assistant(&turn.text),
            })
            .collect();
        messages.push(ChatMessage::user(user_content));

        CompletionRequest {
            system,
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    fn fall_back(&self, persona: Option<&Persona>, message: &str) -> GeneratedReply {
        let ctx = FallbackContext {
            persona,
            question: message,
            personas: &self.personas,
        };
        let (text, name) = self.fallback.respond(&ctx);
        GeneratedReply {
            text,
            source: ResponseSource::Fallback(name),
        }
    }
}

//! # Feature: Enrichment
//!
//! Optional outside knowledge for answers: Wikipedia summaries and a web search
//! over the DuckDuckGo HTML endpoint. Lookups are best-effort; any failure or
//! timeout simply means no enrichment.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.2.0: Persona-framed answers synthesized from web snippets
//! - 1.1.0: Web search fallback when Wikipedia has no article
//! - 1.0.0: Wikipedia summaries injected into the prompt

pub mod detect;
pub mod web_search;
pub mod wikipedia;

pub use detect::{should_search_internet, signals_unknown, subject_title};
pub use web_search::WebSearcher;
pub use wikipedia::WikipediaClient;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{truncate_chars, Config};
use crate::features::personas::Persona;

/// Snippets quoted in a synthesized answer
pub const SYNTHESIS_SNIPPETS: usize = 2;
pub const SYNTHESIS_SNIPPET_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub title: String,
    pub text: String,
    /// Human-readable origin ("Википедия", a URL)
    pub source: String,
}

#[async_trait]
pub trait LookupSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn lookup(&self, query: &str) -> Result<Vec<Snippet>>;
}

pub struct Enricher {
    wikipedia: Arc<dyn LookupSource>,
    web: Arc<dyn LookupSource>,
    timeout: Duration,
}

impl Enricher {
    pub fn new(wikipedia: Arc<dyn LookupSource>, web: Arc<dyn LookupSource>, timeout: Duration) -> Self {
        Enricher {
            wikipedia,
            web,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.lookup_timeout_secs);
        Self::new(
            Arc::new(WikipediaClient::new(&config.wikipedia_lang, timeout)),
            Arc::new(WebSearcher::new(timeout)),
            timeout,
        )
    }

    async fn guarded_lookup(&self, source: &dyn LookupSource, query: &str) -> Vec<Snippet> {
        match tokio::time::timeout(self.timeout, source.lookup(query)).await {
            Ok(Ok(snippets)) => {
                debug!("{} returned {} snippet(s) for '{query}'", source.name(), snippets.len());
                snippets
            }
            Ok(Err(e)) => {
                warn!("⚠️ {} lookup failed for '{query}': {e:#}", source.name());
                Vec::new()
            }
            Err(_) => {
                warn!("⚠️ {} lookup timed out for '{query}'", source.name());
                Vec::new()
            }
        }
    }

    /// Reference text for the prompt: a Wikipedia summary of the subject, else web snippets
    pub async fn context_for(&self, question: &str, subject: Option<&Persona>) -> Option<String> {
        let title = match subject {
            Some(persona) => persona.display_name.clone(),
            None => subject_title(question),
        };

        let mut snippets = Vec::new();
        if !title.is_empty() {
            snippets = self.guarded_lookup(self.wikipedia.as_ref(), &title).await;
        }
        if snippets.is_empty() {
            snippets = self.web_snippets(question).await;
        }
        if snippets.is_empty() {
            return None;
        }

        let context = snippets
            .iter()
            .map(|s| format!("[{}] {}: {}", s.source, s.title, s.text))
            .collect::<Vec<_>>()
            .join("\n");
        Some(context)
    }

    pub async fn web_snippets(&self, query: &str) -> Vec<Snippet> {
        self.guarded_lookup(self.web.as_ref(), query).await
    }
}

/// Persona-framed answer built from web snippets; `None` when there is nothing to quote
pub fn synthesize_answer(query: &str, snippets: &[Snippet], persona: Option<&Persona>) -> Option<String> {
    let quoted: Vec<String> = snippets
        .iter()
        .filter(|s| !s.text.trim().is_empty())
        .take(SYNTHESIS_SNIPPETS)
        .map(|s| format!("• {}", truncate_chars(s.text.trim(), SYNTHESIS_SNIPPET_CHARS)))
        .collect();
    if quoted.is_empty() {
        return None;
    }

    let intro = match persona {
        Some(persona) => persona.search_intro.replace("{query}", query.trim()),
        None => format!("По вопросу «{}» современные источники сообщают следующее:", query.trim()),
    };
    Some(format!(
        "{intro}\n\n{}\n\n(Сведения взяты из открытых источников в интернете.)",
        quoted.join("\n")
    ))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Lookup source returning fixed snippets (or an error) and counting calls
    pub struct StaticSource {
        pub snippets: Vec<Snippet>,
        pub fail: bool,
        pub delay: Option<Duration>,
        pub calls: AtomicUsize,
    }

    impl StaticSource {
        pub fn with(texts: &[&str]) -> Self {
            StaticSource {
                snippets: texts
                    .iter()
                    .map(|t| Snippet {
                        title: "Тест".to_string(),
                        text: t.to_string(),
                        source: "test".to_string(),
                    })
                    .collect(),
                fail: false,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn empty() -> Self {
            Self::with(&[])
        }

        pub fn failing() -> Self {
            StaticSource {
                fail: true,
                ..Self::empty()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LookupSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn lookup(&self, _query: &str) -> Result<Vec<Snippet>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                anyhow::bail!("lookup failed");
            }
            Ok(self.snippets.clone())
        }
    }
}

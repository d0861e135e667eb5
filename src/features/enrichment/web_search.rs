//! Web search over the DuckDuckGo HTML endpoint
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Snippet extraction with scraper

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use super::{LookupSource, Snippet};
use crate::core::truncate_chars;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
pub const MAX_SNIPPETS: usize = 3;
pub const SNIPPET_CHARS: usize = 300;

pub struct WebSearcher {
    http: reqwest::Client,
}

impl WebSearcher {
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; writers-bot/1.0)")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        WebSearcher { http }
    }
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result snippets from a DuckDuckGo HTML page
pub fn parse_snippets(html: &str) -> Result<Vec<Snippet>> {
    let document = Html::parse_document(html);
    let result = Selector::parse(".result").map_err(|e| anyhow!("bad selector: {e}"))?;
    let title = Selector::parse(".result__a").map_err(|e| anyhow!("bad selector: {e}"))?;
    let snippet = Selector::parse(".result__snippet").map_err(|e| anyhow!("bad selector: {e}"))?;

    let snippets = document
        .select(&result)
        .filter_map(|block| {
            let text = block.select(&snippet).next().map(|s| element_text(&s))?;
            if text.is_empty() {
                return None;
            }
            let heading = block.select(&title).next();
            Some(Snippet {
                title: heading.map(|h| element_text(&h)).unwrap_or_default(),
                text: truncate_chars(&text, SNIPPET_CHARS),
                source: heading
                    .and_then(|h| h.value().attr("href"))
                    .unwrap_or("web")
                    .to_string(),
            })
        })
        .take(MAX_SNIPPETS)
        .collect();
    Ok(snippets)
}

#[async_trait]
impl LookupSource for WebSearcher {
    fn name(&self) -> &'static str {
        "web search"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<Snippet>> {
        let html = self
            .http
            .get(SEARCH_URL)
            .query(&[("q", query), ("kl", "ru-ru")])
            .send()
            .await
            .context("search request")?
            .error_for_status()?
            .text()
            .await
            .context("search response")?;
        parse_snippets(&html)
    }
}

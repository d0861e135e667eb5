//! Wikipedia summary lookup
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Intro extracts via the MediaWiki query API

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::{LookupSource, Snippet};
use crate::core::truncate_chars;

pub const EXTRACT_CHARS: usize = 1000;

pub struct WikipediaClient {
    http: reqwest::Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(lang: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("writers-bot/1.0")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        WikipediaClient {
            http,
            api_url: format!("https://{lang}.wikipedia.org/w/api.php"),
        }
    }
}

/// First existing page of a `prop=extracts` response as `(title, extract)`
pub fn parse_extract(body: &Value) -> Option<(String, String)> {
    let pages = body.get("query")?.get("pages")?.as_object()?;
    pages
        .iter()
        .filter(|(id, _)| id.as_str() != "-1")
        .find_map(|(_, page)| {
            if page.get("missing").is_some() {
                return None;
            }
            let extract = page.get("extract")?.as_str()?.trim();
            if extract.is_empty() {
                return None;
            }
            let title = page
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Some((title, truncate_chars(extract, EXTRACT_CHARS)))
        })
}

#[async_trait]
impl LookupSource for WikipediaClient {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn lookup(&self, query: &str) -> Result<Vec<Snippet>> {
        let body: Value = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("titles", query),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
            ])
            .send()
            .await
            .context("wikipedia request")?
            .error_for_status()?
            .json()
            .await
            .context("wikipedia response")?;

        Ok(parse_extract(&body)
            .map(|(title, text)| Snippet {
                title,
                text,
                source: "Википедия".to_string(),
            })
            .into_iter()
            .collect())
    }
}

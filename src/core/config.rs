//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add enrichment, cache and feedback settings
//! - 1.0.0: Bot token, OpenRouter key and model list

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

/// Models tried in order until one answers
pub const DEFAULT_MODELS: &[&str] = &[
    "anthropic/claude-3.5-sonnet",
    "openai/gpt-4o-mini",
    "google/gemma-7b-it:free",
];

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Accepted range for the per-user history cap
pub const MIN_MEMORY: usize = 20;
pub const MAX_MEMORY: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Missing key is not fatal: every answer then comes from the fallback chain
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub models: Vec<String>,
    pub max_memory: usize,
    pub history_window: usize,
    pub max_tokens: u32,
    pub temperature: f32,
    pub completion_timeout_secs: u64,
    pub enrichment_enabled: bool,
    pub wikipedia_lang: String,
    pub lookup_timeout_secs: u64,
    pub writers_dir: PathBuf,
    pub training_data_path: PathBuf,
    pub response_cache_capacity: usize,
    pub optimize_responses: bool,
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (used by `from_env` and tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram_bot_token = get("TELEGRAM_BOT_TOKEN")
            .or_else(|| get("BOT_TOKEN"))
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN (or BOT_TOKEN) must be set"))?;

        let openrouter_api_key = get("OPENROUTER_API_KEY");

        let models = get("OPENROUTER_MODELS")
            .map(|raw| {
                raw.split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|models| !models.is_empty())
            .unwrap_or_else(|| DEFAULT_MODELS.iter().map(|m| m.to_string()).collect());

        let max_memory = parse_or(get("MAX_MEMORY"), "MAX_MEMORY", 30usize)?;
        if !(MIN_MEMORY..=MAX_MEMORY).contains(&max_memory) {
            return Err(anyhow!(
                "MAX_MEMORY must be between {MIN_MEMORY} and {MAX_MEMORY}, got {max_memory}"
            ));
        }

        let temperature = parse_or(get("COMPLETION_TEMPERATURE"), "COMPLETION_TEMPERATURE", 0.8f32)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(anyhow!("COMPLETION_TEMPERATURE must be within 0.0..=2.0"));
        }

        Ok(Config {
            telegram_bot_token,
            openrouter_api_key,
            openrouter_base_url: get("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            models,
            max_memory,
            history_window: parse_or(get("HISTORY_WINDOW"), "HISTORY_WINDOW", 12usize)?,
            max_tokens: parse_or(get("COMPLETION_MAX_TOKENS"), "COMPLETION_MAX_TOKENS", 1500u32)?,
            temperature,
            completion_timeout_secs: parse_or(
                get("COMPLETION_TIMEOUT_SECS"),
                "COMPLETION_TIMEOUT_SECS",
                30u64,
            )?,
            enrichment_enabled: parse_flag(get("ENRICHMENT_ENABLED"), true),
            wikipedia_lang: get("WIKIPEDIA_LANG").unwrap_or_else(|| "ru".to_string()),
            lookup_timeout_secs: parse_or(get("LOOKUP_TIMEOUT_SECS"), "LOOKUP_TIMEOUT_SECS", 8u64)?,
            writers_dir: get("WRITERS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("writers")),
            training_data_path: get("TRAINING_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("training_data.json")),
            response_cache_capacity: parse_or(
                get("RESPONSE_CACHE_CAPACITY"),
                "RESPONSE_CACHE_CAPACITY",
                500usize,
            )?,
            optimize_responses: parse_flag(get("OPTIMIZE_RESPONSES"), true),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.openrouter_api_key.is_some()
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T> {
    match raw {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| anyhow!("{key} has an invalid value: {value}")),
        None => Ok(default),
    }
}

fn parse_flag(raw: Option<String>, default: bool) -> bool {
    match raw.as_deref().map(str::to_lowercase).as_deref() {
        Some("1" | "true" | "yes" | "on" | "enabled") => true,
        Some("0" | "false" | "no" | "off" | "disabled") => false,
        _ => default,
    }
}

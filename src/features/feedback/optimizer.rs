//! Format hints and the response reshaping they drive
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: Sentence-aware trimming
//! - 1.0.0: Bullet normalisation and length trimming

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::features::questions::QuestionCategory;

/// Answers longer than this multiple of the recommended length are trimmed
pub const TRIM_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    Concise,
    Structured,
    Detailed,
    Quotational,
}

impl ResponseStyle {
    pub fn prompt_line(&self) -> &'static str {
        match self {
            ResponseStyle::Concise => "Отвечай кратко и по существу.",
            ResponseStyle::Structured => "Структурируй ответ: выдели основные пункты списком.",
            ResponseStyle::Detailed => "Отвечай развёрнуто, с примерами и пояснениями.",
            ResponseStyle::Quotational => "Опирайся на точные цитаты и указывай, откуда они.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHint {
    /// Target answer length in characters
    pub recommended_length: usize,
    pub use_formatting: bool,
    pub style: ResponseStyle,
}

impl FormatHint {
    /// Fixed defaults used until enough well-rated answers exist
    pub fn for_category(category: QuestionCategory) -> Self {
        let (recommended_length, use_formatting, style) = match category {
            QuestionCategory::Definition => (600, false, ResponseStyle::Concise),
            QuestionCategory::Comparison => (1200, true, ResponseStyle::Structured),
            QuestionCategory::Analysis => (1500, false, ResponseStyle::Detailed),
            QuestionCategory::Quote => (500, false, ResponseStyle::Quotational),
            QuestionCategory::General => (900, false, ResponseStyle::Detailed),
        };
        FormatHint {
            recommended_length,
            use_formatting,
            style,
        }
    }

    pub fn prompt_line(&self) -> String {
        format!(
            "{} Желательный объём ответа: около {} символов.",
            self.style.prompt_line(),
            self.recommended_length
        )
    }

    /// Apply the hint to a finished answer
    pub fn apply(&self, response: &str) -> String {
        let mut text = response.trim().to_string();
        if self.use_formatting {
            text = bulletize(&text);
        }
        let limit = (self.recommended_length as f64 * TRIM_FACTOR) as usize;
        if text.chars().count() > limit {
            text = trim_to_boundary(&text, limit);
        }
        text
    }
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[-*•–]\s+(.+)$").expect("valid regex"))
}

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+[.)]\s+\S").expect("valid regex"))
}

/// Does the text already use list or emphasis markup?
pub fn has_formatting(text: &str) -> bool {
    text.contains("**")
        || text
            .lines()
            .any(|line| bullet_re().is_match(line) || numbered_re().is_match(line))
}

/// Normalise dash/star list markers to `•`
fn bulletize(text: &str) -> String {
    text.lines()
        .map(|line| match bullet_re().captures(line) {
            Some(caps) => format!("• {}", &caps[1]),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut to at most `limit` characters, preferring a sentence end, else a word boundary
fn trim_to_boundary(text: &str, limit: usize) -> String {
    let kept: String = text.chars().take(limit).collect();

    let sentence_end = kept
        .char_indices()
        .filter(|(_, c)| matches!(c, '.' | '!' | '?' | '…'))
        .map(|(i, c)| i + c.len_utf8())
        .last();
    if let Some(end) = sentence_end {
        if kept[..end].chars().count() * 10 >= limit * 6 {
            return kept[..end].to_string();
        }
    }

    match kept.rfind(char::is_whitespace) {
        Some(space) => format!("{}…", kept[..space].trim_end()),
        None => format!("{kept}…"),
    }
}

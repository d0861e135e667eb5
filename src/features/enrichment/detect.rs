//! Heuristics deciding when to look things up
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Factual-question, small-talk and "unknown answer" detection

use regex::Regex;
use std::sync::OnceLock;

const SMALL_TALK: &[&str] = &[
    "привет", "здравствуй", "здравствуйте", "добрый день", "добрый вечер", "доброе утро",
    "как дела", "как ты", "спасибо", "благодарю", "пока", "до свидания", "hello", "hi", "thanks",
    "bye",
];

const UNKNOWN_MARKERS: &[&str] = &[
    "не знаю",
    "не могу ответить",
    "не располагаю",
    "нет информации",
    "нет данных",
    "нет сведений",
    "затрудняюсь ответить",
    "мне неизвестно",
    "мне это неизвестно",
    "i don't know",
    "i do not know",
    "no information",
];

/// Words dropped when turning a question into an article title
const QUESTION_WORDS: &[&str] = &[
    "когда", "где", "кто", "что", "такой", "такая", "такое", "такие", "сколько", "в", "каком",
    "году", "родился", "родилась", "умер", "умерла", "как", "почему", "зачем", "ли", "был",
    "была", "это", "расскажи", "расскажите", "о", "об", "про", "мне", "when", "where", "who",
    "what", "is", "was", "born", "died", "the",
];

fn factual_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(когда|где|кто так(ой|ая|ие)|что такое|сколько|в каком году|родил\w*|умер\w*|when|where|who is|what is|born|died)\b",
        )
        .expect("valid regex")
    })
}

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pure greetings and pleasantries
pub fn is_small_talk(text: &str) -> bool {
    let normalized = strip_punctuation(&text.to_lowercase());
    if normalized.is_empty() {
        return true;
    }
    SMALL_TALK.iter().any(|phrase| {
        normalized == *phrase
            || (normalized.starts_with(&format!("{phrase} ")) && normalized.split(' ').count() <= 3)
    })
}

/// Does the question ask for facts worth looking up?
pub fn should_search_internet(question: &str) -> bool {
    !is_small_talk(question) && factual_re().is_match(&question.to_lowercase())
}

/// Does the answer admit not knowing?
pub fn signals_unknown(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    UNKNOWN_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Question reduced to its subject ("Когда родился Толстой?" -> "Толстой")
pub fn subject_title(question: &str) -> String {
    strip_punctuation(question)
        .split(' ')
        .filter(|word| !QUESTION_WORDS.contains(&word.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

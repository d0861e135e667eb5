//! Cut-off answer detection and continuation merging
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Pure heuristics extracted from the generator

use super::client::{ChatMessage, CompletionRequest, FinishReason};

/// Words an answer should never end on
const DANGLING_WORDS: &[&str] = &[
    "и", "а", "но", "или", "что", "чтобы", "как", "в", "во", "на", "с", "со", "к", "ко", "по",
    "о", "об", "от", "до", "для", "из", "за", "у", "при", "под", "над", "and", "or", "but", "the",
    "a", "of", "to", "in", "with", "for",
];

const TERMINAL_CHARS: &[char] = &['.', '!', '?', '…', '»', '"', '”', ')'];

/// Shortest suffix/prefix overlap treated as a repeat
const MIN_OVERLAP: usize = 4;
const MAX_OVERLAP: usize = 200;

pub const CONTINUE_INSTRUCTION: &str =
    "Продолжи ответ с того места, где остановился, без повторов.";

/// Was the answer cut off?
pub fn is_incomplete(text: &str, finish_reason: &FinishReason) -> bool {
    if *finish_reason == FinishReason::Length {
        return true;
    }
    let trimmed = text.trim_end();
    let Some(last_char) = trimmed.chars().last() else {
        return false;
    };
    if !TERMINAL_CHARS.contains(&last_char) {
        return true;
    }
    let last_word = trimmed
        .split_whitespace()
        .last()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .unwrap_or_default();
    DANGLING_WORDS.contains(&last_word.as_str())
}

/// Join a cut-off answer with its continuation, dropping repeated text at the seam
pub fn merge_continuation(partial: &str, continuation: &str) -> String {
    let cont = continuation.trim();
    if cont.is_empty() {
        return partial.to_string();
    }
    let head = partial.trim_end();
    if head.is_empty() {
        return cont.to_string();
    }
    // The model sometimes restarts the whole answer
    if cont.starts_with(head.trim_start()) {
        return cont.to_string();
    }

    let head_chars: Vec<char> = head.chars().collect();
    let cont_chars: Vec<char> = cont.chars().collect();
    let max = head_chars.len().min(cont_chars.len()).min(MAX_OVERLAP);

    let overlap = (MIN_OVERLAP..=max)
        .rev()
        .find(|&len| head_chars[head_chars.len() - len..] == cont_chars[..len])
        .unwrap_or(0);
    let rest: String = cont_chars[overlap..].iter().collect();

    if rest.trim().is_empty() {
        return head.to_string();
    }
    let glued = rest.starts_with(char::is_whitespace)
        || rest.starts_with(|c: char| ",.;:!?…»)".contains(c));
    if glued {
        format!("{head}{rest}")
    } else {
        format!("{head} {rest}")
    }
}

/// Follow-up request asking the model to continue `partial`
pub fn continuation_request(base: &CompletionRequest, partial: &str) -> CompletionRequest {
    let mut messages = base.messages.clone();
    messages.push(ChatMessage::assistant(partial));
    messages.push(ChatMessage::user(CONTINUE_INSTRUCTION));
    CompletionRequest {
        messages,
        ..base.clone()
    }
}

//! # Feature: Response Cache
//!
//! Remembers generated answers per persona so repeated questions skip the API.
//! No eviction policy: reaching capacity clears everything.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.0.0: Normalized, persona-scoped keys with full clear at capacity

use dashmap::DashMap;
use log::{debug, info};

/// Key prefix length in characters
pub const KEY_PREFIX_CHARS: usize = 120;

/// Scope used for answers given without a persona
const EXPERT_SCOPE: &str = "expert";

/// Case-insensitive, whitespace-collapsed, trailing punctuation stripped, prefix-bounded
pub fn normalize_question(question: &str) -> String {
    let collapsed = question
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let stripped = collapsed.trim_end_matches(|c: char| c.is_ascii_punctuation() || "…»«".contains(c));
    stripped.trim_end().chars().take(KEY_PREFIX_CHARS).collect()
}

pub fn cache_key(persona: Option<&str>, question: &str) -> String {
    format!("{}:{}", persona.unwrap_or(EXPERT_SCOPE), normalize_question(question))
}

#[derive(Debug)]
pub struct ResponseCache {
    entries: DashMap<String, String>,
    capacity: usize,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        ResponseCache {
            entries: DashMap::new(),
            capacity,
        }
    }

    pub fn get(&self, persona: Option<&str>, question: &str) -> Option<String> {
        let key = cache_key(persona, question);
        let hit = self.entries.get(&key).map(|v| v.value().clone());
        if hit.is_some() {
            debug!("Cache hit for '{key}'");
        }
        hit
    }

    pub fn insert(&self, persona: Option<&str>, question: &str, answer: &str) {
        if self.capacity == 0 {
            return;
        }
        let key = cache_key(persona, question);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            info!("🧹 Response cache reached {} entries, clearing", self.capacity);
            self.entries.clear();
        }
        self.entries.insert(key, answer.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_collides() {
        let a = normalize_question("Что такое реализм?");
        assert_eq!(a, normalize_question("  что   ТАКОЕ реализм "));
        assert_eq!(a, normalize_question("Что такое реализм?!..."));
        assert_eq!(a, "что такое реализм");
    }

    #[test]
    fn test_key_is_prefix_bounded() {
        let long = "а".repeat(500);
        assert_eq!(normalize_question(&long).chars().count(), KEY_PREFIX_CHARS);
        let other = format!("{}б", "а".repeat(200));
        assert_eq!(normalize_question(&long), normalize_question(&other));
    }

    #[test]
    fn test_persona_scoped() {
        let cache = ResponseCache::new(10);
        cache.insert(Some("tolstoy"), "Кто вы?", "Толстой.");
        assert_eq!(cache.get(Some("tolstoy"), "кто вы").as_deref(), Some("Толстой."));
        assert!(cache.get(Some("gogol"), "Кто вы?").is_none());
        assert!(cache.get(None, "Кто вы?").is_none());
    }

    #[test]
    fn test_full_clear_at_capacity() {
        let cache = ResponseCache::new(2);
        cache.insert(None, "один", "1");
        cache.insert(None, "два", "2");
        assert_eq!(cache.len(), 2);
        cache.insert(None, "три", "3");
        assert_eq!(cache.len(), 1);
        assert!(cache.get(None, "один").is_none());
        assert_eq!(cache.get(None, "три").as_deref(), Some("3"));
    }

    #[test]
    fn test_overwrite_does_not_clear() {
        let cache = ResponseCache::new(2);
        cache.insert(None, "один", "1");
        cache.insert(None, "два", "2");
        cache.insert(None, "Два?", "2b");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(None, "два").as_deref(), Some("2b"));
    }

    #[test]
    fn test_zero_capacity_disables() {
        let cache = ResponseCache::new(0);
        cache.insert(None, "q", "a");
        assert!(cache.is_empty());
    }
}

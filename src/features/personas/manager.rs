//! # Feature: Persona System
//!
//! Writer personas the bot role-plays as (pushkin, dostoevsky, tolstoy, chekhov, gogol).
//! Built-in profiles are compiled in; `writers/<key>.json` files override or extend them
//! at startup. Profiles are read-only afterwards.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.3.0: Russian key spellings resolve to canonical English keys
//! - 1.2.0: Fuzzy display-name matching for free-text persona selection
//! - 1.1.0: Load profile overrides from writers/<key>.json
//! - 1.0.0: Initial release with five built-in writers

use log::{debug, info, warn};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::catalogue::builtin_personas;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Canonical key (`tolstoy`), used in sessions
    pub key: String,
    pub display_name: String,
    pub emoji: String,
    pub birth_year: i32,
    pub death_year: i32,
    pub style: String,
    pub personality: String,
    pub bio: String,
    pub major_works: Vec<String>,
    /// Canned lines used when the persona is selected
    pub greetings: Vec<String>,
    /// Canned lines used when no generated answer is available
    pub fallback_lines: Vec<String>,
    /// Other spellings that resolve to this persona (`толстой`)
    pub aliases: Vec<String>,
    /// Framing text for answers built from web snippets, `{query}` is substituted
    pub search_intro: String,
}

impl Persona {
    pub fn lifespan(&self) -> String {
        format!("{}–{}", self.birth_year, self.death_year)
    }

    /// Label shown on the persona keyboard
    pub fn button_label(&self) -> String {
        format!("{} {}", self.emoji, self.display_name)
    }

    pub fn random_greeting(&self) -> String {
        self.greetings
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(|| format!("Здравствуйте! С вами {}.", self.display_name))
    }

    pub fn random_fallback_line(&self) -> Option<String> {
        self.fallback_lines.choose(&mut rand::rng()).cloned()
    }

    fn surname_stem(&self) -> String {
        let normalized = normalize_name(&self.display_name);
        let surname = normalized.split(' ').next_back().unwrap_or_default();
        word_stem(surname)
    }
}

#[derive(Debug, Clone)]
pub struct PersonaManager {
    personas: HashMap<String, Persona>,
    /// Menu order
    order: Vec<String>,
}

impl Default for PersonaManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonaManager {
    /// Manager with the built-in profiles only
    pub fn new() -> Self {
        Self::from_personas(builtin_personas())
    }

    pub fn from_personas(personas: Vec<Persona>) -> Self {
        let mut manager = PersonaManager {
            personas: HashMap::new(),
            order: Vec::new(),
        };
        for persona in personas {
            manager.insert(persona);
        }
        manager
    }

    /// Built-in profiles overridden/extended by `<dir>/<key>.json` files.
    ///
    /// Unreadable or malformed files are logged and skipped; the built-in profile
    /// (if any) stays in place.
    pub fn load_from_dir(dir: &Path) -> Self {
        let mut manager = Self::new();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                info!(
                    "📚 No writer profiles at {} ({e}) - using built-in personas",
                    dir.display()
                );
                return manager;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let raw_key = stem.to_lowercase();
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    warn!("⚠️ Could not read writer profile {}: {e}", path.display());
                    continue;
                }
            };
            let file: PersonaFile = match serde_json::from_str(&contents) {
                Ok(file) => file,
                Err(e) => {
                    warn!("⚠️ Malformed writer profile {}: {e}", path.display());
                    continue;
                }
            };
            let key = manager.canonical_key(&raw_key).unwrap_or(raw_key);
            match manager.personas.get(&key).cloned() {
                Some(existing) => {
                    debug!("Overriding built-in persona '{key}' from {}", path.display());
                    manager.insert(file.apply_to(existing));
                }
                None => match file.into_persona(&key) {
                    Some(persona) => {
                        info!("📚 Loaded writer profile '{key}' ({})", persona.display_name);
                        manager.insert(persona);
                    }
                    None => warn!(
                        "⚠️ Writer profile {} has no name - persona unavailable",
                        path.display()
                    ),
                },
            }
        }

        manager
    }

    fn insert(&mut self, persona: Persona) {
        if !self.personas.contains_key(&persona.key) {
            self.order.push(persona.key.clone());
        }
        self.personas.insert(persona.key.clone(), persona);
    }

    /// Resolve any accepted spelling (`tolstoy`, `Толстой`, `лев толстой`) to the canonical key
    pub fn canonical_key(&self, raw: &str) -> Option<String> {
        let wanted = normalize_name(raw);
        if wanted.is_empty() {
            return None;
        }
        self.list_personas()
            .into_iter()
            .find(|p| {
                p.key == wanted
                    || normalize_name(&p.display_name) == wanted
                    || p.aliases.iter().any(|a| normalize_name(a) == wanted)
            })
            .map(|p| p.key.clone())
    }

    pub fn get_persona(&self, key: &str) -> Option<&Persona> {
        self.personas.get(key).or_else(|| {
            self.canonical_key(key)
                .and_then(|canonical| self.personas.get(&canonical))
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.personas.contains_key(key)
    }

    /// Personas in menu order
    pub fn list_personas(&self) -> Vec<&Persona> {
        self.order
            .iter()
            .filter_map(|key| self.personas.get(key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn random_persona(&self) -> Option<&Persona> {
        let personas = self.list_personas();
        personas.choose(&mut rand::rng()).copied()
    }

    /// Match a selection utterance against the catalogue.
    ///
    /// Exact matches (display name, button label, key, alias) win; otherwise the
    /// first persona whose surname stem appears in the text is returned.
    pub fn match_display_name(&self, text: &str) -> Option<&Persona> {
        let wanted = normalize_name(text);
        if wanted.is_empty() {
            return None;
        }
        if let Some(key) = self.canonical_key(&wanted) {
            return self.personas.get(&key);
        }
        self.find_mentioned(&wanted).or_else(|| {
            // "Лев" or "Фёдор" alone still picks the writer when unambiguous
            let candidates: Vec<&Persona> = self
                .list_personas()
                .into_iter()
                .filter(|p| wanted.chars().count() >= 3 && normalize_name(&p.display_name).contains(&wanted))
                .collect();
            match candidates.as_slice() {
                [only] => Some(*only),
                _ => None,
            }
        })
    }

    /// First persona whose surname (in any case form) is mentioned in the text
    pub fn find_mentioned(&self, text: &str) -> Option<&Persona> {
        let normalized = normalize_name(text);
        let words: Vec<&str> = normalized.split(' ').collect();
        self.list_personas().into_iter().find(|p| {
            let stem = p.surname_stem();
            stem.chars().count() >= 4 && words.iter().any(|w| w.starts_with(&stem))
        })
    }
}

/// Lowercase, fold `ё`, drop emoji and punctuation, collapse whitespace
pub fn normalize_name(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .replace('ё', "е")
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip up to two trailing vowel/soft-sign letters so inflected forms still match
fn word_stem(word: &str) -> String {
    const ENDINGS: &str = "аеиоуыьйяю";
    let mut chars: Vec<char> = word.chars().collect();
    for _ in 0..2 {
        match chars.last() {
            Some(c) if ENDINGS.contains(*c) && chars.len() > 4 => {
                chars.pop();
            }
            _ => break,
        }
    }
    chars.into_iter().collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BiographicalFacts {
    birth_year: Option<Value>,
    death_year: Option<Value>,
}

/// On-disk profile, mirrors the `writers/<key>.json` layout
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PersonaFile {
    name: String,
    biographical_facts: BiographicalFacts,
    personality: String,
    style: String,
    #[serde(alias = "about")]
    bio: String,
    #[serde(alias = "works", alias = "key_works")]
    major_works: Vec<String>,
    greetings: Vec<String>,
    quotes: Vec<String>,
    emoji: Option<String>,
    aliases: Vec<String>,
    search_intro: Option<String>,
}

fn year(value: &Option<Value>) -> Option<i32> {
    match value.as_ref()? {
        Value::Number(n) => n.as_i64().map(|y| y as i32),
        Value::String(s) => {
            let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

impl PersonaFile {
    fn apply_to(self, mut persona: Persona) -> Persona {
        if !self.name.trim().is_empty() {
            persona.display_name = self.name;
        }
        if let Some(y) = year(&self.biographical_facts.birth_year) {
            persona.birth_year = y;
        }
        if let Some(y) = year(&self.biographical_facts.death_year) {
            persona.death_year = y;
        }
        if !self.personality.is_empty() {
            persona.personality = self.personality;
        }
        if !self.style.is_empty() {
            persona.style = self.style;
        }
        if !self.bio.is_empty() {
            persona.bio = self.bio;
        }
        if !self.major_works.is_empty() {
            persona.major_works = self.major_works;
        }
        if !self.greetings.is_empty() {
            persona.greetings = self.greetings;
        }
        if !self.quotes.is_empty() {
            persona.fallback_lines = self.quotes;
        }
        if let Some(emoji) = self.emoji {
            persona.emoji = emoji;
        }
        persona.aliases.extend(self.aliases);
        if let Some(intro) = self.search_intro {
            persona.search_intro = intro;
        }
        persona
    }

    fn into_persona(self, key: &str) -> Option<Persona> {
        if self.name.trim().is_empty() {
            return None;
        }
        let surname = normalize_name(&self.name)
            .split(' ')
            .next_back()
            .unwrap_or_default()
            .to_string();
        let base = Persona {
            key: key.to_string(),
            display_name: String::new(),
            emoji: "📚".to_string(),
            birth_year: 0,
            death_year: 0,
            style: String::new(),
            personality: String::new(),
            bio: String::new(),
            major_works: Vec::new(),
            greetings: Vec::new(),
            fallback_lines: Vec::new(),
            aliases: vec![surname],
            search_intro: "Относительно «{query}» вот что говорят современные источники:".to_string(),
        };
        Some(self.apply_to(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_persona_manager_creation() {
        let manager = PersonaManager::new();
        for key in ["pushkin", "dostoevsky", "tolstoy", "chekhov", "gogol"] {
            assert!(manager.get_persona(key).is_some(), "missing {key}");
        }
        assert!(manager.get_persona("nonexistent").is_none());
        assert_eq!(manager.len(), 5);
    }

    #[test]
    fn test_persona_profiles_complete() {
        let manager = PersonaManager::new();
        for persona in manager.list_personas() {
            assert!(!persona.display_name.is_empty());
            assert!(!persona.greetings.is_empty(), "{} has no greetings", persona.key);
            assert!(!persona.fallback_lines.is_empty());
            assert!(!persona.major_works.is_empty());
            assert!(persona.birth_year < persona.death_year);
            assert!(persona.search_intro.contains("{query}"));
        }
    }

    #[test]
    fn test_canonical_key_accepts_russian_spellings() {
        let manager = PersonaManager::new();
        assert_eq!(manager.canonical_key("пушкин").as_deref(), Some("pushkin"));
        assert_eq!(manager.canonical_key("Толстой").as_deref(), Some("tolstoy"));
        assert_eq!(manager.canonical_key("tolstoy").as_deref(), Some("tolstoy"));
        assert_eq!(manager.canonical_key("Фёдор Достоевский").as_deref(), Some("dostoevsky"));
        assert!(manager.canonical_key("толкиен").is_none());
        assert_eq!(manager.get_persona("гоголь").map(|p| p.key.as_str()), Some("gogol"));
    }

    #[test]
    fn test_match_display_name_exact_and_label() {
        let manager = PersonaManager::new();
        let tolstoy = manager.get_persona("tolstoy").unwrap();
        assert_eq!(manager.match_display_name("Лев Толстой").unwrap().key, "tolstoy");
        assert_eq!(
            manager.match_display_name(&tolstoy.button_label()).unwrap().key,
            "tolstoy"
        );
        assert_eq!(manager.match_display_name("  лев   толстой!! ").unwrap().key, "tolstoy");
    }

    #[test]
    fn test_match_display_name_fuzzy() {
        let manager = PersonaManager::new();
        assert_eq!(manager.match_display_name("хочу с Чеховым").unwrap().key, "chekhov");
        assert_eq!(manager.match_display_name("давай Гоголя").unwrap().key, "gogol");
        assert_eq!(manager.match_display_name("Фёдор").unwrap().key, "dostoevsky");
        assert!(manager.match_display_name("Шекспир").is_none());
        assert!(manager.match_display_name("").is_none());
        assert!(manager.match_display_name("🎭").is_none());
    }

    #[test]
    fn test_find_mentioned_inflected() {
        let manager = PersonaManager::new();
        assert_eq!(
            manager.find_mentioned("Когда родился Толстой?").unwrap().key,
            "tolstoy"
        );
        assert_eq!(
            manager.find_mentioned("Что писал о Достоевском Набоков?").unwrap().key,
            "dostoevsky"
        );
        assert!(manager.find_mentioned("Что такое реализм?").is_none());
    }

    #[test]
    fn test_random_greeting_is_configured() {
        let manager = PersonaManager::new();
        let pushkin = manager.get_persona("pushkin").unwrap();
        for _ in 0..10 {
            assert!(pushkin.greetings.contains(&pushkin.random_greeting()));
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("🏛️ Лев  Толстой"), "лев толстой");
        assert_eq!(normalize_name("Фёдор"), "федор");
    }

    #[test]
    fn test_load_from_missing_dir_uses_builtins() {
        let manager = PersonaManager::load_from_dir(Path::new("/nonexistent/writers"));
        assert_eq!(manager.len(), 5);
    }

    #[test]
    fn test_load_from_dir_overrides_and_extends() {
        let dir = tempfile::tempdir().unwrap();

        let mut tolstoy = fs::File::create(dir.path().join("толстой.json")).unwrap();
        write!(
            tolstoy,
            r#"{{"name": "Лев Толстой", "biographical_facts": {{"birth_year": "1828", "death_year": 1910}},
                "greetings": ["Здравствуйте из файла."], "major_works": ["Хаджи-Мурат"]}}"#
        )
        .unwrap();

        let mut turgenev = fs::File::create(dir.path().join("turgenev.json")).unwrap();
        write!(
            turgenev,
            r#"{{"name": "Иван Тургенев", "biographical_facts": {{"birth_year": 1818, "death_year": 1883}},
                "style": "Лиричный", "greetings": ["Добрый вечер."]}}"#
        )
        .unwrap();

        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("nameless.json"), "{}").unwrap();

        let manager = PersonaManager::load_from_dir(dir.path());
        assert_eq!(manager.len(), 6);

        let tolstoy = manager.get_persona("tolstoy").unwrap();
        assert_eq!(tolstoy.greetings, vec!["Здравствуйте из файла."]);
        assert_eq!(tolstoy.major_works, vec!["Хаджи-Мурат"]);
        // Fields absent from the file keep built-in values
        assert!(!tolstoy.fallback_lines.is_empty());

        let turgenev = manager.get_persona("turgenev").unwrap();
        assert_eq!(turgenev.birth_year, 1818);
        assert_eq!(manager.match_display_name("Тургенев").unwrap().key, "turgenev");
    }
}

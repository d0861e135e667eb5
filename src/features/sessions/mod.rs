//! # Feature: Sessions
//!
//! Per-user conversation state: selected persona, bounded turn history and
//! interaction mode. Stored behind the [`SessionStore`] trait so the router never
//! touches a global map.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Track last exchange for ratings
//! - 1.0.0: DashMap-backed in-memory store

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionMode {
    /// No persona chosen yet
    #[default]
    Idle,
    /// Question mode without a persona
    AwaitingQuestion,
    /// Persona keyboard shown, next text is a selection
    AwaitingPersona,
    InPersonaChat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: u64,
    /// Canonical persona key
    pub selected_persona: Option<String>,
    pub history: Vec<Turn>,
    pub mode: SessionMode,
    pub last_exchange: Option<Exchange>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: u64) -> Self {
        Session {
            user_id,
            selected_persona: None,
            history: Vec::new(),
            mode: SessionMode::Idle,
            last_exchange: None,
            created_at: Utc::now(),
        }
    }

    /// Append a turn and drop the oldest ones past `cap`
    pub fn push_turn(&mut self, role: Role, text: &str, cap: usize) {
        self.history.push(Turn {
            role,
            text: text.to_string(),
        });
        if self.history.len() > cap {
            let excess = self.history.len() - cap;
            self.history.drain(..excess);
        }
    }

    pub fn record_exchange(&mut self, question: &str, answer: &str, cap: usize) {
        self.push_turn(Role::User, question, cap);
        self.push_turn(Role::Assistant, answer, cap);
        self.last_exchange = Some(Exchange {
            question: question.to_string(),
            answer: answer.to_string(),
        });
    }

    /// Last `window` turns, oldest first
    pub fn recent(&self, window: usize) -> &[Turn] {
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }

    /// Forget the conversation but keep the persona
    pub fn clear_memory(&mut self) {
        self.history.clear();
        self.last_exchange = None;
    }

    pub fn select_persona(&mut self, key: &str) {
        self.selected_persona = Some(key.to_string());
        self.clear_memory();
        self.mode = SessionMode::InPersonaChat;
    }

    pub fn drop_persona(&mut self) {
        self.selected_persona = None;
        self.mode = SessionMode::AwaitingPersona;
    }
}

/// Storage seam for sessions
pub trait SessionStore: Send + Sync {
    fn get(&self, user_id: u64) -> Option<Session>;

    fn put(&self, session: Session);

    fn clear(&self, user_id: u64);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_or_create(&self, user_id: u64) -> Session {
        self.get(user_id).unwrap_or_else(|| Session::new(user_id))
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<u64, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user_id: u64) -> Option<Session> {
        self.sessions.get(&user_id).map(|s| s.value().clone())
    }

    fn put(&self, session: Session) {
        self.sessions.insert(session.user_id, session);
    }

    fn clear(&self, user_id: u64) {
        self.sessions.remove(&user_id);
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(42);
        assert_eq!(session.mode, SessionMode::Idle);
        assert!(session.selected_persona.is_none());
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_history_never_exceeds_cap() {
        let mut session = Session::new(1);
        for i in 0..100 {
            session.record_exchange(&format!("q{i}"), &format!("a{i}"), 30);
            assert!(session.history.len() <= 30);
        }
        assert_eq!(session.history.len(), 30);
        // FIFO: the newest turns survive
        assert_eq!(session.history.last().unwrap().text, "a99");
        assert_eq!(session.history[0].text, "q85");
    }

    #[test]
    fn test_recent_window() {
        let mut session = Session::new(1);
        for i in 0..5 {
            session.push_turn(Role::User, &i.to_string(), 30);
        }
        let recent: Vec<&str> = session.recent(2).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(recent, vec!["3", "4"]);
        assert_eq!(session.recent(100).len(), 5);
    }

    #[test]
    fn test_clear_memory_keeps_persona() {
        let mut session = Session::new(1);
        session.select_persona("tolstoy");
        session.record_exchange("Кто вы?", "Я Толстой.", 30);
        session.clear_memory();
        assert!(session.history.is_empty());
        assert!(session.last_exchange.is_none());
        assert_eq!(session.selected_persona.as_deref(), Some("tolstoy"));
        assert_eq!(session.mode, SessionMode::InPersonaChat);
    }

    #[test]
    fn test_select_persona_resets_history() {
        let mut session = Session::new(1);
        session.record_exchange("a", "b", 30);
        session.select_persona("gogol");
        assert!(session.history.is_empty());
        assert_eq!(session.mode, SessionMode::InPersonaChat);
    }

    #[test]
    fn test_store_roundtrip() {
        let store = InMemorySessionStore::new();
        assert!(store.get(5).is_none());
        let mut session = store.get_or_create(5);
        assert!(store.is_empty());
        session.mode = SessionMode::AwaitingPersona;
        store.put(session);
        assert_eq!(store.get(5).unwrap().mode, SessionMode::AwaitingPersona);
        store.clear(5);
        assert!(store.get(5).is_none());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(Role::User.as_str(), "user");
    }
}

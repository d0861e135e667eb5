//! # Feature: Question Classification
//!
//! Keyword heuristics shared by the prompt builder, the local knowledge fallback
//! and the feedback recorder.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add feedback categories (definition, comparison, analysis, quote)
//! - 1.0.0: Topic detection for prompt focus and knowledge fallback

use serde::{Deserialize, Serialize};

/// What a question is about, used to focus the prompt and pick a local answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionTopic {
    AboutSelf,
    Biography,
    Works,
    Influence,
    Analysis,
    General,
}

const ABOUT_SELF: &[&str] = &["кто ты", "ты кто", "о себе", "представься", "who are you"];
const BIOGRAPHY: &[&str] = &[
    "родился", "родились", "умер", "умерли", "биограф", "где жил", "годы жизни", "детств",
    "семья", "семье", "семьи", "жена", "born", "died",
];
const WORKS: &[&str] = &[
    "произведени", "книг", "роман", "повест", "рассказ", "пьес", "стих", "написал", "написали",
    "works",
];
const INFLUENCE: &[&str] = &["влияни", "повлиял", "вдохнов", "учител", "кумир"];
const ANALYSIS: &[&str] = &[
    "смысл", "анализ", "почему", "тема", "образ", "идея", "идеи", "символ", "мотив", "why",
];

impl QuestionTopic {
    pub fn detect(question: &str) -> Self {
        let q = question.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| q.contains(w));

        if has(ABOUT_SELF) {
            QuestionTopic::AboutSelf
        } else if has(BIOGRAPHY) {
            QuestionTopic::Biography
        } else if has(INFLUENCE) {
            QuestionTopic::Influence
        } else if has(ANALYSIS) {
            QuestionTopic::Analysis
        } else if has(WORKS) {
            QuestionTopic::Works
        } else {
            QuestionTopic::General
        }
    }

    /// Extra instruction appended to the system prompt
    pub fn focus_line(&self) -> Option<&'static str> {
        match self {
            QuestionTopic::AboutSelf => {
                Some("Собеседник спрашивает о тебе: расскажи о себе от первого лица.")
            }
            QuestionTopic::Biography => {
                Some("Вопрос о биографии: опирайся на точные даты и факты, не выдумывай.")
            }
            QuestionTopic::Works => {
                Some("Вопрос о произведениях: назови конкретные названия и кратко поясни их суть.")
            }
            QuestionTopic::Influence => {
                Some("Вопрос о влияниях: назови конкретных авторов и объясни, в чём состояло влияние.")
            }
            QuestionTopic::Analysis => {
                Some("Вопрос требует анализа: рассуждай последовательно, приводи примеры из текстов.")
            }
            QuestionTopic::General => None,
        }
    }
}

/// Feedback bucket for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Definition,
    Comparison,
    Analysis,
    Quote,
    General,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 5] = [
        QuestionCategory::Definition,
        QuestionCategory::Comparison,
        QuestionCategory::Analysis,
        QuestionCategory::Quote,
        QuestionCategory::General,
    ];

    pub fn classify(question: &str) -> Self {
        let q = question.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| q.contains(w));

        if has(&["сравни", "разниц", "отлича", "отличи", "общего", " vs ", "compare"]) {
            QuestionCategory::Comparison
        } else if has(&["цитат", "фраз", "слова ", "строк", "quote"]) {
            QuestionCategory::Quote
        } else if has(&["что такое", "что значит", "определени", "что означает", "what is"]) {
            QuestionCategory::Definition
        } else if has(&["анализ", "почему", "смысл", "значени", "объясни", "why"]) {
            QuestionCategory::Analysis
        } else {
            QuestionCategory::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Definition => "definition",
            QuestionCategory::Comparison => "comparison",
            QuestionCategory::Analysis => "analysis",
            QuestionCategory::Quote => "quote",
            QuestionCategory::General => "general",
        }
    }

    /// Russian label for /stats
    pub fn label(&self) -> &'static str {
        match self {
            QuestionCategory::Definition => "Определения",
            QuestionCategory::Comparison => "Сравнения",
            QuestionCategory::Analysis => "Анализ",
            QuestionCategory::Quote => "Цитаты",
            QuestionCategory::General => "Общие вопросы",
        }
    }
}

//! Reply-keyboard labels and bot replies
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Main, persona and rating keyboards

use crate::features::personas::{persona_button_rows, PersonaManager};

pub const CHOOSE_PERSONA: &str = "📚 Выбрать писателя";
pub const RANDOM_PERSONA: &str = "🎲 Случайный писатель";
pub const ASK_QUESTION: &str = "❓ Задать вопрос";
pub const CLEAR_MEMORY: &str = "🧹 Очистить память";
pub const RATE_ANSWER: &str = "⭐ Оценить ответ";
pub const ABOUT: &str = "ℹ️ О боте";
pub const BACK: &str = "🔙 Назад";
pub const RATING_BUTTONS: [&str; 5] = ["⭐ 1", "⭐ 2", "⭐ 3", "⭐ 4", "⭐ 5"];

/// Which reply keyboard accompanies a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    Main,
    Personas,
    Rating,
}

impl Keyboard {
    pub fn rows(&self, personas: &PersonaManager) -> Vec<Vec<String>> {
        match self {
            Keyboard::Main => owned(&[
                &[CHOOSE_PERSONA, RANDOM_PERSONA],
                &[ASK_QUESTION, RATE_ANSWER],
                &[CLEAR_MEMORY, ABOUT],
            ]),
            Keyboard::Personas => persona_button_rows(personas, &[BACK]),
            Keyboard::Rating => owned(&[&RATING_BUTTONS[..], &[BACK][..]]),
        }
    }
}

fn owned(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|label| label.to_string()).collect())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Reply {
            text: text.into(),
            keyboard,
        }
    }

    pub fn main(text: impl Into<String>) -> Self {
        Self::new(text, Keyboard::Main)
    }

    pub fn personas(text: impl Into<String>) -> Self {
        Self::new(text, Keyboard::Personas)
    }
}

//! System prompt construction
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Topic focus and learned format hints
//! - 1.0.0: Persona and expert prompts as a fluent builder

use super::manager::Persona;
use crate::features::feedback::FormatHint;
use crate::features::questions::QuestionTopic;

const COMMON_RULES: &str = "Правила:\n\
- Всегда отвечай по-русски.\n\
- Всегда заканчивай предложения, не обрывай ответ на полуслове.\n\
- Не используй эмодзи.\n\
- Если не знаешь точного ответа, честно скажи об этом.";

/// Builder for the system instruction sent ahead of the conversation
///
/// # Example
///
/// ```ignore
/// let prompt = PromptBuilder::new(Some(persona))
///     .with_topic(QuestionTopic::Biography)
///     .with_format_hint(Some(hint))
///     .build();
/// ```
pub struct PromptBuilder<'a> {
    persona: Option<&'a Persona>,
    topic: Option<QuestionTopic>,
    format_hint: Option<FormatHint>,
}

impl<'a> PromptBuilder<'a> {
    /// `None` builds the literature-expert prompt used in question mode
    pub fn new(persona: Option<&'a Persona>) -> Self {
        Self {
            persona,
            topic: None,
            format_hint: None,
        }
    }

    pub fn with_topic(mut self, topic: QuestionTopic) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn with_format_hint(mut self, hint: Option<FormatHint>) -> Self {
        self.format_hint = hint;
        self
    }

    pub fn build(self) -> String {
        let mut prompt = match self.persona {
            Some(persona) => persona_intro(persona),
            None => "Ты эксперт по русской литературе XIX века. Отвечай точно, опираясь на \
                     факты, даты и тексты произведений."
                .to_string(),
        };

        prompt.push_str("\n\n");
        prompt.push_str(COMMON_RULES);

        if let Some(focus) = self.topic.and_then(|t| t.focus_line()) {
            prompt.push_str("\n\n");
            prompt.push_str(focus);
        }
        if let Some(hint) = self.format_hint {
            prompt.push_str("\n\n");
            prompt.push_str(&hint.prompt_line());
        }
        prompt
    }
}

fn persona_intro(persona: &Persona) -> String {
    format!(
        "Ты {name} ({lifespan}), русский писатель. Отвечай от первого лица, как если бы \
         ты сам беседовал с читателем.\n\n\
         Стиль речи: {style}\n\
         Характер: {personality}\n\
         О тебе: {bio}\n\
         Главные произведения: {works}.\n\n\
         Не выходи из роли и не упоминай, что ты языковая модель.",
        name = persona.display_name,
        lifespan = persona.lifespan(),
        style = persona.style,
        personality = persona.personality,
        bio = persona.bio,
        works = persona.major_works.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::personas::PersonaManager;
    use crate::features::questions::QuestionCategory;

    #[test]
    fn test_persona_prompt() {
        let manager = PersonaManager::new();
        let tolstoy = manager.get_persona("tolstoy").unwrap();
        let prompt = PromptBuilder::new(Some(tolstoy)).build();
        assert!(prompt.contains("Лев Толстой"));
        assert!(prompt.contains("1828–1910"));
        assert!(prompt.contains("Война и мир"));
        assert!(prompt.contains("заканчивай предложения"));
        assert!(prompt.contains("Не используй эмодзи"));
    }

    #[test]
    fn test_expert_prompt() {
        let prompt = PromptBuilder::new(None).build();
        assert!(prompt.contains("эксперт по русской литературе"));
        assert!(prompt.contains("по-русски"));
    }

    #[test]
    fn test_topic_focus() {
        let prompt = PromptBuilder::new(None)
            .with_topic(QuestionTopic::Biography)
            .build();
        assert!(prompt.contains("биографии"));

        let general = PromptBuilder::new(None)
            .with_topic(QuestionTopic::General)
            .build();
        assert_eq!(general, PromptBuilder::new(None).build());
    }

    #[test]
    fn test_format_hint_line() {
        let hint = FormatHint::for_category(QuestionCategory::Comparison);
        let prompt = PromptBuilder::new(None)
            .with_format_hint(Some(hint))
            .build();
        assert!(prompt.contains("списком"));
        assert!(prompt.contains("1200 символов"));
    }
}

//! Local answers used when the completion API is unavailable
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Ordered strategy chain (knowledge base, canned line, apology)

use crate::features::personas::{Persona, PersonaManager};
use crate::features::questions::QuestionTopic;

pub const APOLOGY: &str = "Простите, сейчас я не могу ответить. Попробуйте ещё раз чуть позже.";

pub struct FallbackContext<'a> {
    /// Persona the user is talking to, `None` in question mode
    pub persona: Option<&'a Persona>,
    pub question: &'a str,
    pub personas: &'a PersonaManager,
}

pub trait FallbackStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn respond(&self, ctx: &FallbackContext<'_>) -> Option<String>;
}

/// Facts from the persona catalogue, keyed by the question topic
pub struct KnowledgeBase;

impl FallbackStrategy for KnowledgeBase {
    fn name(&self) -> &'static str {
        "knowledge_base"
    }

    fn respond(&self, ctx: &FallbackContext<'_>) -> Option<String> {
        let subject = ctx.personas.find_mentioned(ctx.question).or(ctx.persona)?;
        let first_person = ctx.persona.is_some_and(|p| p.key == subject.key);
        let works = subject.major_works.join(", ");

        let answer = match (QuestionTopic::detect(ctx.question), first_person) {
            (QuestionTopic::AboutSelf, true) => format!(
                "Я {} ({}). {}",
                subject.display_name,
                subject.lifespan(),
                subject.bio
            ),
            (QuestionTopic::AboutSelf, false) => return None,
            (QuestionTopic::Biography, true) => format!(
                "Я родился в {} году, а ушёл из жизни в {} году. {}",
                subject.birth_year, subject.death_year, subject.bio
            ),
            (QuestionTopic::Biography, false) => format!(
                "{} родился в {} году и умер в {} году. {}",
                subject.display_name, subject.birth_year, subject.death_year, subject.bio
            ),
            (QuestionTopic::Works, true) => {
                format!("Из написанного мною главным считаю вот что: {works}.")
            }
            (QuestionTopic::Works, false) => {
                format!("Главные произведения автора по имени {}: {works}.", subject.display_name)
            }
            _ => return None,
        };
        Some(answer)
    }
}

/// A random quote from the active persona
pub struct CannedLine;

impl FallbackStrategy for CannedLine {
    fn name(&self) -> &'static str {
        "canned_line"
    }

    fn respond(&self, ctx: &FallbackContext<'_>) -> Option<String> {
        ctx.persona?.random_fallback_line()
    }
}

pub struct Apology;

impl FallbackStrategy for Apology {
    fn name(&self) -> &'static str {
        "apology"
    }

    fn respond(&self, _ctx: &FallbackContext<'_>) -> Option<String> {
        Some(APOLOGY.to_string())
    }
}

pub struct FallbackChain {
    strategies: Vec<Box<dyn FallbackStrategy>>,
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(KnowledgeBase),
            Box::new(CannedLine),
            Box::new(Apology),
        ])
    }
}

impl FallbackChain {
    pub fn new(strategies: Vec<Box<dyn FallbackStrategy>>) -> Self {
        FallbackChain { strategies }
    }

    /// First non-empty answer and the name of the strategy that produced it
    pub fn respond(&self, ctx: &FallbackContext<'_>) -> (String, &'static str) {
        self.strategies
            .iter()
            .find_map(|strategy| {
                strategy
                    .respond(ctx)
                    .filter(|text| !text.trim().is_empty())
                    .map(|text| (text, strategy.name()))
            })
            .unwrap_or_else(|| (APOLOGY.to_string(), "apology"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(
        personas: &'a PersonaManager,
        persona: Option<&'a str>,
        question: &'a str,
    ) -> FallbackContext<'a> {
        FallbackContext {
            persona: persona.and_then(|k| personas.get_persona(k)),
            question,
            personas,
        }
    }

    #[test]
    fn test_knowledge_base_biography_first_person() {
        let personas = PersonaManager::new();
        let (text, name) =
            FallbackChain::default().respond(&ctx(&personas, Some("tolstoy"), "Когда вы родились?"));
        assert_eq!(name, "knowledge_base");
        assert!(text.starts_with("Я родился в 1828 году"));
    }

    #[test]
    fn test_knowledge_base_about_other_writer() {
        let personas = PersonaManager::new();
        let (text, _) = FallbackChain::default()
            .respond(&ctx(&personas, None, "Когда родился Чехов?"));
        assert!(text.starts_with("Антон Чехов родился в 1860 году"));
    }

    #[test]
    fn test_canned_line_for_open_question() {
        let personas = PersonaManager::new();
        let gogol = personas.get_persona("gogol").unwrap();
        let (text, name) = FallbackChain::default()
            .respond(&ctx(&personas, Some("gogol"), "Что вы думаете о любви?"));
        assert_eq!(name, "canned_line");
        assert!(gogol.fallback_lines.contains(&text));
    }

    #[test]
    fn test_meaning_of_life_is_not_answered_with_dates() {
        let personas = PersonaManager::new();
        let tolstoy = personas.get_persona("tolstoy").unwrap();
        let (text, name) = FallbackChain::default()
            .respond(&ctx(&personas, Some("tolstoy"), "В чём смысл жизни?"));
        assert_eq!(name, "canned_line");
        assert!(tolstoy.fallback_lines.contains(&text));
        assert!(!text.contains("1828"));
    }

    #[test]
    fn test_apology_without_persona() {
        let personas = PersonaManager::new();
        let (text, name) =
            FallbackChain::default().respond(&ctx(&personas, None, "Что такое реализм?"));
        assert_eq!(name, "apology");
        assert_eq!(text, APOLOGY);
    }

    #[test]
    fn test_empty_chain_still_answers() {
        let personas = PersonaManager::new();
        let (text, _) = FallbackChain::new(Vec::new()).respond(&ctx(&personas, None, "?"));
        assert!(!text.is_empty());
    }
}

//! Message router
//!
//! Decides what a text message means for the sender's session: a command or
//! menu button, a persona selection, or a question for the generator.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Question mode without persona
//! - 1.0.0: Mode-driven routing over the session store

use log::{error, info, warn};
use std::sync::Arc;

use super::context::CommandContext;
use super::handlers::create_all_handlers;
use super::menu::Reply;
use super::registry::CommandRegistry;
use crate::features::personas::is_valid_persona;
use crate::features::sessions::{Session, SessionMode};

const UNKNOWN_PERSONA: &str = "Не узнаю такого писателя. Пожалуйста, выберите из списка:";
const PICK_FIRST: &str = "Сначала выберите писателя, с которым хотите поговорить:";
const PERSONA_UNAVAILABLE: &str =
    "Этот писатель сейчас недоступен. Пожалуйста, выберите другого:";
const HANDLER_FAILED: &str = "Что-то пошло не так. Попробуйте ещё раз.";

pub struct Router {
    ctx: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl Router {
    pub fn new(ctx: Arc<CommandContext>) -> Self {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        Router { ctx, registry }
    }

    pub fn context(&self) -> &Arc<CommandContext> {
        &self.ctx
    }

    /// Handle one text message from `user_id` and persist the updated session
    pub async fn route(&self, user_id: u64, text: &str) -> Reply {
        let mut session = self.ctx.sessions.get_or_create(user_id);
        let reply = self.dispatch(&mut session, text).await;
        self.ctx.sessions.put(session);
        reply
    }

    async fn dispatch(&self, session: &mut Session, text: &str) -> Reply {
        if let Some((handler, invocation)) = self.registry.resolve(text) {
            return match handler.handle(Arc::clone(&self.ctx), session, &invocation).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("❌ Command '{}' failed for {}: {e:#}", invocation.name, session.user_id);
                    Reply::main(HANDLER_FAILED)
                }
            };
        }

        match session.mode {
            SessionMode::AwaitingPersona => self.select_persona(session, text),
            SessionMode::InPersonaChat => self.persona_chat(session, text).await,
            SessionMode::AwaitingQuestion => {
                let reply = self.ctx.generator.generate_response(session, None, text).await;
                Reply::main(reply.text)
            }
            SessionMode::Idle => {
                session.mode = SessionMode::AwaitingPersona;
                Reply::personas(PICK_FIRST)
            }
        }
    }

    fn select_persona(&self, session: &mut Session, text: &str) -> Reply {
        match self.ctx.personas.match_display_name(text) {
            Some(persona) => {
                session.select_persona(&persona.key);
                info!("🎭 User {} selected {}", session.user_id, persona.key);
                Reply::main(persona.random_greeting())
            }
            None => Reply::personas(UNKNOWN_PERSONA),
        }
    }

    async fn persona_chat(&self, session: &mut Session, text: &str) -> Reply {
        let key = session.selected_persona.clone().unwrap_or_default();
        if !is_valid_persona(&self.ctx.personas, &key) {
            warn!(
                "⚠️ User {} has unknown persona '{key}', asking to choose again",
                session.user_id
            );
            session.drop_persona();
            return Reply::personas(PERSONA_UNAVAILABLE);
        }
        let persona = self.ctx.personas.get_persona(&key);
        let reply = self.ctx.generator.generate_response(session, persona, text).await;
        Reply::main(reply.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::menu::{Keyboard, ABOUT, ASK_QUESTION, BACK, CLEAR_MEMORY, RANDOM_PERSONA};
    use crate::features::cache::ResponseCache;
    use crate::features::completion::testing::ScriptedClient;
    use crate::features::completion::CompletionClient;
    use crate::features::feedback::FeedbackRecorder;
    use crate::features::generator::{GeneratorSettings, ResponseGenerator};
    use crate::features::personas::PersonaManager;
    use crate::features::sessions::{InMemorySessionStore, SessionStore};

    fn router_with(client: Arc<dyn CompletionClient>) -> Router {
        let personas = Arc::new(PersonaManager::new());
        let feedback = Arc::new(FeedbackRecorder::new());
        let generator = Arc::new(ResponseGenerator::new(
            client,
            personas.clone(),
            feedback.clone(),
            ResponseCache::new(100),
            GeneratorSettings::default(),
        ));
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Router::new(Arc::new(CommandContext::new(sessions, personas, generator, feedback)))
    }

    fn session(router: &Router, user_id: u64) -> Session {
        router.context().sessions.get(user_id).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_persona_conversation() {
        let client = Arc::new(ScriptedClient::answering(&[
            "Реализм есть правдивое изображение жизни.",
        ]));
        let router = router_with(client.clone());

        let reply = router.route(1, "/start").await;
        assert_eq!(reply.keyboard, Keyboard::Personas);
        let s = session(&router, 1);
        assert!(s.selected_persona.is_none());
        assert_eq!(s.mode, SessionMode::AwaitingPersona);

        let reply = router.route(1, "Лев Толстой").await;
        let s = session(&router, 1);
        assert_eq!(s.selected_persona.as_deref(), Some("tolstoy"));
        let tolstoy = router.context().personas.get_persona("tolstoy").unwrap();
        assert!(tolstoy.greetings.contains(&reply.text));

        let reply = router.route(1, "Что такое реализм?").await;
        assert!(!reply.text.is_empty());
        assert_eq!(session(&router, 1).history.len(), 2);
        let requests = client.requests.lock().unwrap();
        assert!(requests[0].system.contains("Лев Толстой"));
    }

    #[tokio::test]
    async fn test_unknown_persona_reprompts() {
        let router = router_with(Arc::new(ScriptedClient::failing()));
        router.route(1, "/start").await;
        router.route(1, "Гоголь").await;
        router.route(1, "📚 Выбрать писателя").await;

        let reply = router.route(1, "Шекспир").await;
        assert_eq!(reply.keyboard, Keyboard::Personas);
        assert_eq!(reply.text, UNKNOWN_PERSONA);
        let s = session(&router, 1);
        assert_eq!(s.selected_persona.as_deref(), Some("gogol"));
        assert_eq!(s.mode, SessionMode::AwaitingPersona);
    }

    #[tokio::test]
    async fn test_idle_text_asks_for_persona() {
        let client = Arc::new(ScriptedClient::failing());
        let router = router_with(client.clone());
        let reply = router.route(9, "Здравствуйте").await;
        assert_eq!(reply.keyboard, Keyboard::Personas);
        assert_eq!(client.request_count(), 0);
        assert_eq!(session(&router, 9).mode, SessionMode::AwaitingPersona);
    }

    #[tokio::test]
    async fn test_clear_memory_keeps_persona() {
        let router = router_with(Arc::new(ScriptedClient::answering(&["Ответ."])));
        router.route(1, "/start").await;
        router.route(1, "Чехов").await;
        router.route(1, "Как вы писали?").await;
        assert_eq!(session(&router, 1).history.len(), 2);

        router.route(1, CLEAR_MEMORY).await;
        let s = session(&router, 1);
        assert!(s.history.is_empty());
        assert_eq!(s.selected_persona.as_deref(), Some("chekhov"));
        assert_eq!(s.mode, SessionMode::InPersonaChat);
    }

    #[tokio::test]
    async fn test_history_bounded_over_many_turns() {
        let answers: Vec<String> = (0..40).map(|i| format!("Ответ номер {i}.")).collect();
        let refs: Vec<&str> = answers.iter().map(String::as_str).collect();
        let router = router_with(Arc::new(ScriptedClient::answering(&refs)));
        router.route(1, "/start").await;
        router.route(1, "Пушкин").await;
        for i in 0..40 {
            router.route(1, &format!("Вопрос {i}")).await;
            assert!(session(&router, 1).history.len() <= 30);
        }
    }

    #[tokio::test]
    async fn test_stale_persona_key_reprompts() {
        let client = Arc::new(ScriptedClient::failing());
        let router = router_with(client.clone());
        let mut stale = Session::new(3);
        stale.select_persona("turgenev");
        router.context().sessions.put(stale);

        let reply = router.route(3, "Как дела?").await;
        assert_eq!(reply.text, PERSONA_UNAVAILABLE);
        let s = session(&router, 3);
        assert!(s.selected_persona.is_none());
        assert_eq!(s.mode, SessionMode::AwaitingPersona);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_question_mode_uses_expert_prompt() {
        let client = Arc::new(ScriptedClient::answering(&["Ямб есть двусложный размер."]));
        let router = router_with(client.clone());
        router.route(1, ASK_QUESTION).await;
        let reply = router.route(1, "Что такое ямб?").await;
        assert_eq!(reply.text, "Ямб есть двусложный размер.");
        let requests = client.requests.lock().unwrap();
        assert!(requests[0].system.contains("эксперт по русской литературе"));
    }

    #[tokio::test]
    async fn test_generator_failure_still_replies() {
        let router = router_with(Arc::new(ScriptedClient::failing()));
        router.route(1, "/start").await;
        router.route(1, "Достоевский").await;
        let reply = router.route(1, "Что вы думаете о свободе?").await;
        assert!(!reply.text.trim().is_empty());
    }

    #[tokio::test]
    async fn test_random_persona_selects() {
        let router = router_with(Arc::new(ScriptedClient::failing()));
        router.route(1, RANDOM_PERSONA).await;
        let s = session(&router, 1);
        assert!(s.selected_persona.is_some());
        assert_eq!(s.mode, SessionMode::InPersonaChat);
    }

    #[tokio::test]
    async fn test_rating_flow() {
        let router = router_with(Arc::new(ScriptedClient::answering(&["Ответ."])));
        let reply = router.route(1, "/rate 5").await;
        assert!(reply.text.contains("нечего оценивать"));

        router.route(1, ASK_QUESTION).await;
        router.route(1, "Что такое хорей?").await;
        let reply = router.route(1, "⭐ Оценить ответ").await;
        assert_eq!(reply.keyboard, Keyboard::Rating);

        let reply = router.route(1, "/rate 9").await;
        assert!(reply.text.contains("от 1 до 5"));
        assert!(router.context().feedback.is_empty());

        let reply = router.route(1, "⭐ 4").await;
        assert!(reply.text.contains("4/5"));
        assert_eq!(router.context().feedback.len(), 1);

        let stats = router.route(1, "/stats").await;
        assert!(stats.text.contains("Оценок: 1"));
    }

    #[tokio::test]
    async fn test_start_resets_existing_session() {
        let router = router_with(Arc::new(ScriptedClient::answering(&["Ответ."])));
        router.route(1, "/start").await;
        router.route(1, "Гоголь").await;
        router.route(1, "Расскажите о Диканьке").await;

        router.route(1, "/start").await;
        let s = session(&router, 1);
        assert!(s.selected_persona.is_none());
        assert!(s.history.is_empty());
        assert_eq!(s.mode, SessionMode::AwaitingPersona);
    }

    #[tokio::test]
    async fn test_help_lists_commands() {
        let client = Arc::new(ScriptedClient::failing());
        let router = router_with(client.clone());
        let reply = router.route(1, "/help").await;
        assert_eq!(reply.keyboard, Keyboard::Main);
        for command in ["/start", "/clear", "/about", "/rate", "/stats"] {
            assert!(reply.text.contains(command), "help is missing {command}");
        }
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_about_shows_writers_uptime_and_sessions() {
        let router = router_with(Arc::new(ScriptedClient::failing()));
        router.route(1, "/start").await;
        router.route(2, "/start").await;

        let reply = router.route(3, "/about").await;
        assert_eq!(reply.keyboard, Keyboard::Main);
        assert!(reply.text.contains(env!("CARGO_PKG_VERSION")));
        assert!(reply.text.contains("Лев Толстой (1828–1910)"));
        assert!(reply.text.contains("Николай Гоголь (1809–1852)"));
        assert!(reply.text.contains("0ч 0м"));
        assert!(reply.text.contains("Активных собеседников: 2."));

        let button = router.route(3, ABOUT).await;
        assert!(button.text.contains("Активных собеседников: 3."));
    }

    #[tokio::test]
    async fn test_back_returns_to_selected_persona() {
        let router = router_with(Arc::new(ScriptedClient::answering(&["Ответ."])));
        router.route(1, "/start").await;
        router.route(1, "Чехов").await;
        router.route(1, ASK_QUESTION).await;
        assert_eq!(session(&router, 1).mode, SessionMode::AwaitingQuestion);

        let reply = router.route(1, BACK).await;
        assert_eq!(reply.keyboard, Keyboard::Main);
        let s = session(&router, 1);
        assert_eq!(s.mode, SessionMode::InPersonaChat);
        assert_eq!(s.selected_persona.as_deref(), Some("chekhov"));
    }

    #[tokio::test]
    async fn test_back_without_persona_goes_idle() {
        let client = Arc::new(ScriptedClient::failing());
        let router = router_with(client.clone());
        router.route(1, "/start").await;
        assert_eq!(session(&router, 1).mode, SessionMode::AwaitingPersona);

        router.route(1, BACK).await;
        let s = session(&router, 1);
        assert_eq!(s.mode, SessionMode::Idle);
        assert!(s.selected_persona.is_none());

        let reply = router.route(1, "Здравствуйте").await;
        assert_eq!(reply.keyboard, Keyboard::Personas);
        assert_eq!(client.request_count(), 0);
    }
}

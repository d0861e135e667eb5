//! Persona command handlers
//!
//! Handles: /start, persona menu, random persona, back
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Writer selection flow for the Telegram keyboard
//! - 1.0.0: Extracted from the message loop

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, Invocation};
use crate::commands::menu::{Reply, BACK, CHOOSE_PERSONA, RANDOM_PERSONA};
use crate::features::sessions::{Session, SessionMode};

pub const WELCOME: &str = "Добро пожаловать! Здесь оживают классики русской литературы.\n\n\
Выберите писателя, с которым хотите побеседовать:";
pub const CHOOSE_PROMPT: &str = "Выберите писателя из списка:";

pub struct PersonaHandler;

#[async_trait]
impl CommandHandler for PersonaHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["/start", CHOOSE_PERSONA, RANDOM_PERSONA, BACK]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        session: &mut Session,
        invocation: &Invocation,
    ) -> Result<Reply> {
        match invocation.name.as_str() {
            "/start" => Ok(self.handle_start(&ctx, session)),
            CHOOSE_PERSONA => Ok(self.handle_menu(session)),
            RANDOM_PERSONA => Ok(self.handle_random(&ctx, session)),
            BACK => Ok(self.handle_back(session)),
            _ => Ok(Reply::main(CHOOSE_PROMPT)),
        }
    }
}

impl PersonaHandler {
    /// Fresh session waiting for a persona choice
    fn handle_start(&self, ctx: &CommandContext, session: &mut Session) -> Reply {
        let user_id = session.user_id;
        ctx.sessions.clear(user_id);
        *session = Session::new(user_id);
        session.mode = SessionMode::AwaitingPersona;
        info!("👋 /start from user {user_id}");
        Reply::personas(WELCOME)
    }

    fn handle_menu(&self, session: &mut Session) -> Reply {
        session.mode = SessionMode::AwaitingPersona;
        Reply::personas(CHOOSE_PROMPT)
    }

    fn handle_random(&self, ctx: &CommandContext, session: &mut Session) -> Reply {
        match ctx.personas.random_persona() {
            Some(persona) => {
                session.select_persona(&persona.key);
                info!("🎲 User {} got random persona {}", session.user_id, persona.key);
                Reply::main(format!(
                    "{}\n\n{}",
                    persona.button_label(),
                    persona.random_greeting()
                ))
            }
            None => Reply::main("Список писателей пуст."),
        }
    }

    fn handle_back(&self, session: &mut Session) -> Reply {
        session.mode = if session.selected_persona.is_some() {
            SessionMode::InPersonaChat
        } else {
            SessionMode::Idle
        };
        Reply::main("Главное меню.")
    }
}

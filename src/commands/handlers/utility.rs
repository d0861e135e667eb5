//! Utility command handlers
//!
//! Handles: /help, /about
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Help and about texts for the writers bot
//! - 1.0.0: Extracted from the message loop

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, Invocation};
use crate::commands::menu::{Reply, ABOUT};
use crate::features::sessions::Session;

const HELP_TEXT: &str = "Что я умею:\n\n\
📚 Выбрать писателя: побеседовать с Пушкиным, Достоевским, Толстым, Чеховым или Гоголем\n\
🎲 Случайный писатель: положиться на случай\n\
❓ Задать вопрос: ответит литературовед, без роли\n\
🧹 Очистить память: забыть историю разговора\n\
⭐ Оценить ответ: помочь мне отвечать лучше\n\n\
Команды: /start, /help, /clear, /about, /rate 1-5, /stats";

/// Handler for utility commands: help, about
pub struct UtilityHandler;

#[async_trait]
impl CommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["/help", "/about", ABOUT]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _session: &mut Session,
        invocation: &Invocation,
    ) -> Result<Reply> {
        match invocation.name.as_str() {
            "/help" => Ok(Reply::main(HELP_TEXT)),
            _ => Ok(self.handle_about(&ctx)),
        }
    }
}

impl UtilityHandler {
    fn handle_about(&self, ctx: &CommandContext) -> Reply {
        let writers = ctx
            .personas
            .list_personas()
            .iter()
            .map(|p| format!("{} ({})", p.button_label(), p.lifespan()))
            .collect::<Vec<_>>()
            .join("\n");
        let uptime = ctx.start_time.elapsed().as_secs();

        Reply::main(format!(
            "Бот «Русские писатели» v{}\n\n\
             Беседуйте с классиками: каждый отвечает в своём стиле и помнит разговор.\n\n\
             Писатели:\n{writers}\n\n\
             Работаю без перерыва {}ч {}м. Активных собеседников: {}.",
            env!("CARGO_PKG_VERSION"),
            uptime / 3600,
            (uptime % 3600) / 60,
            ctx.sessions.len()
        ))
    }
}

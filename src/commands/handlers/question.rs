//! Question mode handler
//!
//! Handles: ask-a-question button
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Expert answers without a persona

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, Invocation};
use crate::commands::menu::{Reply, ASK_QUESTION};
use crate::features::sessions::{Session, SessionMode};

pub struct QuestionHandler;

#[async_trait]
impl CommandHandler for QuestionHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &[ASK_QUESTION]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        session: &mut Session,
        _invocation: &Invocation,
    ) -> Result<Reply> {
        session.mode = SessionMode::AwaitingQuestion;
        Ok(Reply::main(
            "Задайте вопрос о русской литературе, и на него ответит литературовед.\n\
             Чтобы снова говорить с писателем, выберите его через «📚 Выбрать писателя».",
        ))
    }
}

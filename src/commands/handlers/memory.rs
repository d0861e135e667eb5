//! Memory command handler
//!
//! Handles: /clear
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Clear conversation history, keep the persona

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, Invocation};
use crate::commands::menu::{Reply, CLEAR_MEMORY};
use crate::features::sessions::Session;

pub struct MemoryHandler;

#[async_trait]
impl CommandHandler for MemoryHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["/clear", CLEAR_MEMORY]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        session: &mut Session,
        _invocation: &Invocation,
    ) -> Result<Reply> {
        let forgotten = session.history.len();
        session.clear_memory();
        info!("🧹 User {} cleared {forgotten} turn(s)", session.user_id);

        let who = session
            .selected_persona
            .as_deref()
            .and_then(|key| ctx.personas.get_persona(key))
            .map(|p| format!(" {} по-прежнему с вами.", p.display_name))
            .unwrap_or_default();
        Ok(Reply::main(format!("🧹 Память очищена.{who}")))
    }
}

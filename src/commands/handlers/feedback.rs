//! Feedback command handlers
//!
//! Handles: /rate, rating buttons, /stats
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: /stats with per-category averages
//! - 1.0.0: Rate the last answer

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandHandler, Invocation};
use crate::commands::menu::{Keyboard, Reply, RATE_ANSWER};
use crate::features::sessions::Session;

const NOTHING_TO_RATE: &str = "Пока нечего оценивать: сначала задайте вопрос.";

pub struct FeedbackHandler;

#[async_trait]
impl CommandHandler for FeedbackHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["/rate", "/stats", RATE_ANSWER, "⭐ 1", "⭐ 2", "⭐ 3", "⭐ 4", "⭐ 5"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        session: &mut Session,
        invocation: &Invocation,
    ) -> Result<Reply> {
        match invocation.name.as_str() {
            "/stats" => Ok(self.handle_stats(&ctx)),
            RATE_ANSWER => Ok(self.handle_rate_menu(session)),
            _ => Ok(self.handle_rate(&ctx, session, invocation)),
        }
    }
}

/// Rating from `/rate N` arguments or a `⭐ N` label
fn parse_rating(invocation: &Invocation) -> Option<u8> {
    let source = if invocation.name == "/rate" {
        invocation.args.split_whitespace().next()?
    } else {
        invocation.name.split_whitespace().last()?
    };
    source.parse().ok()
}

impl FeedbackHandler {
    fn handle_rate_menu(&self, session: &Session) -> Reply {
        if session.last_exchange.is_none() {
            return Reply::main(NOTHING_TO_RATE);
        }
        Reply::new("Как вам последний ответ?", Keyboard::Rating)
    }

    fn handle_rate(&self, ctx: &CommandContext, session: &mut Session, invocation: &Invocation) -> Reply {
        let Some(rating) = parse_rating(invocation) else {
            return Reply::main("Укажите оценку числом: /rate 1-5");
        };
        let Some(exchange) = session.last_exchange.clone() else {
            return Reply::main(NOTHING_TO_RATE);
        };

        match ctx
            .feedback
            .record(session.user_id, &exchange.question, &exchange.answer, rating)
        {
            Ok(entry) => {
                info!(
                    "⭐ User {} rated {}/5 ({})",
                    session.user_id,
                    rating,
                    entry.category.as_str()
                );
                if let Err(e) = ctx.feedback.persist() {
                    warn!("⚠️ Could not save feedback: {e:#}");
                }
                session.last_exchange = None;
                Reply::main(format!("Спасибо за оценку {rating}/5!"))
            }
            Err(e) => {
                warn!("Rejected rating from {}: {e}", session.user_id);
                Reply::main("Оценка должна быть от 1 до 5.")
            }
        }
    }

    fn handle_stats(&self, ctx: &CommandContext) -> Reply {
        let metrics = ctx.feedback.metrics();
        if metrics.total == 0 {
            return Reply::main("Оценок пока нет.");
        }

        let mut text = format!(
            "📊 Оценок: {}\nСредняя оценка: {:.2}\nХороших (4-5): {}\nПлохих (1-2): {}",
            metrics.total, metrics.average_rating, metrics.positive, metrics.negative
        );
        for stats in &metrics.per_category {
            text.push_str(&format!(
                "\n• {}: {} шт., в среднем {:.1}",
                stats.category.label(),
                stats.count,
                stats.average_rating
            ));
        }
        Reply::main(text)
    }
}

use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, KeyboardButton, KeyboardMarkup};

use writers_bot::commands::{CommandContext, Router};
use writers_bot::core::{chunk_for_message, Config};
use writers_bot::features::enrichment::Enricher;
use writers_bot::features::{
    CompletionClient, FeedbackRecorder, GeneratorSettings, InMemorySessionStore, OpenRouterClient,
    PersonaManager, ResponseCache, ResponseGenerator, SessionStore,
};

fn keyboard_markup(rows: Vec<Vec<String>>) -> KeyboardMarkup {
    KeyboardMarkup::new(
        rows.into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>()),
    )
    .resize_keyboard()
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    router: Arc<Router>,
    personas: Arc<PersonaManager>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        debug!("Ignoring non-text message in chat {}", msg.chat.id);
        return Ok(());
    };
    let user_id = msg
        .from
        .as_ref()
        .map(|u| u.id.0)
        .unwrap_or(msg.chat.id.0.unsigned_abs());

    if let Err(e) = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await {
        warn!("⚠️ Could not send typing action: {e}");
    }

    let reply = router.route(user_id, text).await;
    let markup = keyboard_markup(reply.keyboard.rows(&personas));

    for chunk in chunk_for_message(&reply.text) {
        if chunk.trim().is_empty() {
            continue;
        }
        bot.send_message(msg.chat.id, chunk)
            .reply_markup(markup.clone())
            .await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env();
    let log_level = config.as_ref().map_or("info", |c| c.log_level.as_str());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration error: {e:#}");
            return Err(e);
        }
    };
    if !config.has_api_key() {
        warn!("⚠️ OPENROUTER_API_KEY is not set - answers will come from local fallbacks only");
    }

    info!("Starting Russian Writers Telegram Bot...");

    let personas = Arc::new(PersonaManager::load_from_dir(&config.writers_dir));
    info!("📚 {} writer persona(s) available", personas.len());

    let feedback = Arc::new(FeedbackRecorder::open(&config.training_data_path));

    let client: Arc<dyn CompletionClient> = Arc::new(OpenRouterClient::from_config(&config));
    if config.has_api_key() {
        info!("🤖 Completion models: {}", config.models.join(", "));
    }

    let mut generator = ResponseGenerator::new(
        client,
        personas.clone(),
        feedback.clone(),
        ResponseCache::new(config.response_cache_capacity),
        GeneratorSettings::from_config(&config),
    );
    if config.enrichment_enabled {
        info!("🔎 Enrichment enabled (Wikipedia: {})", config.wikipedia_lang);
        generator = generator.with_enricher(Enricher::from_config(&config));
    }

    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let ctx = Arc::new(CommandContext::new(
        sessions,
        personas.clone(),
        Arc::new(generator),
        feedback,
    ));
    let router = Arc::new(Router::new(ctx));

    let bot = Bot::new(&config.telegram_bot_token);
    info!("✅ Bot is running");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let router = router.clone();
        let personas = personas.clone();
        async move { handle_message(bot, msg, router, personas).await }
    })
    .await;

    Ok(())
}

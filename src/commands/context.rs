//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Session store, generator and feedback recorder for the Telegram bot
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;
use std::time::Instant;

use crate::features::feedback::FeedbackRecorder;
use crate::features::generator::ResponseGenerator;
use crate::features::personas::PersonaManager;
use crate::features::sessions::SessionStore;

/// Services every handler may need
#[derive(Clone)]
pub struct CommandContext {
    pub sessions: Arc<dyn SessionStore>,
    pub personas: Arc<PersonaManager>,
    pub generator: Arc<ResponseGenerator>,
    pub feedback: Arc<FeedbackRecorder>,
    pub start_time: Instant,
}

impl CommandContext {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        personas: Arc<PersonaManager>,
        generator: Arc<ResponseGenerator>,
        feedback: Arc<FeedbackRecorder>,
    ) -> Self {
        Self {
            sessions,
            personas,
            generator,
            feedback,
            start_time: Instant::now(),
        }
    }
}

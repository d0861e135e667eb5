//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 3.0.0: Telegram menu handlers (persona, utility, memory, question, feedback)
//! - 1.0.0: Initial extraction from the message loop

pub mod feedback;
pub mod memory;
pub mod persona;
pub mod question;
pub mod utility;

use std::sync::Arc;

use super::handler::CommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(persona::PersonaHandler),
        Arc::new(utility::UtilityHandler),
        Arc::new(memory::MemoryHandler),
        Arc::new(question::QuestionHandler),
        Arc::new(feedback::FeedbackHandler),
    ]
}

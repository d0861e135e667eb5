//! # Command System
//!
//! Telegram text routing: slash commands, reply-keyboard buttons and free text.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Session-aware router with reply keyboards
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod handler;
pub mod handlers;
pub mod menu;
pub mod registry;
pub mod router;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::{CommandHandler, Invocation};
pub use menu::{Keyboard, Reply};
pub use registry::CommandRegistry;
pub use router::Router;

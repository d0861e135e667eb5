//! Command handler trait
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Handlers mutate the caller's session and return a reply
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;
use super::menu::Reply;
use crate::features::sessions::Session;

/// A recognised command or menu button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Registered name: `/start` or a button label
    pub name: String,
    /// Text after a slash command, empty for buttons
    pub args: String,
}

/// Trait for command handlers
///
/// Each handler answers one or more command names (slash commands and button
/// labels). The router loads the session, calls the handler and stores the
/// session afterwards.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl CommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["/ping"]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         session: &mut Session,
///         invocation: &Invocation,
///     ) -> Result<Reply> {
///         Ok(Reply::main("pong"))
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        session: &mut Session,
        invocation: &Invocation,
    ) -> Result<Reply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn CommandHandler) {}
}

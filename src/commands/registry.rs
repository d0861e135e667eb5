//! Command handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Resolve raw message text (slash commands, button labels)
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::{CommandHandler, Invocation};

/// Registry mapping command names to handlers
///
/// The registry allows handlers to be registered and looked up by command name.
/// Multiple command names can map to the same handler if they share logic.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(PingHandler));
///
/// if let Some((handler, invocation)) = registry.resolve("/ping") {
///     let reply = handler.handle(ctx, &mut session, &invocation).await?;
/// }
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for its declared command names
    ///
    /// The handler is registered for all names returned by `command_names()`.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Get handler for a command name
    ///
    /// Returns None if no handler is registered for the given name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names
    ///
    /// Note: This counts command names, not unique handlers.
    /// A handler registered for multiple names will be counted multiple times.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Get all registered command names
    pub fn command_names(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }

    /// Match raw message text against registered commands.
    ///
    /// Slash commands match case-insensitively and may carry a `@botname` suffix
    /// and arguments; button labels must match exactly (surrounding whitespace ignored).
    pub fn resolve(&self, text: &str) -> Option<(Arc<dyn CommandHandler>, Invocation)> {
        let text = text.trim();
        let (name, args) = if text.starts_with('/') {
            let (command, args) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
            let command = command.split('@').next().unwrap_or(command).to_lowercase();
            (command, args.trim().to_string())
        } else {
            (text.to_string(), String::new())
        };
        let handler = self.get(&name)?;
        Some((handler, Invocation { name, args }))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Application layer
pub mod commands;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items
pub use features::{
    // Generation
    GeneratedReply, GeneratorSettings, ResponseGenerator, ResponseSource,
    // Completion
    CompletionClient, CompletionError, OpenRouterClient,
    // Enrichment
    Enricher, LookupSource,
    // Cache and feedback
    FeedbackRecorder, ResponseCache,
    // Personas
    Persona, PersonaManager,
    // Sessions
    InMemorySessionStore, Session, SessionMode, SessionStore,
};

pub use commands::{CommandContext, Reply, Router};

//! # Features Layer
//!
//! Domain features of the writers bot. Each submodule is self-contained and
//! reachable from the command router or the response generator.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Writers bot features (sessions, generator, enrichment, cache, feedback)
//! - 1.0.0: Initial feature modules

pub mod cache;
pub mod completion;
pub mod enrichment;
pub mod feedback;
pub mod generator;
pub mod personas;
pub mod questions;
pub mod sessions;

pub use cache::ResponseCache;
pub use completion::{CompletionClient, CompletionError, OpenRouterClient};
pub use enrichment::{Enricher, LookupSource};
pub use feedback::FeedbackRecorder;
pub use generator::{GeneratedReply, GeneratorSettings, ResponseGenerator, ResponseSource};
pub use personas::{Persona, PersonaManager};
pub use sessions::{InMemorySessionStore, Session, SessionMode, SessionStore};

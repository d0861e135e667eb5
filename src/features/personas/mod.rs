//! # Personas Feature
//!
//! Classic Russian writers the bot can speak as.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Writer catalogue with JSON overrides and fuzzy selection
//! - 1.0.0: Initial release

pub mod catalogue;
pub mod choices;
pub mod manager;
pub mod prompt_builder;

pub use choices::{is_valid_persona, persona_button_rows};
pub use manager::{normalize_name, Persona, PersonaManager};
pub use prompt_builder::PromptBuilder;

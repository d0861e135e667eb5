//! # Core Module
//!
//! Configuration and Telegram message utilities shared by every feature.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add response module with message chunking utilities
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod response;

pub use config::Config;
pub use response::{chunk_for_message, chunk_text, truncate_chars, utf16_len, MESSAGE_LIMIT};

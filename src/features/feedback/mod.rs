//! # Feature: Feedback Recorder
//!
//! Stores user ratings of bot answers, summarises what well-rated answers look
//! like per question category and reshapes new answers accordingly.
//! Persisted as one JSON document (`training_data.json`).
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.2.0: optimize_response applies learned format hints
//! - 1.1.0: learn_patterns / predict_format
//! - 1.0.0: Rating bookkeeping with JSON persistence

pub mod optimizer;
pub mod recorder;

pub use optimizer::{has_formatting, FormatHint, ResponseStyle};
pub use recorder::{CategoryPattern, CategoryStats, FeedbackEntry, FeedbackMetrics, FeedbackRecorder};

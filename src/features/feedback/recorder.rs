//! Rating bookkeeping and pattern learning
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.2.0: Per-category patterns from well-rated answers
//! - 1.1.0: Whole-file JSON persistence
//! - 1.0.0: In-memory rating log

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::optimizer::{has_formatting, FormatHint, ResponseStyle};
use crate::features::questions::QuestionCategory;

/// Ratings at or above this count as "good" for pattern learning
pub const GOOD_RATING: u8 = 4;
/// Well-rated samples needed before a learned pattern replaces the defaults
pub const MIN_SAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub timestamp: DateTime<Utc>,
    pub user_id: u64,
    pub question: String,
    pub response: String,
    pub rating: u8,
    pub category: QuestionCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: QuestionCategory,
    pub count: usize,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackMetrics {
    pub total: usize,
    pub average_rating: f64,
    pub positive: usize,
    pub negative: usize,
    pub per_category: Vec<CategoryStats>,
}

/// What well-rated answers in one category have in common
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPattern {
    pub category: QuestionCategory,
    pub count: usize,
    pub average_rating: f64,
    pub average_length: usize,
    /// Share of answers that used lists or emphasis (0.0..=1.0)
    pub formatting_ratio: f64,
    pub style: ResponseStyle,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TrainingData {
    interactions: Vec<FeedbackEntry>,
}

#[derive(Debug, Default)]
pub struct FeedbackRecorder {
    entries: Mutex<Vec<FeedbackEntry>>,
    path: Option<PathBuf>,
}

impl FeedbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder bound to a file, starting from its contents when present.
    ///
    /// A missing file starts empty; a malformed one is logged and ignored.
    pub fn open(path: &Path) -> Self {
        let entries = if path.exists() {
            match Self::read_entries(path) {
                Ok(entries) => {
                    info!("📝 Loaded {} feedback entries from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    warn!("⚠️ Ignoring unreadable feedback log {}: {e:#}", path.display());
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        FeedbackRecorder {
            entries: Mutex::new(entries),
            path: Some(path.to_path_buf()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(FeedbackRecorder {
            entries: Mutex::new(Self::read_entries(path)?),
            path: None,
        })
    }

    fn read_entries(path: &Path) -> Result<Vec<FeedbackEntry>> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let data: TrainingData = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(data.interactions)
    }

    fn entries(&self) -> MutexGuard<'_, Vec<FeedbackEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(
        &self,
        user_id: u64,
        question: &str,
        response: &str,
        rating: u8,
    ) -> Result<FeedbackEntry> {
        if !(1..=5).contains(&rating) {
            bail!("rating must be between 1 and 5, got {rating}");
        }
        let entry = FeedbackEntry {
            timestamp: Utc::now(),
            user_id,
            question: question.to_string(),
            response: response.to_string(),
            rating,
            category: QuestionCategory::classify(question),
        };
        debug!(
            "Feedback from {user_id}: {rating}/5 ({})",
            entry.category.as_str()
        );
        self.entries().push(entry.clone());
        Ok(entry)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = TrainingData {
            interactions: self.entries().clone(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Save to the bound file, if any
    pub fn persist(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.save(path),
            None => Ok(()),
        }
    }

    pub fn metrics(&self) -> FeedbackMetrics {
        let entries = self.entries();
        let total = entries.len();
        let average_rating = average(entries.iter().map(|e| e.rating as f64));

        let per_category = QuestionCategory::ALL
            .iter()
            .filter_map(|category| {
                let ratings: Vec<f64> = entries
                    .iter()
                    .filter(|e| e.category == *category)
                    .map(|e| e.rating as f64)
                    .collect();
                (!ratings.is_empty()).then(|| CategoryStats {
                    category: *category,
                    count: ratings.len(),
                    average_rating: average(ratings.into_iter()),
                })
            })
            .collect();

        FeedbackMetrics {
            total,
            average_rating,
            positive: entries.iter().filter(|e| e.rating >= GOOD_RATING).count(),
            negative: entries.iter().filter(|e| e.rating <= 2).count(),
            per_category,
        }
    }

    /// Summarise well-rated answers per category
    pub fn learn_patterns(&self) -> HashMap<QuestionCategory, CategoryPattern> {
        let entries = self.entries();
        let mut grouped: HashMap<QuestionCategory, Vec<&FeedbackEntry>> = HashMap::new();
        for entry in entries.iter().filter(|e| e.rating >= GOOD_RATING) {
            grouped.entry(entry.category).or_default().push(entry);
        }

        grouped
            .into_iter()
            .map(|(category, group)| {
                let count = group.len();
                let formatted = group.iter().filter(|e| has_formatting(&e.response)).count();

                let mut style_votes: HashMap<ResponseStyle, usize> = HashMap::new();
                for entry in &group {
                    *style_votes.entry(infer_style(&entry.response)).or_default() += 1;
                }
                let style = style_votes
                    .into_iter()
                    .max_by_key(|(style, votes)| (*votes, style_rank(*style)))
                    .map(|(style, _)| style)
                    .unwrap_or(FormatHint::for_category(category).style);

                let pattern = CategoryPattern {
                    category,
                    count,
                    average_rating: average(group.iter().map(|e| e.rating as f64)),
                    average_length: group
                        .iter()
                        .map(|e| e.response.chars().count())
                        .sum::<usize>()
                        / count,
                    formatting_ratio: formatted as f64 / count as f64,
                    style,
                };
                (category, pattern)
            })
            .collect()
    }

    /// Format hint for a new question: learned when enough samples exist, else the category default
    pub fn predict_format(&self, question: &str) -> FormatHint {
        let category = QuestionCategory::classify(question);
        match self.learn_patterns().remove(&category) {
            Some(pattern) if pattern.count >= MIN_SAMPLES => FormatHint {
                recommended_length: pattern.average_length.clamp(200, 3000),
                use_formatting: pattern.formatting_ratio >= 0.5,
                style: pattern.style,
            },
            _ => FormatHint::for_category(category),
        }
    }

    pub fn optimize_response(&self, response: &str, question: &str) -> String {
        self.predict_format(question).apply(response)
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn infer_style(response: &str) -> ResponseStyle {
    let length = response.chars().count();
    if has_formatting(response) {
        ResponseStyle::Structured
    } else if response.contains('«') && length < 600 {
        ResponseStyle::Quotational
    } else if length < 500 {
        ResponseStyle::Concise
    } else {
        ResponseStyle::Detailed
    }
}

/// Tie-break so learning is deterministic
fn style_rank(style: ResponseStyle) -> u8 {
    match style {
        ResponseStyle::Structured => 3,
        ResponseStyle::Detailed => 2,
        ResponseStyle::Quotational => 1,
        ResponseStyle::Concise => 0,
    }
}

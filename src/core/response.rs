//! Response chunking and Telegram message utilities
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.2.0: Chunk limits measured in UTF-16 code units, as Telegram counts them
//! - 1.1.0: Limits counted in characters instead of bytes
//! - 1.0.0: Extracted from the transport loop

/// Telegram message text limit, in UTF-16 code units
pub const MESSAGE_LIMIT: usize = 4096;

/// Length of `text` the way Telegram measures it
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Chunk text into pieces of at most `max_units` UTF-16 code units (line-aware)
///
/// This function splits text respecting:
/// - Character boundaries (never splits mid-character, so emoji stay whole)
/// - Line boundaries when possible (prefers splitting at newlines)
/// - Falls back to character splitting for very long lines
pub fn chunk_text(text: &str, max_units: usize) -> Vec<String> {
    if utf16_len(text) <= max_units {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.lines() {
        let line_len = utf16_len(line) + 1;
        if current_len + line_len > max_units {
            if !current.is_empty() {
                chunks.push(current.trim_end().to_string());
                current = String::new();
                current_len = 0;
            }
            if line_len > max_units {
                chunks.extend(chunk_long_line(line, max_units));
                continue;
            }
        }
        current.push_str(line);
        current.push('\n');
        current_len += line_len;
    }
    if !current.trim().is_empty() {
        chunks.push(current.trim_end().to_string());
    }
    chunks
}

/// Split a single long line into chunks of at most `max_units` UTF-16 units
fn chunk_long_line(line: &str, max_units: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for ch in line.chars() {
        let width = ch.len_utf16();
        if current_len + width > max_units && !current.is_empty() {
            result.push(current);
            current = String::new();
            current_len = 0;
        }
        current.push(ch);
        current_len += width;
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

/// Chunk text for Telegram message content
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

/// Truncate text to `max_chars` characters, adding ellipsis if needed
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

//! Conversation-context usage derived from the transcript file.
//!
//! The transcript is JSONL; the most recent entry carrying token usage
//! describes the current context size. A missing or unreadable transcript
//! renders as zero usage rather than an error.

use std::path::Path;

use serde::Deserialize;

use crate::config::schema::ContextConfig;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContextData {
    pub tokens: u64,
    pub percentage: u32,
}

#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    message: Option<TranscriptMessage>,
}

#[derive(Debug, Deserialize)]
struct TranscriptMessage {
    usage: Option<TokenUsage>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
struct TokenUsage {
    input_tokens: u64,
    cache_creation_input_tokens: u64,
    cache_read_input_tokens: u64,
}

impl TokenUsage {
    /// Input-side context occupancy: prompt plus everything served from or
    /// written to the prompt cache.
    fn context_tokens(self) -> u64 {
        self.input_tokens + self.cache_creation_input_tokens + self.cache_read_input_tokens
    }
}

/// Compute current token usage and percentage for the transcript at
/// `transcript_path` under the given context budget.
pub fn context_data(transcript_path: &str, config: &ContextConfig) -> ContextData {
    let tokens = latest_usage(Path::new(transcript_path))
        .map(TokenUsage::context_tokens)
        .unwrap_or(0)
        + config.overhead_tokens;

    ContextData {
        tokens,
        percentage: percentage_of_budget(tokens, config),
    }
}

/// Percentage of the configured budget, rounded to the nearest integer.
/// Not clamped; the renderers tolerate overshoot.
fn percentage_of_budget(tokens: u64, config: &ContextConfig) -> u32 {
    let budget = if config.use_usable_context_only {
        config
            .max_context_tokens
            .saturating_sub(config.autocompact_buffer_tokens)
    } else {
        config.max_context_tokens
    };
    if budget == 0 {
        return 0;
    }
    ((tokens as f64 / budget as f64) * 100.0).round() as u32
}

/// The usage block of the most recent transcript entry that has one.
/// Unparseable lines are skipped, not fatal.
fn latest_usage(path: &Path) -> Option<TokenUsage> {
    let contents = std::fs::read_to_string(path).ok()?;
    contents.lines().rev().find_map(|line| {
        serde_json::from_str::<TranscriptEntry>(line)
            .ok()
            .and_then(|entry| entry.message)
            .and_then(|message| message.usage)
    })
}

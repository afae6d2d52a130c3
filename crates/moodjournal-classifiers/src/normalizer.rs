//! Text normalization and degenerate-input detection
//!
//! Runs before any idiom matching or model call. Empty, numeric-only and
//! single-token gibberish input short-circuits to `(Unknown, Unknown)`.

use crate::emoji;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default minimum letter count for a lone alphabetic token to be treated as noise
pub const DEFAULT_GIBBERISH_MIN_LETTERS: usize = 5;

/// Why an input was short-circuited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReason {
    /// Missing, empty or whitespace-only input
    Empty,
    /// Only digit characters once whitespace is removed
    Numeric,
    /// A single long alphabetic token with no emoji
    Gibberish,
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::Numeric => "numeric",
            Self::Gibberish => "gibberish",
        };
        f.write_str(s)
    }
}

/// Outcome of normalizing raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalized<'a> {
    /// Input resolves to `(Unknown, Unknown)` without touching the model
    Degenerate(DegenerateReason),
    /// Trimmed text ready for classification
    Text(&'a str),
}

/// Normalizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default = "default_gibberish_min_letters")]
    pub gibberish_min_letters: usize,
}

fn default_gibberish_min_letters() -> usize {
    DEFAULT_GIBBERISH_MIN_LETTERS
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            gibberish_min_letters: DEFAULT_GIBBERISH_MIN_LETTERS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn normalize<'a>(&self, raw: Option<&'a str>) -> Normalized<'a> {
        let trimmed = raw.unwrap_or("").trim();

        if trimmed.is_empty() {
            return Normalized::Degenerate(DegenerateReason::Empty);
        }

        if trimmed
            .chars()
            .filter(|c| !c.is_whitespace())
            .all(|c| c.is_ascii_digit())
        {
            return Normalized::Degenerate(DegenerateReason::Numeric);
        }

        if self.is_gibberish(trimmed) {
            return Normalized::Degenerate(DegenerateReason::Gibberish);
        }

        Normalized::Text(trimmed)
    }

    fn is_gibberish(&self, text: &str) -> bool {
        let mut tokens = text.split_whitespace();
        let (Some(token), None) = (tokens.next(), tokens.next()) else {
            return false;
        };

        token.chars().all(char::is_alphabetic)
            && token.chars().count() >= self.config.gibberish_min_letters
            && !emoji::contains_emoji(text)
    }
}

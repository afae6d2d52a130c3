//! Deterministic override layers
//!
//! `IdiomOverrides` runs before the model and replaces it entirely when a
//! known phrase matches. `SignalOverrides` runs after the model and adjusts
//! its output for emoji-only and flat, very short entries.

use crate::emoji;
use aho_corasick::{AhoCorasick, MatchKind};
use moodjournal_core::{ClassificationResult, EnergyLabel, Error, MoodLabel, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fixed phrase to tags mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdiomRule {
    pub phrase: String,
    pub mood: MoodLabel,
    pub energy: EnergyLabel,
}

impl IdiomRule {
    pub fn new(phrase: impl Into<String>, mood: MoodLabel, energy: EnergyLabel) -> Self {
        Self {
            phrase: phrase.into(),
            mood,
            energy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdiomConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_idioms")]
    pub phrases: Vec<IdiomRule>,
}

fn default_true() -> bool {
    true
}

fn default_idioms() -> Vec<IdiomRule> {
    vec![
        IdiomRule::new("crushing it", MoodLabel::Positive, EnergyLabel::HighEnergy),
        IdiomRule::new("killing it", MoodLabel::Positive, EnergyLabel::HighEnergy),
        IdiomRule::new("crushing me", MoodLabel::Negative, EnergyLabel::HighStress),
        IdiomRule::new("killing me", MoodLabel::Negative, EnergyLabel::HighStress),
    ]
}

impl Default for IdiomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            phrases: default_idioms(),
        }
    }
}

/// A matched idiom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdiomMatch {
    pub phrase: String,
    pub result: ClassificationResult,
}

/// Pre-model phrase overrides
pub struct IdiomOverrides {
    matcher: Option<AhoCorasick>,
    rules: Vec<IdiomRule>,
}

impl IdiomOverrides {
    pub fn new(config: &IdiomConfig) -> Result<Self> {
        let rules: Vec<IdiomRule> = if config.enabled {
            config
                .phrases
                .iter()
                .filter(|rule| !rule.phrase.trim().is_empty())
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        if rules.is_empty() {
            return Ok(Self {
                matcher: None,
                rules,
            });
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(rules.iter().map(|rule| rule.phrase.trim()))
            .map_err(|e| Error::config(format!("Failed to build idiom matcher: {}", e)))?;

        Ok(Self {
            matcher: Some(matcher),
            rules,
        })
    }

    /// A layer that never matches
    pub fn disabled() -> Self {
        Self {
            matcher: None,
            rules: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.matcher.is_some()
    }

    /// Leftmost-longest idiom in `text`, if any
    pub fn lookup(&self, text: &str) -> Option<IdiomMatch> {
        let found = self.matcher.as_ref()?.find(text)?;
        let rule = &self.rules[found.pattern().as_usize()];

        Some(IdiomMatch {
            phrase: rule.phrase.clone(),
            result: ClassificationResult::new(rule.mood, rule.energy),
        })
    }
}

/// Post-model adjustment that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    /// Emoji-only text with a negative emoji forced a Negative mood
    EmojiNegativeMood,
    /// Emoji-only text with a positive emoji forced a Positive mood
    EmojiPositiveMood,
    /// Emoji-only text with a negative emoji forced High Stress
    EmojiStress,
    /// Very short, neutral text forced Low Energy
    FlatShort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default = "default_negative_emoji")]
    pub negative_emoji: Vec<String>,

    #[serde(default = "default_positive_emoji")]
    pub positive_emoji: Vec<String>,

    #[serde(default = "default_flat_max_tokens")]
    pub flat_max_tokens: usize,
}

fn default_negative_emoji() -> Vec<String> {
    ["😭", "😢", "😔", "😩", "😫", "😡", "💀", "🥲", "😞", "😠", "😰", "😱", "💔"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_positive_emoji() -> Vec<String> {
    ["😀", "😃", "😄", "😁", "😊", "🙂", "😍", "🥰", "😎", "🤩", "🎉", "❤", "👍", "✨", "🥳"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_flat_max_tokens() -> usize {
    2
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            negative_emoji: default_negative_emoji(),
            positive_emoji: default_positive_emoji(),
            flat_max_tokens: default_flat_max_tokens(),
        }
    }
}

/// Emoji and flat-short adjustments applied after classification
#[derive(Debug, Clone)]
pub struct SignalOverrides {
    negative: HashSet<char>,
    positive: HashSet<char>,
    flat_max_tokens: usize,
}

/// First emoji glyph of a configured entry; variation selectors are dropped
fn glyphs(entries: &[String]) -> HashSet<char> {
    entries
        .iter()
        .filter_map(|entry| entry.chars().find(|c| emoji::is_emoji_capable(*c)))
        .collect()
}

impl SignalOverrides {
    pub fn new(config: &SignalConfig) -> Self {
        Self {
            negative: glyphs(&config.negative_emoji),
            positive: glyphs(&config.positive_emoji),
            flat_max_tokens: config.flat_max_tokens,
        }
    }

    /// Adjust the classifier output for `cleaned` text
    pub fn apply(
        &self,
        cleaned: &str,
        result: ClassificationResult,
    ) -> (ClassificationResult, Vec<OverrideKind>) {
        let mut mood = result.mood;
        let mut energy = result.energy;
        let mut applied = Vec::new();

        let emojis = emoji::extract_emojis(cleaned);

        if emoji::is_emoji_only(cleaned) {
            let any_negative = emojis.iter().any(|e| self.negative.contains(e));
            let any_positive = emojis.iter().any(|e| self.positive.contains(e));

            if any_negative && matches!(mood, MoodLabel::Positive | MoodLabel::Neutral) {
                mood = MoodLabel::Negative;
                applied.push(OverrideKind::EmojiNegativeMood);
            } else if any_positive && matches!(mood, MoodLabel::Negative | MoodLabel::Neutral) {
                mood = MoodLabel::Positive;
                applied.push(OverrideKind::EmojiPositiveMood);
            }

            if any_negative
                && matches!(
                    energy,
                    EnergyLabel::Calm | EnergyLabel::LowEnergy | EnergyLabel::Unknown
                )
            {
                energy = EnergyLabel::HighStress;
                applied.push(OverrideKind::EmojiStress);
            }
        }

        if emojis.is_empty()
            && cleaned.split_whitespace().count() <= self.flat_max_tokens
            && matches!(mood, MoodLabel::Neutral | MoodLabel::Unknown)
            && energy != EnergyLabel::LowEnergy
        {
            energy = EnergyLabel::LowEnergy;
            applied.push(OverrideKind::FlatShort);
        }

        (ClassificationResult::new(mood, energy), applied)
    }
}

impl Default for SignalOverrides {
    fn default() -> Self {
        Self::new(&SignalConfig::default())
    }
}

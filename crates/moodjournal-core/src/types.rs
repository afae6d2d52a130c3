//! Core types for the mood journal

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse emotional valence of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
    Confused,
    Unknown,
}

impl MoodLabel {
    /// Labels a classifier may produce, in ranking tie order
    pub const CLASSES: [MoodLabel; 5] = [
        MoodLabel::Positive,
        MoodLabel::Negative,
        MoodLabel::Neutral,
        MoodLabel::Mixed,
        MoodLabel::Confused,
    ];

    /// Every label, including `Unknown`
    pub const ALL: [MoodLabel; 6] = [
        MoodLabel::Positive,
        MoodLabel::Negative,
        MoodLabel::Neutral,
        MoodLabel::Mixed,
        MoodLabel::Confused,
        MoodLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Mixed => "Mixed",
            Self::Confused => "Confused",
            Self::Unknown => "Unknown",
        }
    }
}

/// Coarse arousal/activation level of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyLabel {
    #[serde(rename = "High Energy")]
    HighEnergy,
    #[serde(rename = "Low Energy")]
    LowEnergy,
    #[serde(rename = "High Stress")]
    HighStress,
    Calm,
    Unknown,
}

impl EnergyLabel {
    /// Labels a classifier may produce, in ranking tie order
    pub const CLASSES: [EnergyLabel; 4] = [
        EnergyLabel::HighEnergy,
        EnergyLabel::LowEnergy,
        EnergyLabel::HighStress,
        EnergyLabel::Calm,
    ];

    /// Every label, including `Unknown`
    pub const ALL: [EnergyLabel; 5] = [
        EnergyLabel::HighEnergy,
        EnergyLabel::LowEnergy,
        EnergyLabel::HighStress,
        EnergyLabel::Calm,
        EnergyLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighEnergy => "High Energy",
            Self::LowEnergy => "Low Energy",
            Self::HighStress => "High Stress",
            Self::Calm => "Calm",
            Self::Unknown => "Unknown",
        }
    }
}

/// Error returned when a label string matches no known label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError(pub String);

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized label: {:?}", self.0)
    }
}

impl std::error::Error for ParseLabelError {}

/// Lowercase and collapse `_`/`-`/whitespace so "high_energy" == "High Energy"
fn canonical(s: &str) -> String {
    s.trim()
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl FromStr for MoodLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = canonical(s);
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().to_lowercase() == key)
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}

impl FromStr for EnergyLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = canonical(s);
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().to_lowercase() == key)
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EnergyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood and energy tags for one input text
///
/// This is a transient value with no identity; the same shape is persisted
/// as the `tags` object of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub mood: MoodLabel,
    pub energy: EnergyLabel,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(mood: MoodLabel, energy: EnergyLabel) -> Self {
        Self { mood, energy }
    }

    /// The indeterminate result used for degenerate input
    pub fn unknown() -> Self {
        Self::new(MoodLabel::Unknown, EnergyLabel::Unknown)
    }

    /// Check if both dimensions are indeterminate
    pub fn is_unknown(&self) -> bool {
        self.mood == MoodLabel::Unknown && self.energy == EnergyLabel::Unknown
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.mood, self.energy)
    }
}

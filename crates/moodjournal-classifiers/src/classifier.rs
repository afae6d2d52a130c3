//! Classifier trait and common types

use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel, Result};
use serde::Serialize;

/// Trait for mood/energy classification strategies
///
/// Implementations receive already-normalized text; degenerate input and
/// idioms are handled by the analyzer before a strategy is called.
pub trait Classifier: Send + Sync {
    /// Classify the given text
    fn classify(&self, text: &str) -> Result<Classification>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Output of a classification strategy
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub result: ClassificationResult,

    pub metadata: ClassificationMetadata,
}

impl Classification {
    pub fn new(mood: MoodLabel, energy: EnergyLabel) -> Self {
        Self {
            result: ClassificationResult::new(mood, energy),
            metadata: ClassificationMetadata::default(),
        }
    }
}

/// Metadata about classification
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationMetadata {
    /// Encoder or lexicon name
    pub model: Option<String>,

    /// Mood scores, best first
    pub mood_scores: Vec<(MoodLabel, f32)>,

    /// Energy scores, best first
    pub energy_scores: Vec<(EnergyLabel, f32)>,

    /// Tie-break rules that changed or confirmed the ranked label
    pub tie_breaks: Vec<TieBreak>,
}

/// Ambiguity rules applied on top of plain ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Positive and Negative both confident and too close to call
    MixedByGap,
    /// Short text with an unambiguous positive cue kept Positive
    PositiveGuard,
    /// High Energy / High Stress tie resolved by mood polarity
    EnergyByMood,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_new() {
        let c = Classification::new(MoodLabel::Neutral, EnergyLabel::Calm);
        assert_eq!(c.result.mood, MoodLabel::Neutral);
        assert_eq!(c.result.energy, EnergyLabel::Calm);
        assert!(c.metadata.tie_breaks.is_empty());
        assert!(c.metadata.model.is_none());
    }

    #[test]
    fn test_metadata_serialization() {
        let mut c = Classification::new(MoodLabel::Mixed, EnergyLabel::HighStress);
        c.metadata.tie_breaks.push(TieBreak::MixedByGap);
        c.metadata.mood_scores.push((MoodLabel::Positive, 0.5));

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["result"]["energy"], "High Stress");
        assert_eq!(json["metadata"]["tie_breaks"][0], "mixed_by_gap");
        assert_eq!(json["metadata"]["mood_scores"][0][0], "Positive");
    }
}

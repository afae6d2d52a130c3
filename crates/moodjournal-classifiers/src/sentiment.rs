//! Lightweight lexicon classifier (rule-only strategy)
//!
//! Reads the lexicon axes directly instead of comparing against centroids.
//! No encoder or prototypes are involved.

use crate::classifier::{Classification, ClassificationMetadata, Classifier};
use crate::lexicon::{Axis, Lexicon};
use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel, Result};

/// Energy axes in tie-break priority order
const ENERGY_AXES: [(Axis, EnergyLabel); 4] = [
    (Axis::Stress, EnergyLabel::HighStress),
    (Axis::Arousal, EnergyLabel::HighEnergy),
    (Axis::Fatigue, EnergyLabel::LowEnergy),
    (Axis::Calm, EnergyLabel::Calm),
];

pub struct LexiconClassifier {
    name: String,
    lexicon: Lexicon,
}

impl LexiconClassifier {
    pub fn new() -> Self {
        Self::with_name("lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lexicon: Lexicon::new(),
        }
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted<L>(mut scores: Vec<(L, f32)>) -> Vec<(L, f32)> {
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    scores
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let features = self.lexicon.features(text);
        let positive = features.get(Axis::Positive);
        let negative = features.get(Axis::Negative);
        let confusion = features.get(Axis::Confusion);

        let mood = match (positive > 0.0, negative > 0.0) {
            (true, true) => MoodLabel::Mixed,
            (true, false) => MoodLabel::Positive,
            (false, true) => MoodLabel::Negative,
            (false, false) if confusion > 0.0 => MoodLabel::Confused,
            (false, false) => MoodLabel::Neutral,
        };

        let energy_scores: Vec<(EnergyLabel, f32)> = ENERGY_AXES
            .iter()
            .map(|(axis, label)| (*label, features.get(*axis)))
            .collect();

        // strictly greater keeps the earlier axis on ties
        let energy = energy_scores
            .iter()
            .fold(None::<(EnergyLabel, f32)>, |best, &(label, score)| match best {
                Some((_, top)) if score <= top => best,
                _ if score > 0.0 => Some((label, score)),
                _ => best,
            })
            .map(|(label, _)| label)
            .unwrap_or(EnergyLabel::Unknown);

        Ok(Classification {
            result: ClassificationResult::new(mood, energy),
            metadata: ClassificationMetadata {
                model: Some("affect-lexicon".to_string()),
                mood_scores: sorted(vec![
                    (MoodLabel::Positive, positive),
                    (MoodLabel::Negative, negative),
                    (MoodLabel::Confused, confusion),
                ]),
                energy_scores: sorted(energy_scores),
                tie_breaks: Vec::new(),
            },
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> ClassificationResult {
        LexiconClassifier::new().classify(text).unwrap().result
    }

    #[test]
    fn test_mood_rules() {
        assert_eq!(classify("what a great day").mood, MoodLabel::Positive);
        assert_eq!(classify("what a terrible day").mood, MoodLabel::Negative);
        assert_eq!(classify("happy but sad").mood, MoodLabel::Mixed);
        assert_eq!(classify("so confused right now").mood, MoodLabel::Confused);
        assert_eq!(classify("went to the store").mood, MoodLabel::Neutral);
        assert_eq!(classify("not good at all").mood, MoodLabel::Negative);
    }

    #[test]
    fn test_energy_rules() {
        assert_eq!(classify("so tired").energy, EnergyLabel::LowEnergy);
        assert_eq!(classify("calm evening").energy, EnergyLabel::Calm);
        assert_eq!(classify("pumped and energized").energy, EnergyLabel::HighEnergy);
        assert_eq!(classify("went to the store").energy, EnergyLabel::Unknown);
    }

    #[test]
    fn test_energy_tie_order() {
        // one stress cue, one arousal cue
        assert_eq!(classify("deadline workout").energy, EnergyLabel::HighStress);
        // one fatigue cue, one calm cue
        assert_eq!(classify("sleepy and calm").energy, EnergyLabel::LowEnergy);
    }

    #[test]
    fn test_metadata_is_sorted() {
        let classification = LexiconClassifier::new().classify("tired tired calm").unwrap();
        assert_eq!(classification.metadata.energy_scores[0], (EnergyLabel::LowEnergy, 2.0));
        assert!(classification.metadata.tie_breaks.is_empty());
    }
}

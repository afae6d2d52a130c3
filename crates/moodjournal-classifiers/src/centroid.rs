//! Prototype-based (nearest-centroid) classifier
//!
//! Each label's centroid is the re-normalized mean embedding of its
//! prototype sentences. Text is labeled by cosine similarity against the
//! centroids, with two ambiguity rules on top:
//!
//! - A confident Positive/Negative near-tie becomes `Mixed`, unless a short
//!   text carries an unambiguous positive cue.
//! - A High Energy/High Stress near-tie is settled by the mood.

use crate::classifier::{Classification, ClassificationMetadata, Classifier, TieBreak};
use crate::encoder::{dot, l2_normalize, mean, Encoder};
use crate::lexicon::tokenize;
use crate::prototypes::{Label, PrototypeSet};
use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Both Positive and Negative must score above this for the Mixed rule
pub const DEFAULT_CONFIDENCE_FLOOR: f32 = 0.40;
/// Top-two score gap below which a pair counts as a tie
pub const DEFAULT_SCORE_GAP: f32 = 0.05;
/// Longest text (in words) the positive-cue guard applies to
pub const DEFAULT_GUARD_MAX_WORDS: usize = 6;

/// Immutable per-label centroid table
#[derive(Debug, Clone)]
pub struct CentroidIndex<L: Label> {
    centroids: Vec<(L, Vec<f32>)>,
}

impl<L: Label> CentroidIndex<L> {
    /// Encode every prototype and average per label.
    ///
    /// Labels without examples get no centroid.
    pub fn build(encoder: &dyn Encoder, prototypes: &PrototypeSet<L>) -> Result<Self> {
        let mut centroids = Vec::new();

        for (label, examples) in prototypes.iter() {
            let vectors = encoder.encode_batch(examples)?;
            if let Some(centroid) = mean(&vectors) {
                centroids.push((label, l2_normalize(centroid)));
            }
        }

        Ok(Self { centroids })
    }

    /// Use precomputed centroids; vectors are normalized and sorted into class order
    pub fn from_centroids(centroids: impl IntoIterator<Item = (L, Vec<f32>)>) -> Self {
        let mut centroids: Vec<(L, Vec<f32>)> = centroids
            .into_iter()
            .filter(|(label, _)| L::classes().contains(label))
            .map(|(label, vector)| (label, l2_normalize(vector)))
            .collect();
        centroids.sort_by_key(|(label, _)| L::classes().iter().position(|l| l == label));
        Self { centroids }
    }

    /// Cosine score against every centroid, best first.
    ///
    /// Equal scores keep class order.
    pub fn rank(&self, vector: &[f32]) -> Vec<(L, f32)> {
        let mut scores: Vec<(L, f32)> = self
            .centroids
            .iter()
            .map(|(label, centroid)| (*label, dot(vector, centroid)))
            .collect();
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
    }

    pub fn centroid(&self, label: L) -> Option<&[f32]> {
        self.centroids
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_slice())
    }

    pub fn labels(&self) -> Vec<L> {
        self.centroids.iter().map(|(label, _)| *label).collect()
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}

/// Positive-cue guard: keeps short, clearly positive text out of `Mixed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_positive_cues")]
    pub positive_cues: Vec<String>,

    #[serde(default = "default_negative_cues")]
    pub negative_cues: Vec<String>,

    #[serde(default = "default_guard_max_words")]
    pub max_words: usize,
}

fn default_true() -> bool {
    true
}

fn default_positive_cues() -> Vec<String> {
    ["great", "good", "amazing", "fantastic", "awesome", "happy", "excellent"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_negative_cues() -> Vec<String> {
    [
        "bad", "terrible", "awful", "horrible", "sad", "angry", "upset", "hate", "worst",
        "stressed", "anxious", "tired", "exhausted", "but", "not",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_guard_max_words() -> usize {
    DEFAULT_GUARD_MAX_WORDS
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            positive_cues: default_positive_cues(),
            negative_cues: default_negative_cues(),
            max_words: DEFAULT_GUARD_MAX_WORDS,
        }
    }
}

impl GuardConfig {
    /// Whether `text` is short and unambiguously positive
    pub fn applies_to(&self, text: &str) -> bool {
        if !self.enabled || text.split_whitespace().count() > self.max_words {
            return false;
        }

        let tokens = tokenize(text);
        let has = |cues: &[String]| {
            tokens
                .iter()
                .any(|token| cues.iter().any(|cue| cue.eq_ignore_ascii_case(token)))
        };

        has(&self.positive_cues) && !has(&self.negative_cues)
    }
}

/// Thresholds for the ambiguity rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TieBreakConfig {
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f32,

    #[serde(default = "default_score_gap")]
    pub mood_score_gap: f32,

    #[serde(default = "default_score_gap")]
    pub energy_score_gap: f32,

    #[serde(default)]
    pub guard: GuardConfig,
}

fn default_confidence_floor() -> f32 {
    DEFAULT_CONFIDENCE_FLOOR
}

fn default_score_gap() -> f32 {
    DEFAULT_SCORE_GAP
}

impl Default for TieBreakConfig {
    fn default() -> Self {
        Self {
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
            mood_score_gap: DEFAULT_SCORE_GAP,
            energy_score_gap: DEFAULT_SCORE_GAP,
            guard: GuardConfig::default(),
        }
    }
}

/// Chosen mood with its evidence
#[derive(Debug, Clone)]
pub struct MoodDecision {
    pub label: MoodLabel,
    pub scores: Vec<(MoodLabel, f32)>,
    pub tie_break: Option<TieBreak>,
}

/// Chosen energy with its evidence
#[derive(Debug, Clone)]
pub struct EnergyDecision {
    pub label: EnergyLabel,
    pub scores: Vec<(EnergyLabel, f32)>,
    pub tie_break: Option<TieBreak>,
}

fn is_pair<L: PartialEq>(a: L, b: L, x: L, y: L) -> bool {
    (a == x && b == y) || (a == y && b == x)
}

/// Nearest-centroid strategy over a semantic encoder
pub struct CentroidClassifier {
    name: String,
    encoder: Arc<dyn Encoder>,
    mood: CentroidIndex<MoodLabel>,
    energy: CentroidIndex<EnergyLabel>,
    config: TieBreakConfig,
}

impl CentroidClassifier {
    /// Compute centroids from the given prototypes
    pub fn build(
        encoder: Arc<dyn Encoder>,
        mood_prototypes: &PrototypeSet<MoodLabel>,
        energy_prototypes: &PrototypeSet<EnergyLabel>,
        config: TieBreakConfig,
    ) -> Result<Self> {
        let mood = CentroidIndex::build(encoder.as_ref(), mood_prototypes)?;
        let energy = CentroidIndex::build(encoder.as_ref(), energy_prototypes)?;

        tracing::info!(
            encoder = encoder.name(),
            mood_centroids = mood.len(),
            energy_centroids = energy.len(),
            "Built centroid classifier"
        );

        Ok(Self::from_parts(encoder, mood, energy, config))
    }

    pub fn from_parts(
        encoder: Arc<dyn Encoder>,
        mood: CentroidIndex<MoodLabel>,
        energy: CentroidIndex<EnergyLabel>,
        config: TieBreakConfig,
    ) -> Self {
        Self {
            name: "centroid".to_string(),
            encoder,
            mood,
            energy,
            config,
        }
    }

    pub fn mood_index(&self) -> &CentroidIndex<MoodLabel> {
        &self.mood
    }

    pub fn energy_index(&self) -> &CentroidIndex<EnergyLabel> {
        &self.energy
    }

    pub fn config(&self) -> &TieBreakConfig {
        &self.config
    }

    pub fn classify_mood(&self, vector: &[f32], text: &str) -> MoodDecision {
        let scores = self.mood.rank(vector);
        let Some(&(best, best_score)) = scores.first() else {
            return MoodDecision {
                label: MoodLabel::Unknown,
                scores,
                tie_break: None,
            };
        };

        let mut label = best;
        let mut tie_break = None;

        if let Some(&(second, second_score)) = scores.get(1) {
            let floor = self.config.confidence_floor;
            if is_pair(best, second, MoodLabel::Positive, MoodLabel::Negative)
                && best_score > floor
                && second_score > floor
            {
                if best == MoodLabel::Positive && self.config.guard.applies_to(text) {
                    tie_break = Some(TieBreak::PositiveGuard);
                } else if best_score - second_score < self.config.mood_score_gap {
                    label = MoodLabel::Mixed;
                    tie_break = Some(TieBreak::MixedByGap);
                }
            }
        }

        MoodDecision {
            label,
            scores,
            tie_break,
        }
    }

    pub fn classify_energy(&self, vector: &[f32], mood: MoodLabel) -> EnergyDecision {
        let scores = self.energy.rank(vector);
        let Some(&(best, best_score)) = scores.first() else {
            return EnergyDecision {
                label: EnergyLabel::Unknown,
                scores,
                tie_break: None,
            };
        };

        let mut label = best;
        let mut tie_break = None;

        if let Some(&(second, second_score)) = scores.get(1) {
            if is_pair(best, second, EnergyLabel::HighEnergy, EnergyLabel::HighStress)
                && best_score - second_score < self.config.energy_score_gap
            {
                let steered = match mood {
                    MoodLabel::Negative | MoodLabel::Mixed => Some(EnergyLabel::HighStress),
                    MoodLabel::Positive => Some(EnergyLabel::HighEnergy),
                    _ => None,
                };
                if let Some(steered) = steered {
                    label = steered;
                    tie_break = Some(TieBreak::EnergyByMood);
                }
            }
        }

        EnergyDecision {
            label,
            scores,
            tie_break,
        }
    }
}

impl Classifier for CentroidClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let vector = self.encoder.encode(text)?;

        let mood = self.classify_mood(&vector, text);
        let energy = self.classify_energy(&vector, mood.label);

        tracing::debug!(
            mood = %mood.label,
            energy = %energy.label,
            mood_tie_break = ?mood.tie_break,
            energy_tie_break = ?energy.tie_break,
            "Centroid decision"
        );

        Ok(Classification {
            result: ClassificationResult::new(mood.label, energy.label),
            metadata: ClassificationMetadata {
                model: Some(self.encoder.name().to_string()),
                mood_scores: mood.scores,
                energy_scores: energy.scores,
                tie_breaks: mood.tie_break.into_iter().chain(energy.tie_break).collect(),
            },
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

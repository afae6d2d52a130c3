//! Mood Journal Classifiers
//!
//! Text classification pipeline that tags journal entries with a mood and an
//! energy label.
//!
//! The pipeline runs four stages in order:
//! - Normalizer: trims input and short-circuits empty, numeric and gibberish text
//! - Idiom overrides: fixed phrases such as "crushing it" bypass the model
//! - Strategy: nearest-centroid over a semantic encoder, or lexicon rules
//! - Signal overrides: emoji-only and flat, very short entries
//!
//! The default encoder is the all-MiniLM-L6-v2 sentence-transformer, which
//! needs the `ml-models` feature. The lexicon encoder works offline and is
//! selected with `encoder: {type: lexicon}`.

pub mod analyzer;
pub mod centroid;
pub mod classifier;
pub mod config;
pub mod emoji;
pub mod encoder;
pub mod evaluation;
pub mod lexicon;
pub mod model_loader;
pub mod normalizer;
pub mod overrides;
pub mod prototypes;
pub mod samples;
#[cfg(feature = "ml-models")]
pub mod sentence;
pub mod sentiment;

pub use analyzer::{Analysis, DecisionPath, MoodAnalyzer};
pub use centroid::{CentroidClassifier, CentroidIndex, GuardConfig, TieBreakConfig};
pub use classifier::{Classification, ClassificationMetadata, Classifier, TieBreak};
pub use config::{AnalyzerConfig, EncoderConfig, StrategyKind};
pub use encoder::Encoder;
pub use evaluation::{evaluate, EvaluationReport, Mismatch};
pub use lexicon::LexiconEncoder;
pub use model_loader::{DeviceType, ModelSource};
pub use normalizer::{DegenerateReason, Normalized, Normalizer, NormalizerConfig};
pub use overrides::{IdiomOverrides, OverrideKind, SignalOverrides};
pub use prototypes::{Label, PrototypeSet};
pub use samples::{LabeledSample, SampleId};
#[cfg(feature = "ml-models")]
pub use sentence::SentenceEncoder;
pub use sentiment::LexiconClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::{Analysis, MoodAnalyzer};
    pub use crate::classifier::{Classification, Classifier};
    pub use crate::config::AnalyzerConfig;
    pub use crate::encoder::Encoder;
    pub use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel};
}

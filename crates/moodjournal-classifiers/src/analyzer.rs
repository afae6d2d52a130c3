//! Mood/energy analysis pipeline
//!
//! normalize → idiom → strategy → signal overrides. A `MoodAnalyzer` is
//! built once and is read-only afterwards, so it can be shared by `Arc`
//! across threads.

use crate::centroid::CentroidClassifier;
use crate::classifier::{ClassificationMetadata, Classifier};
use crate::config::{AnalyzerConfig, EncoderConfig, StrategyKind};
use crate::encoder::Encoder;
use crate::lexicon::LexiconEncoder;
use crate::normalizer::{DegenerateReason, Normalized, Normalizer};
use crate::overrides::{IdiomOverrides, OverrideKind, SignalOverrides};
use crate::prototypes::{seed_energy, seed_mood};
use crate::samples;
use crate::sentiment::LexiconClassifier;
use moodjournal_core::{ClassificationResult, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Which stage produced the pre-override result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "path", content = "detail", rename_all = "snake_case")]
pub enum DecisionPath {
    /// Degenerate input resolved to `(Unknown, Unknown)`
    ShortCircuit(DegenerateReason),
    /// A known idiom matched; carries the phrase
    Idiom(String),
    /// The classification strategy ran
    Model,
}

impl DecisionPath {
    /// Metric label for this path
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortCircuit(_) => "short_circuit",
            Self::Idiom(_) => "idiom",
            Self::Model => "model",
        }
    }
}

/// Full account of one classification
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub result: ClassificationResult,

    pub decision: DecisionPath,

    /// Strategy evidence; `None` unless the model ran
    pub metadata: Option<ClassificationMetadata>,

    /// Post-model adjustments, in the order applied
    pub overrides: Vec<OverrideKind>,

    /// Latency in microseconds
    pub latency_us: u64,
}

pub struct MoodAnalyzer {
    normalizer: Normalizer,
    idioms: IdiomOverrides,
    strategy: Arc<dyn Classifier>,
    signals: SignalOverrides,
}

impl MoodAnalyzer {
    pub fn new(
        normalizer: Normalizer,
        idioms: IdiomOverrides,
        strategy: Arc<dyn Classifier>,
        signals: SignalOverrides,
    ) -> Self {
        Self {
            normalizer,
            idioms,
            strategy,
            signals,
        }
    }

    /// Wrap a strategy with default normalizer and override layers
    pub fn with_classifier(strategy: Arc<dyn Classifier>) -> Result<Self> {
        let config = AnalyzerConfig::default();
        Ok(Self::new(
            Normalizer::new(config.normalizer),
            IdiomOverrides::new(&config.idioms)?,
            strategy,
            SignalOverrides::new(&config.signals),
        ))
    }

    /// Build every stage from configuration.
    ///
    /// Fails only when the configured encoder cannot be loaded; unreadable
    /// sample files are skipped.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let strategy: Arc<dyn Classifier> = match config.strategy {
            StrategyKind::Lexicon => Arc::new(LexiconClassifier::new()),
            StrategyKind::Centroid => {
                let encoder = build_encoder(&config.encoder)?;

                let mut mood = seed_mood();
                let mut energy = seed_energy();
                let labeled = samples::load_all(&config.sample_files);
                let merged = samples::merge_into(&mut mood, &mut energy, &labeled);
                tracing::info!(
                    samples = labeled.len(),
                    mood_added = merged.mood_added,
                    energy_added = merged.energy_added,
                    "Merged labeled samples into prototypes"
                );

                Arc::new(CentroidClassifier::build(
                    encoder,
                    &mood,
                    &energy,
                    config.tie_break.clone(),
                )?)
            }
        };

        tracing::info!(strategy = strategy.name(), "Mood analyzer ready");

        Ok(Self::new(
            Normalizer::new(config.normalizer.clone()),
            IdiomOverrides::new(&config.idioms)?,
            strategy,
            SignalOverrides::new(&config.signals),
        ))
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Tags for `text`; `None` is treated as empty input
    pub fn classify(&self, text: Option<&str>) -> Result<ClassificationResult> {
        Ok(self.analyze(text)?.result)
    }

    /// Tags plus the decision path, evidence and applied overrides
    pub fn analyze(&self, text: Option<&str>) -> Result<Analysis> {
        let start = Instant::now();

        let cleaned = match self.normalizer.normalize(text) {
            Normalized::Degenerate(reason) => {
                return Ok(self.finish(
                    start,
                    ClassificationResult::unknown(),
                    DecisionPath::ShortCircuit(reason),
                    None,
                    Vec::new(),
                ));
            }
            Normalized::Text(cleaned) => cleaned,
        };

        let (baseline, decision, metadata) = match self.idioms.lookup(cleaned) {
            Some(idiom) => (idiom.result, DecisionPath::Idiom(idiom.phrase), None),
            None => {
                let classification = self.strategy.classify(cleaned)?;
                (
                    classification.result,
                    DecisionPath::Model,
                    Some(classification.metadata),
                )
            }
        };

        let (result, overrides) = self.signals.apply(cleaned, baseline);

        Ok(self.finish(start, result, decision, metadata, overrides))
    }

    fn finish(
        &self,
        start: Instant,
        result: ClassificationResult,
        decision: DecisionPath,
        metadata: Option<ClassificationMetadata>,
        overrides: Vec<OverrideKind>,
    ) -> Analysis {
        let latency_us = start.elapsed().as_micros() as u64;

        metrics::counter!(
            "moodjournal_classifications_total",
            "mood" => result.mood.as_str(),
            "energy" => result.energy.as_str(),
            "path" => decision.as_str()
        )
        .increment(1);
        metrics::histogram!("moodjournal_classify_latency_us").record(latency_us as f64);

        tracing::debug!(
            mood = %result.mood,
            energy = %result.energy,
            path = decision.as_str(),
            overrides = ?overrides,
            latency_us,
            "Classified entry"
        );

        Analysis {
            result,
            decision,
            metadata,
            overrides,
            latency_us,
        }
    }
}

fn build_encoder(config: &EncoderConfig) -> Result<Arc<dyn Encoder>> {
    match config {
        EncoderConfig::Lexicon => Ok(Arc::new(LexiconEncoder::new())),

        #[cfg(feature = "ml-models")]
        EncoderConfig::SentenceTransformer {
            source,
            device,
            max_length,
        } => Ok(Arc::new(crate::sentence::SentenceEncoder::load(
            source,
            *device,
            *max_length,
        )?)),

        #[cfg(not(feature = "ml-models"))]
        EncoderConfig::SentenceTransformer { .. } => Err(moodjournal_core::Error::model_unavailable(
            "sentence-transformer encoder requires the ml-models feature",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classification;
    use moodjournal_core::{EnergyLabel, Error, MoodLabel};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and always answers with a fixed result
    struct FixedClassifier {
        result: ClassificationResult,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn new(mood: MoodLabel, energy: EnergyLabel) -> Arc<Self> {
            Arc::new(Self {
                result: ClassificationResult::new(mood, energy),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Classifier for FixedClassifier {
        fn classify(&self, _text: &str) -> Result<Classification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Classification::new(self.result.mood, self.result.energy))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn classify(&self, _text: &str) -> Result<Classification> {
            Err(Error::model_unavailable("weights not loaded"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_degenerate_input_skips_strategy() {
        let fixed = FixedClassifier::new(MoodLabel::Positive, EnergyLabel::Calm);
        let analyzer = MoodAnalyzer::with_classifier(fixed.clone()).unwrap();

        for input in [None, Some(""), Some("   "), Some("12345"), Some("asdfgh")] {
            let analysis = analyzer.analyze(input).unwrap();
            assert!(analysis.result.is_unknown(), "input {:?}", input);
            assert!(matches!(analysis.decision, DecisionPath::ShortCircuit(_)));
            assert!(analysis.overrides.is_empty());
        }
        assert_eq!(fixed.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_idiom_skips_strategy() {
        let fixed = FixedClassifier::new(MoodLabel::Neutral, EnergyLabel::Calm);
        let analyzer = MoodAnalyzer::with_classifier(fixed.clone()).unwrap();

        let analysis = analyzer.analyze(Some("this week is crushing me")).unwrap();
        assert_eq!(
            analysis.result,
            ClassificationResult::new(MoodLabel::Negative, EnergyLabel::HighStress)
        );
        assert_eq!(analysis.decision, DecisionPath::Idiom("crushing me".to_string()));
        assert!(analysis.metadata.is_none());
        assert_eq!(fixed.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_signals_run_after_strategy() {
        let fixed = FixedClassifier::new(MoodLabel::Neutral, EnergyLabel::Calm);
        let analyzer = MoodAnalyzer::with_classifier(fixed.clone()).unwrap();

        let analysis = analyzer.analyze(Some("ok")).unwrap();
        assert_eq!(analysis.decision, DecisionPath::Model);
        assert_eq!(analysis.result.energy, EnergyLabel::LowEnergy);
        assert_eq!(analysis.overrides, vec![OverrideKind::FlatShort]);
        assert_eq!(fixed.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_strategy_errors_propagate() {
        let analyzer = MoodAnalyzer::with_classifier(Arc::new(FailingClassifier)).unwrap();
        let err = analyzer.classify(Some("a perfectly normal sentence")).unwrap_err();
        assert!(err.is_model_unavailable());

        // degenerate input never reaches the strategy
        assert!(analyzer.classify(Some("")).unwrap().is_unknown());
    }

    #[test]
    fn test_decision_path_serialization() {
        let json = serde_json::to_value(DecisionPath::ShortCircuit(DegenerateReason::Numeric)).unwrap();
        assert_eq!(json, serde_json::json!({"path": "short_circuit", "detail": "numeric"}));
        let json = serde_json::to_value(DecisionPath::Model).unwrap();
        assert_eq!(json, serde_json::json!({"path": "model"}));
    }

    #[test]
    fn test_from_config_lexicon_strategy() {
        let config = AnalyzerConfig::from_yaml("strategy: lexicon\n").unwrap();
        let analyzer = MoodAnalyzer::from_config(&config).unwrap();
        assert_eq!(analyzer.strategy_name(), "lexicon");
        assert_eq!(
            analyzer.classify(Some("Feeling calm and happy")).unwrap(),
            ClassificationResult::new(MoodLabel::Positive, EnergyLabel::Calm)
        );
    }

    #[cfg(not(feature = "ml-models"))]
    #[test]
    fn test_sentence_encoder_needs_feature() {
        let config = AnalyzerConfig::from_yaml("encoder:\n  type: sentence-transformer\n").unwrap();
        let err = MoodAnalyzer::from_config(&config).err().unwrap();
        assert!(err.is_model_unavailable());
    }
}

//! Sentence Encoder Integration Tests
//!
//! Tests for the Candle sentence-transformer encoder using the real
//! all-MiniLM-L6-v2 weights from HuggingFace. These tests require the
//! `ml-models` feature flag and network access, so they are ignored by
//! default:
//!
//!     cargo test -p moodjournal-classifiers -- --ignored

#![cfg(feature = "ml-models")]

use moodjournal_classifiers::encoder::dot;
use moodjournal_classifiers::model_loader::DEFAULT_MAX_LENGTH;
use moodjournal_classifiers::{
    AnalyzerConfig, DeviceType, Encoder, ModelSource, MoodAnalyzer, SentenceEncoder,
};
use moodjournal_core::{EnergyLabel, MoodLabel};

fn minilm_config() -> &'static str {
    r#"
strategy: centroid
encoder:
  type: sentence-transformer
  source:
    type: huggingface
    repo: "sentence-transformers/all-MiniLM-L6-v2"
    revision: "main"
  device: cpu
  max_length: 256
"#
}

fn load_encoder() -> SentenceEncoder {
    SentenceEncoder::load(&ModelSource::default(), DeviceType::Cpu, DEFAULT_MAX_LENGTH)
        .expect("Failed to load MiniLM")
}

#[test]
#[ignore = "downloads model weights"]
fn test_encoder_dimension_and_norm() {
    let encoder = load_encoder();
    assert_eq!(encoder.dimension(), 384);

    let vector = encoder.encode("Went for a long walk by the lake.").unwrap();
    assert_eq!(vector.len(), 384);
    let norm = dot(&vector, &vector).sqrt();
    assert!((norm - 1.0).abs() < 1e-3, "norm was {}", norm);
}

#[test]
#[ignore = "downloads model weights"]
fn test_similar_sentences_are_closer() {
    let encoder = load_encoder();
    let tired = encoder.encode("I am completely exhausted today").unwrap();
    let sleepy = encoder.encode("So tired, I could sleep all day").unwrap();
    let party = encoder.encode("The concert last night was a blast!").unwrap();

    assert!(dot(&tired, &sleepy) > dot(&tired, &party));
}

#[test]
#[ignore = "downloads model weights"]
fn test_long_input_is_truncated() {
    let encoder = load_encoder();
    let long = "today was long and tiring ".repeat(400);
    assert_eq!(encoder.encode(&long).unwrap().len(), 384);
}

#[test]
#[ignore = "downloads model weights"]
fn test_analyzer_with_sentence_encoder() {
    let config = AnalyzerConfig::from_yaml(minilm_config()).unwrap();
    let analyzer = MoodAnalyzer::from_config(&config).unwrap();
    assert_eq!(analyzer.strategy_name(), "centroid");

    let result = analyzer.classify(Some("")).unwrap();
    assert!(result.is_unknown());

    let result = analyzer
        .classify(Some("Had an amazing workout and I feel unstoppable!"))
        .unwrap();
    assert_eq!(result.mood, MoodLabel::Positive);
    assert_ne!(result.energy, EnergyLabel::Unknown);
}

//! Analyzer configuration
//!
//! Every field has a serde default, so an empty YAML document is a valid
//! configuration: centroid strategy over the all-MiniLM-L6-v2 sentence
//! encoder. `AnalyzerConfig::offline` swaps in the lexicon encoder, which
//! needs no model download.

use crate::centroid::TieBreakConfig;
use crate::model_loader::{DeviceType, ModelSource, DEFAULT_MAX_LENGTH};
use crate::normalizer::NormalizerConfig;
use crate::overrides::{IdiomConfig, SignalConfig};
use moodjournal_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for a `MoodAnalyzer`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Classification strategy
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Encoder used by the centroid strategy
    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub normalizer: NormalizerConfig,

    #[serde(default)]
    pub tie_break: TieBreakConfig,

    #[serde(default)]
    pub idioms: IdiomConfig,

    #[serde(default)]
    pub signals: SignalConfig,

    /// Labeled-sample files merged into the prototypes at startup
    #[serde(default)]
    pub sample_files: Vec<PathBuf>,
}

impl AnalyzerConfig {
    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse analyzer config: {}", e)))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Default configuration with the offline lexicon encoder
    pub fn offline() -> Self {
        Self {
            encoder: EncoderConfig::Lexicon,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Nearest-centroid over encoded prototypes
    #[default]
    Centroid,
    /// Rule-only lexicon scoring
    Lexicon,
}

/// Encoder selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EncoderConfig {
    /// Offline affect-lexicon encoder
    Lexicon,

    /// Candle BERT sentence-transformer
    SentenceTransformer {
        #[serde(default)]
        source: ModelSource,

        #[serde(default)]
        device: DeviceType,

        #[serde(default = "default_max_length")]
        max_length: usize,
    },
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::SentenceTransformer {
            source: ModelSource::default(),
            device: DeviceType::default(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

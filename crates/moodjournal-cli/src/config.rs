//! CLI configuration

use crate::cli::Cli;
use moodjournal_classifiers::AnalyzerConfig;
use moodjournal_storage::StorageConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The `analyzer` and `storage` sections of `config.yaml`; other keys are ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            tracing::debug!("{} not found, using default configuration", config_path);
            Self::default()
        };

        if let Some(journal) = &cli.journal {
            config.storage.path = journal.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use moodjournal_classifiers::StrategyKind;
    use std::path::PathBuf;

    #[test]
    fn test_shares_api_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "port: 9000\nanalyzer:\n  strategy: lexicon\nstorage:\n  path: /var/journal.json\n",
        )
        .unwrap();
        let path = path.to_string_lossy().to_string();

        let cli = Cli::parse_from(["moodjournal", "summary"]);
        let config = CliConfig::load(&path, &cli).unwrap();
        assert_eq!(config.analyzer.strategy, StrategyKind::Lexicon);
        assert_eq!(config.storage.path, PathBuf::from("/var/journal.json"));

        let cli = Cli::parse_from(["moodjournal", "--journal", "/tmp/x.json", "summary"]);
        let config = CliConfig::load(&path, &cli).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cli = Cli::parse_from(["moodjournal", "summary"]);
        let config = CliConfig::load("/no/such/config.yaml", &cli).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
    }
}

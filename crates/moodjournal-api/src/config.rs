//! API server configuration

use crate::cli::Cli;
use moodjournal_classifiers::AnalyzerConfig;
use moodjournal_storage::StorageConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Entries returned by `GET /entries` without a `limit`
    #[serde(default = "default_entries_limit")]
    pub default_entries_limit: usize,

    /// Maximum accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl ApiConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            tracing::warn!("{} not found, using default configuration", config_path);
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        if let Some(journal) = &cli.journal {
            config.storage.path = journal.clone();
        }

        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            default_entries_limit: default_entries_limit(),
            max_body_bytes: default_max_body_bytes(),
            analyzer: AnalyzerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_entries_limit() -> usize {
    20
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodjournal_classifiers::{EncoderConfig, StrategyKind};
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ApiConfig::load("/no/such/config.yaml", &Cli::default()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_entries_limit, 20);
        assert_eq!(config.analyzer.strategy, StrategyKind::Centroid);
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "port: 9000\nlisten: 0.0.0.0\nanalyzer:\n  strategy: lexicon\nstorage:\n  path: /var/journal.json\n",
        )
        .unwrap();
        let path = path.to_string_lossy().to_string();

        let config = ApiConfig::load(&path, &Cli::default()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.listen, "0.0.0.0");
        assert_eq!(config.analyzer.strategy, StrategyKind::Lexicon);

        let cli = Cli {
            port: Some(9100),
            journal: Some(PathBuf::from("/tmp/other.json")),
            ..Default::default()
        };
        let config = ApiConfig::load(&path, &cli).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/other.json"));
    }

    #[test]
    fn test_workspace_config_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config.yaml");
        let config = ApiConfig::load(path, &Cli::default()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.analyzer.strategy, StrategyKind::Centroid);
        assert_eq!(config.analyzer.encoder, EncoderConfig::default());
        assert_eq!(config.analyzer.idioms.phrases.len(), 4);
        assert_eq!(config.analyzer.sample_files.len(), 1);
        assert_eq!(config.storage.path, PathBuf::from("./data/journal_entries.json"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "port: [not a port").unwrap();
        assert!(ApiConfig::load(&path.to_string_lossy(), &Cli::default()).is_err());
    }
}

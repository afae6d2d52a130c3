//! Storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default journal location, relative to the working directory
pub const DEFAULT_JOURNAL_PATH: &str = "./data/journal_entries.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Journal file
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_JOURNAL_PATH)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

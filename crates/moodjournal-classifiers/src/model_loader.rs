//! Model source resolution for the sentence encoder
//!
//! A model directory must hold `config.json`, `tokenizer.json` (or
//! `vocab.txt`) and `model.safetensors`. Hugging Face sources are fetched
//! into the local hf-hub cache on first use.

use hf_hub::{api::sync::Api, Repo, RepoType};
use moodjournal_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default sentence-embedding model
pub const DEFAULT_MODEL_REPO: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Default token budget per input
pub const DEFAULT_MAX_LENGTH: usize = 256;

/// Files fetched from a Hugging Face repository
const MODEL_FILES: [&str; 3] = ["config.json", "tokenizer.json", "model.safetensors"];

/// Source location for model files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModelSource {
    /// Load from local filesystem
    Local { path: PathBuf },

    /// Download from HuggingFace Hub
    HuggingFace {
        repo: String,
        #[serde(default = "default_revision")]
        revision: String,
    },
}

fn default_revision() -> String {
    "main".to_string()
}

impl Default for ModelSource {
    fn default() -> Self {
        Self::HuggingFace {
            repo: DEFAULT_MODEL_REPO.to_string(),
            revision: default_revision(),
        }
    }
}

impl ModelSource {
    /// Short name for logs and metadata
    pub fn display_name(&self) -> String {
        match self {
            Self::Local { path } => path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("local-model")
                .to_string(),
            Self::HuggingFace { repo, .. } => repo.clone(),
        }
    }
}

/// Device to run inference on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// CPU inference (always available)
    #[default]
    Cpu,
    /// CUDA GPU 0
    Cuda,
    /// Metal (Apple Silicon)
    Metal,
}

/// Resolve a model source to a local directory
pub fn resolve_model_dir(source: &ModelSource) -> Result<PathBuf> {
    match source {
        ModelSource::Local { path } => {
            if !path.is_dir() {
                return Err(Error::model_unavailable(format!(
                    "Model directory does not exist: {}",
                    path.display()
                )));
            }
            Ok(path.clone())
        }
        ModelSource::HuggingFace { repo, revision } => download_from_huggingface(repo, revision),
    }
}

fn download_from_huggingface(repo: &str, revision: &str) -> Result<PathBuf> {
    tracing::info!("Resolving model from HuggingFace: {}@{}", repo, revision);

    let api = Api::new().map_err(|e| {
        Error::model_unavailable(format!("Failed to initialize HuggingFace API: {}", e))
    })?;

    let repo_obj = api.repo(Repo::with_revision(
        repo.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));

    let mut model_dir = None;
    for file in MODEL_FILES {
        let path = repo_obj.get(file).map_err(|e| {
            Error::model_unavailable(format!("Failed to download {} from {}: {}", file, repo, e))
        })?;
        tracing::debug!("Fetched {}", path.display());
        model_dir = path.parent().map(Path::to_path_buf);
    }

    let model_dir =
        model_dir.ok_or_else(|| Error::model_unavailable("Invalid HuggingFace cache path"))?;

    tracing::info!("Model available at: {}", model_dir.display());
    Ok(model_dir)
}

/// Ensure the directory holds the files the encoder needs
pub fn check_model_dir(model_dir: &Path) -> Result<()> {
    let weights = model_dir.join("model.safetensors");
    let config = model_dir.join("config.json");
    let has_tokenizer =
        model_dir.join("tokenizer.json").exists() || model_dir.join("vocab.txt").exists();

    for required in [&weights, &config] {
        if !required.exists() {
            return Err(Error::model_unavailable(format!(
                "{} not found",
                required.display()
            )));
        }
    }

    if !has_tokenizer {
        return Err(Error::model_unavailable(format!(
            "No tokenizer found in {} (tried tokenizer.json, vocab.txt)",
            model_dir.display()
        )));
    }

    Ok(())
}

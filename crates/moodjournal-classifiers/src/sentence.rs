//! Sentence-transformer encoder backed by Candle
//!
//! Runs a BERT-family model and mean-pools the last hidden state under the
//! attention mask, then L2-normalizes the pooled vector.

use crate::encoder::{l2_normalize, Encoder};
use crate::model_loader::{check_model_dir, resolve_model_dir, DeviceType, ModelSource};
#[cfg(test)]
use crate::model_loader::DEFAULT_MAX_LENGTH;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use moodjournal_core::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tokenizers::{Tokenizer, TruncationDirection};

pub struct SentenceEncoder {
    name: String,
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    max_length: usize,
    dimension: usize,
}

#[derive(Deserialize)]
struct HiddenSize {
    hidden_size: usize,
}

impl SentenceEncoder {
    /// Resolve, download if needed, and load the model
    pub fn load(source: &ModelSource, device: DeviceType, max_length: usize) -> Result<Self> {
        let model_dir = resolve_model_dir(source)?;
        check_model_dir(&model_dir)?;

        let device = create_device(device)?;
        let config_str = std::fs::read_to_string(model_dir.join("config.json")).map_err(|e| {
            Error::model_unavailable(format!("Failed to read config.json: {}", e))
        })?;
        let bert_config: BertConfig = serde_json::from_str(&config_str).map_err(|e| {
            Error::model_unavailable(format!("Failed to parse config.json: {}", e))
        })?;
        let HiddenSize { hidden_size } = serde_json::from_str(&config_str).map_err(|e| {
            Error::model_unavailable(format!("config.json has no hidden_size: {}", e))
        })?;

        let weights = model_dir.join("model.safetensors");
        // SAFETY: the weights file is memory-mapped read-only and must not be
        // modified while the model is alive.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, &device).map_err(|e| {
                Error::model_unavailable(format!("Failed to load weights: {}", e))
            })?
        };

        let model = ["bert", ""]
            .iter()
            .find_map(|prefix| {
                let vb = if prefix.is_empty() { vb.clone() } else { vb.pp(*prefix) };
                BertModel::load(vb, &bert_config).ok()
            })
            .ok_or_else(|| Error::model_unavailable("Failed to load BERT weights"))?;

        let tokenizer = load_tokenizer(&model_dir)?;

        tracing::info!(
            model = %source.display_name(),
            dimension = hidden_size,
            max_length,
            "Loaded sentence encoder"
        );

        Ok(Self {
            name: source.display_name(),
            model,
            tokenizer,
            device,
            max_length,
            dimension: hidden_size,
        })
    }

    fn tensor(&self, values: &[u32], what: &str) -> Result<Tensor> {
        Tensor::new(values, &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::model_unavailable(format!("Failed to create {} tensor: {}", what, e)))
    }
}

fn create_device(device: DeviceType) -> Result<Device> {
    match device {
        DeviceType::Cpu => Ok(Device::Cpu),
        DeviceType::Cuda => Device::new_cuda(0)
            .map_err(|e| Error::model_unavailable(format!("Failed to initialize CUDA: {}", e))),
        DeviceType::Metal => Device::new_metal(0)
            .map_err(|e| Error::model_unavailable(format!("Failed to initialize Metal: {}", e))),
    }
}

fn load_tokenizer(model_dir: &Path) -> Result<Tokenizer> {
    let tokenizer_json = model_dir.join("tokenizer.json");
    if tokenizer_json.exists() {
        return Tokenizer::from_file(&tokenizer_json)
            .map_err(|e| Error::model_unavailable(format!("Failed to load tokenizer.json: {}", e)));
    }

    use tokenizers::models::wordpiece::WordPiece;
    use tokenizers::normalizers::BertNormalizer;
    use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
    use tokenizers::processors::bert::BertProcessing;

    let vocab = model_dir.join("vocab.txt");
    let wordpiece = WordPiece::from_file(vocab.to_string_lossy().as_ref())
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| Error::model_unavailable(format!("Failed to read vocab.txt: {}", e)))?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    tokenizer.with_normalizer(Some(BertNormalizer::default()));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));
    tokenizer.with_post_processor(Some(BertProcessing::new(
        ("[SEP]".to_string(), 102),
        ("[CLS]".to_string(), 101),
    )));
    Ok(tokenizer)
}

/// Average token embeddings whose mask entry is set
pub fn mean_pool(token_embeddings: &[Vec<f32>], attention_mask: &[u32]) -> Vec<f32> {
    let Some(first) = token_embeddings.first() else {
        return Vec::new();
    };

    let mut pooled = vec![0.0f32; first.len()];
    let mut count = 0usize;
    for (embedding, _) in token_embeddings
        .iter()
        .zip(attention_mask.iter().chain(std::iter::repeat(&0)))
        .filter(|(_, mask)| **mask > 0)
    {
        count += 1;
        pooled.iter_mut().zip(embedding).for_each(|(p, v)| *p += v);
    }

    // fully masked input falls back to a plain mean
    if count == 0 {
        count = token_embeddings.len();
        for embedding in token_embeddings {
            pooled.iter_mut().zip(embedding).for_each(|(p, v)| *p += v);
        }
    }

    pooled.iter_mut().for_each(|p| *p /= count as f32);
    pooled
}

impl Encoder for SentenceEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::model_unavailable(format!("Tokenization failed: {}", e)))?;
        encoding.truncate(self.max_length, 0, TruncationDirection::Right);

        let mask = encoding.get_attention_mask().to_vec();
        let input_ids = self.tensor(encoding.get_ids(), "input ids")?;
        let token_type_ids = self.tensor(encoding.get_type_ids(), "token type ids")?;
        let attention_mask = self.tensor(&mask, "attention mask")?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| Error::model_unavailable(format!("Model forward pass failed: {}", e)))?;

        let token_embeddings: Vec<Vec<f32>> = hidden
            .squeeze(0)
            .and_then(|t| t.to_vec2())
            .map_err(|e| Error::model_unavailable(format!("Failed to read embeddings: {}", e)))?;

        Ok(l2_normalize(mean_pool(&token_embeddings, &mask)))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.name
    }
}

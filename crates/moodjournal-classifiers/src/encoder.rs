//! Semantic encoder trait and vector helpers
//!
//! Encoders map text to a fixed-size, unit-length vector so that cosine
//! similarity between two texts is a plain dot product.

use moodjournal_core::Result;

/// Trait for all text encoders
pub trait Encoder: Send + Sync {
    /// Encode text into an L2-normalized vector
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Encode several texts, preserving order
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    /// Dimensionality of produced vectors
    fn dimension(&self) -> usize;

    /// Get the encoder name
    fn name(&self) -> &str;
}

/// Scale a vector to unit length.
///
/// A zero-norm vector is returned unchanged.
pub fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
    vector
}

/// Dot product; equals cosine similarity for unit vectors
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Element-wise mean of equally sized vectors
pub fn mean(vectors: &[Vec<f32>]) -> Option<Vec<f32>> {
    let first = vectors.first()?;
    let mut acc = vec![0.0f32; first.len()];
    for vector in vectors {
        for (slot, value) in acc.iter_mut().zip(vector) {
            *slot += value;
        }
    }
    let n = vectors.len() as f32;
    acc.iter_mut().for_each(|v| *v /= n);
    Some(acc)
}

//! Text encoders: anything that maps a string to a fixed-length vector.
//!
//! The encoder is loaded once, shared read-only by every scoring call of a
//! run, and injected into the pipeline rather than held in a global.

pub mod hash;
#[cfg(feature = "semantic")]
pub mod minilm;

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

pub use hash::HashEncoder;
#[cfg(feature = "semantic")]
pub use minilm::MiniLmEncoder;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to initialize encoder: {0}")]
    Init(String),
    #[error("failed to embed text: {0}")]
    Embed(String),
    #[error("encoder '{0}' is not available in this build (enable the 'semantic' feature)")]
    Unavailable(&'static str),
}

pub trait Encoder: Send + Sync {
    fn name(&self) -> &str;
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncodeError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EncoderKind {
    /// Deterministic feature hashing; needs no model files.
    #[default]
    Hash,
    /// all-MiniLM-L6-v2 sentence embeddings.
    Minilm,
}

/// Build the encoder selected in `settings`.
pub fn from_settings(settings: &Settings) -> Result<Arc<dyn Encoder>, EncodeError> {
    match settings.encoder {
        EncoderKind::Hash => Ok(Arc::new(HashEncoder::new(settings.hash_dimensions))),
        #[cfg(feature = "semantic")]
        EncoderKind::Minilm => Ok(Arc::new(MiniLmEncoder::load(&settings.model_cache_dir)?)),
        #[cfg(not(feature = "semantic"))]
        EncoderKind::Minilm => Err(EncodeError::Unavailable("minilm")),
    }
}

/// Cosine similarity in [-1, 1]. Mismatched lengths and zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

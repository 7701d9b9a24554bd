use std::path::Path;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use super::{EncodeError, Encoder};

/// all-MiniLM-L6-v2 sentence encoder (384 dimensions, mean pooled, normalized).
///
/// Model files are read from, or downloaded once into, `cache_dir`.
pub struct MiniLmEncoder {
    model: TextEmbedding,
}

impl MiniLmEncoder {
    pub fn load(cache_dir: &Path) -> Result<Self, EncodeError> {
        info!(cache_dir = %cache_dir.display(), "Loading all-MiniLM-L6-v2");
        let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_cache_dir(cache_dir.to_path_buf())
            .with_show_download_progress(false);
        let model = TextEmbedding::try_new(options).map_err(|e| EncodeError::Init(e.to_string()))?;
        Ok(MiniLmEncoder { model })
    }
}

impl Encoder for MiniLmEncoder {
    fn name(&self) -> &str {
        "all-MiniLM-L6-v2"
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EncodeError> {
        let mut vectors = self
            .model
            .embed(vec![text], None)
            .map_err(|e| EncodeError::Embed(e.to_string()))?;
        vectors
            .pop()
            .ok_or_else(|| EncodeError::Embed("model returned no vector".to_string()))
    }
}

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::encoder::{EncoderKind, HashEncoder};
use crate::error::AnalysisError;

pub const DEFAULT_CONFIG_FILE: &str = "analyst.toml";
pub const ENV_PREFIX: &str = "ANALYST";

/// Runtime settings. Sources, lowest priority first: built-in defaults, an
/// optional TOML file, `ANALYST_*` environment variables. CLI flags are
/// applied on top by the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub encoder: EncoderKind,
    #[serde(default = "default_hash_dimensions")]
    pub hash_dimensions: usize,
    #[serde(default = "default_model_cache_dir")]
    pub model_cache_dir: PathBuf,
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Worker threads for per-document scoring; rayon's default when unset.
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_hash_dimensions() -> usize {
    HashEncoder::DEFAULT_DIMENSIONS
}

fn default_model_cache_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_pdf_dir() -> String {
    "PDFs".to_string()
}

fn default_output_file() -> String {
    "challenge1b_output.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            encoder: EncoderKind::default(),
            hash_dimensions: default_hash_dimensions(),
            model_cache_dir: default_model_cache_dir(),
            pdf_dir: default_pdf_dir(),
            output_file: default_output_file(),
            workers: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load with `file` as the optional TOML layer. A missing file is not an error.
    pub fn load_from(file: &Path) -> Result<Self, AnalysisError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

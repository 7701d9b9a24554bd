use std::path::Path;

use serde::Deserialize;

use crate::error::AnalysisError;
use crate::extract::DocumentSource;

/// The challenge input file: which documents to read, on whose behalf, for what.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChallengeInput {
    #[serde(default)]
    pub challenge_info: Option<ChallengeInfo>,
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChallengeInfo {
    #[serde(default)]
    pub challenge_id: Option<String>,
    #[serde(default)]
    pub test_case_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentEntry {
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Persona {
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

impl ChallengeInput {
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn description(&self) -> Option<&str> {
        self.challenge_info.as_ref()?.description.as_deref()
    }

    /// Resolve each listed filename inside `doc_dir`, keeping input order.
    pub fn document_sources(&self, doc_dir: &Path) -> Vec<DocumentSource> {
        self.documents
            .iter()
            .map(|d| DocumentSource::from_path(doc_dir.join(&d.filename)))
            .collect()
    }
}

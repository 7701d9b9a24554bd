pub mod pdf;
pub mod plaintext;

use std::path::{Path, PathBuf};

use crate::error::AnalysisError;

/// A document to analyze: its display name (file base name) and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub name: String,
    pub path: PathBuf,
}

impl DocumentSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        DocumentSource { name, path }
    }
}

/// Turns a document into page-ordered plain text.
///
/// A page that yields no text is an empty string, not a missing entry.
pub trait TextExtractor: Send + Sync {
    fn pages(&self, source: &DocumentSource) -> Result<Vec<String>, AnalysisError>;
}

/// Reads documents from disk, picking a backend by file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileExtractor;

impl TextExtractor for FileExtractor {
    fn pages(&self, source: &DocumentSource) -> Result<Vec<String>, AnalysisError> {
        match extension(&source.path).as_deref() {
            Some("pdf") => pdf::extract_pages(&source.path)
                .map_err(|reason| AnalysisError::unreadable(&source.name, reason)),
            Some("txt" | "text" | "md") => plaintext::read_pages(&source.path)
                .map_err(|e| AnalysisError::unreadable(&source.name, e)),
            other => Err(AnalysisError::unreadable(
                &source.name,
                format!("unsupported file type: {}", other.unwrap_or("<none>")),
            )),
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// True when extraction produced nothing but whitespace.
pub fn is_blank(pages: &[String]) -> bool {
    pages.iter().all(|p| p.trim().is_empty())
}

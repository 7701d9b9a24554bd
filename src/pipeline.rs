use std::sync::Arc;

use indicatif::ProgressBar;
use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::encoder::Encoder;
use crate::error::AnalysisError;
use crate::extract::{is_blank, DocumentSource, FileExtractor, TextExtractor};
use crate::output::{self, AnalysisResult};
use crate::parser::{self, Section};
use crate::rank::{
    extract_subsections, rank_documents, score_sections, select_sections, ContextVector,
    DocumentSections, RelevanceScorer,
};

/// Runs one analysis: extract → segment → score → rank → select → refine → assemble.
///
/// The encoder and extractor are shared read-only by every document of a run.
pub struct Analyzer {
    encoder: Arc<dyn Encoder>,
    extractor: Arc<dyn TextExtractor>,
    progress: ProgressBar,
}

impl Analyzer {
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Analyzer {
            encoder,
            extractor: Arc::new(FileExtractor),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Advance `progress` once per processed document.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn analyze(
        &self,
        sources: &[DocumentSource],
        persona: &str,
        job: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_at(sources, persona, job, output::timestamp_now())
    }

    /// Same as [`Analyzer::analyze`] with a caller-supplied timestamp.
    ///
    /// Only a context-encoding failure is an error. Documents that cannot be
    /// read, segmented or scored are logged and ranked with no sections.
    pub fn analyze_at(
        &self,
        sources: &[DocumentSource],
        persona: &str,
        job: &str,
        timestamp: String,
    ) -> Result<AnalysisResult, AnalysisError> {
        let context = ContextVector::encode(self.encoder.as_ref(), persona, job)?;
        let scorer = RelevanceScorer::new(self.encoder.as_ref(), &context);

        let unique: Vec<&DocumentSource> = sources.iter().unique_by(|s| s.name.clone()).collect();
        if unique.len() < sources.len() {
            warn!(duplicates = sources.len() - unique.len(), "Ignoring repeated document names");
        }

        info!(documents = unique.len(), encoder = self.encoder.name(), "Analyzing documents");
        self.progress.set_length(unique.len() as u64);

        let process = |source: &DocumentSource| -> DocumentSections {
            let sections = match self.scored_sections(source, &scorer) {
                Ok(sections) => {
                    debug!(document = %source.name, sections = sections.len(), "Document scored");
                    sections
                }
                Err(e) => {
                    warn!(document = %source.name, error = %e, "Skipping document");
                    Vec::new()
                }
            };
            self.progress.inc(1);
            DocumentSections {
                name: source.name.clone(),
                sections,
            }
        };

        #[cfg(feature = "rayon")]
        let documents: Vec<DocumentSections> = {
            use rayon::prelude::*;
            unique.par_iter().map(|s| process(*s)).collect()
        };
        #[cfg(not(feature = "rayon"))]
        let documents: Vec<DocumentSections> = unique.iter().map(|s| process(*s)).collect();

        self.progress.finish_and_clear();

        let ranked = rank_documents(documents);
        let selected = select_sections(&ranked);

        let mut subsections = Vec::new();
        for picked in &selected {
            match extract_subsections(&picked.section, &scorer) {
                Ok(found) => subsections.extend(found),
                Err(e) => warn!(
                    document = %picked.section.document,
                    section = %picked.section.title,
                    error = %e,
                    "Skipping subsections"
                ),
            }
        }

        info!(
            sections = selected.len(),
            subsections = subsections.len(),
            "Selection complete"
        );

        let names: Vec<String> = sources.iter().map(|s| s.name.clone()).collect();
        Ok(output::assemble(&names, persona, job, &selected, &subsections, timestamp))
    }

    fn scored_sections(
        &self,
        source: &DocumentSource,
        scorer: &RelevanceScorer,
    ) -> Result<Vec<Section>, AnalysisError> {
        let pages = self.extractor.pages(source)?;
        if is_blank(&pages) {
            return Err(AnalysisError::unreadable(&source.name, "no extractable text"));
        }

        let mut sections = parser::segment(&source.name, &pages);
        if sections.is_empty() {
            return Err(AnalysisError::NoSections {
                document: source.name.clone(),
            });
        }

        score_sections(&mut sections, scorer)?;
        Ok(sections)
    }
}

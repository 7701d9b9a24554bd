use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::rank::{SelectedSection, Subsection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub sub_section_analysis: Vec<SubsectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: usize,
    pub section_title: String,
    pub importance_rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionEntry {
    pub document: String,
    pub page_number: usize,
    pub refined_text: String,
}

/// Local time, ISO-8601 without offset, microsecond precision.
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Package a run's selection into the result structure. No scoring happens here.
pub fn assemble(
    input_documents: &[String],
    persona: &str,
    job: &str,
    selected: &[SelectedSection],
    subsections: &[Subsection],
    processing_timestamp: String,
) -> AnalysisResult {
    AnalysisResult {
        metadata: Metadata {
            input_documents: input_documents.to_vec(),
            persona: persona.to_string(),
            job_to_be_done: job.to_string(),
            processing_timestamp,
        },
        extracted_sections: selected
            .iter()
            .map(|s| ExtractedSection {
                document: s.section.document.clone(),
                page_number: s.section.page,
                section_title: s.section.title.clone(),
                importance_rank: s.importance_rank,
            })
            .collect(),
        sub_section_analysis: subsections
            .iter()
            .map(|s| SubsectionEntry {
                document: s.document.clone(),
                page_number: s.page,
                refined_text: s.text.clone(),
            })
            .collect(),
    }
}

/// Pretty JSON with four-space indentation.
fn write_pretty<W: Write>(writer: W, result: &AnalysisResult) -> Result<(), serde_json::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    result.serialize(&mut ser)
}

pub fn write_json(path: &Path, result: &AnalysisResult) -> Result<(), AnalysisError> {
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    write_pretty(&mut writer, result)?;
    writer.flush()?;
    Ok(())
}

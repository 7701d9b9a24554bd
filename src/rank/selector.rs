use itertools::Itertools;
use tracing::debug;

use super::documents::RankedDocument;
use crate::parser::Section;

/// Sections taken from the first, second and third ranked documents.
///
/// Fixed so that several sources always reach the output, even when one
/// document dominates on raw similarity. Documents ranked fourth or lower
/// never contribute, even if an earlier slot goes unfilled.
pub const DOCUMENT_QUOTAS: [usize; 3] = [2, 2, 1];

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSection {
    pub section: Section,
    /// 1-based position after the global re-sort by score.
    pub importance_rank: usize,
}

/// Pick the top sections of the best documents, then order the pool by score.
///
/// `ranked` must come from [`super::documents::rank_documents`]: documents
/// best-first, each with its sections best-first.
pub fn select_sections(ranked: &[RankedDocument]) -> Vec<SelectedSection> {
    ranked
        .iter()
        .zip(DOCUMENT_QUOTAS)
        .flat_map(|(doc, quota)| {
            debug!(document = %doc.name, quota, available = doc.sections.len(), "Selecting sections");
            doc.sections.iter().take(quota).cloned()
        })
        .sorted_by(|a, b| b.relevance_or_zero().total_cmp(&a.relevance_or_zero()))
        .enumerate()
        .map(|(idx, section)| SelectedSection {
            section,
            importance_rank: idx + 1,
        })
        .collect()
}

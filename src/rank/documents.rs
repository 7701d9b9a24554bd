use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::parser::Section;

/// Number of best sections averaged into a document's aggregate score.
pub const AGGREGATE_TOP_N: usize = 5;

/// One document's scored sections, in segmentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSections {
    pub name: String,
    pub sections: Vec<Section>,
}

/// A document after ranking: sections best-first, plus its aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDocument {
    pub name: String,
    pub aggregate: f32,
    pub sections: Vec<Section>,
}

impl RankedDocument {
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }
}

fn by_relevance_desc(a: &Section, b: &Section) -> Ordering {
    b.relevance_or_zero().total_cmp(&a.relevance_or_zero())
}

/// Sort best-first. Stable, so equal scores keep segmentation order.
pub fn sort_sections(sections: &mut [Section]) {
    sections.sort_by(by_relevance_desc);
}

/// Mean of the first [`AGGREGATE_TOP_N`] scores of a best-first list; 0 when empty.
pub fn aggregate_score(sorted: &[Section]) -> f32 {
    let top = &sorted[..sorted.len().min(AGGREGATE_TOP_N)];
    if top.is_empty() {
        return 0.0;
    }
    top.iter().map(Section::relevance_or_zero).sum::<f32>() / top.len() as f32
}

/// Rank documents by aggregate score, best first.
///
/// Documents without sections score 0 and always follow every document that
/// has sections, so they never occupy a selection slot. Ties keep input order.
pub fn rank_documents(documents: Vec<DocumentSections>) -> Vec<RankedDocument> {
    let mut ranked: Vec<RankedDocument> = documents
        .into_iter()
        .map(|doc| {
            let mut sections = doc.sections;
            sort_sections(&mut sections);
            let aggregate = aggregate_score(&sections);
            debug!(document = %doc.name, aggregate, sections = sections.len(), "Scored document");
            RankedDocument {
                name: doc.name,
                aggregate,
                sections,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.has_sections()
            .cmp(&a.has_sections())
            .then_with(|| b.aggregate.total_cmp(&a.aggregate))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(doc: &str, title: &str, score: f32) -> Section {
        Section {
            document: doc.to_string(),
            page: 1,
            title: title.to_string(),
            body: String::new(),
            relevance: Some(score),
        }
    }

    fn doc(name: &str, scores: &[f32]) -> DocumentSections {
        DocumentSections {
            name: name.to_string(),
            sections: scores
                .iter()
                .enumerate()
                .map(|(i, s)| scored(name, &format!("S{}", i), *s))
                .collect(),
        }
    }

    #[test]
    fn aggregate_uses_top_five() {
        let ranked = rank_documents(vec![doc("a", &[0.1, 0.9, 0.8, 0.7, 0.6, 0.5, 0.2])]);
        // Top five: 0.9 0.8 0.7 0.6 0.5
        assert!((ranked[0].aggregate - 0.7).abs() < 1e-6);
    }

    #[test]
    fn aggregate_with_fewer_than_five() {
        let ranked = rank_documents(vec![doc("a", &[0.2, 0.4])]);
        assert!((ranked[0].aggregate - 0.3).abs() < 1e-6);
    }

    #[test]
    fn aggregate_empty_is_zero() {
        assert_eq!(aggregate_score(&[]), 0.0);
        let ranked = rank_documents(vec![doc("a", &[])]);
        assert_eq!(ranked[0].aggregate, 0.0);
    }

    #[test]
    fn unscored_section_counts_as_zero() {
        let mut s = scored("a", "x", 0.0);
        s.relevance = None;
        let sections = vec![scored("a", "y", 0.6), s];
        assert!((aggregate_score(&sections) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn sections_sorted_best_first_stable() {
        let ranked = rank_documents(vec![doc("a", &[0.3, 0.8, 0.3, 0.5])]);
        let titles: Vec<&str> = ranked[0].sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["S1", "S3", "S0", "S2"]);
    }

    #[test]
    fn documents_ordered_by_aggregate() {
        let ranked = rank_documents(vec![doc("low", &[0.1]), doc("high", &[0.9]), doc("mid", &[0.5])]);
        let names: Vec<&str> = ranked.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank_documents(vec![doc("first", &[0.5]), doc("second", &[0.5])]);
        assert_eq!(ranked[0].name, "first");
        assert_eq!(ranked[1].name, "second");
    }

    #[test]
    fn empty_documents_rank_last() {
        let ranked = rank_documents(vec![
            doc("empty", &[]),
            doc("negative", &[-0.2]),
            doc("positive", &[0.4]),
        ]);
        let names: Vec<&str> = ranked.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["positive", "negative", "empty"]);
        assert_eq!(ranked[2].aggregate, 0.0);
    }
}

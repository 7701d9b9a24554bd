use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::scorer::RelevanceScorer;
use crate::encoder::EncodeError;
use crate::parser::Section;

/// A blank line, possibly holding stray spaces, ends a paragraph.
static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Passages shorter than this (after trimming) are not worth ranking.
pub const MIN_PASSAGE_CHARS: usize = 50;
/// Passages kept per selected section.
pub const MAX_SUBSECTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subsection {
    pub document: String,
    pub page: usize,
    pub text: String,
    pub relevance: f32,
}

/// Trimmed paragraphs of `body` long enough to rank, in order of appearance.
pub fn split_passages(body: &str) -> Vec<&str> {
    PARAGRAPH_BREAK_RE
        .split(body)
        .map(str::trim)
        .filter(|p| p.chars().count() >= MIN_PASSAGE_CHARS)
        .collect()
}

/// Score the section's paragraphs and keep the best [`MAX_SUBSECTIONS`].
///
/// Ties keep paragraph order. Each passage inherits the section's document and page.
pub fn extract_subsections(
    section: &Section,
    scorer: &RelevanceScorer,
) -> Result<Vec<Subsection>, EncodeError> {
    let mut passages = split_passages(&section.body)
        .into_iter()
        .map(|text| -> Result<Subsection, EncodeError> {
            Ok(Subsection {
                document: section.document.clone(),
                page: section.page,
                text: text.to_string(),
                relevance: scorer.score(text)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    passages.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    passages.truncate(MAX_SUBSECTIONS);
    Ok(passages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{Encoder, HashEncoder};
    use crate::rank::scorer::ContextVector;

    /// Scores a text by its length, so tests can pick the ranking.
    struct LengthEncoder;

    impl Encoder for LengthEncoder {
        fn name(&self) -> &str {
            "length"
        }

        fn encode(&self, text: &str) -> Result<Vec<f32>, EncodeError> {
            let len = text.chars().count() as f32;
            Ok(vec![1.0, len / 1000.0])
        }
    }

    /// Every text gets the same vector.
    struct ConstantEncoder;

    impl Encoder for ConstantEncoder {
        fn name(&self) -> &str {
            "constant"
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>, EncodeError> {
            Ok(vec![1.0, 1.0])
        }
    }

    fn section(body: &str) -> Section {
        Section {
            document: "recipes.pdf".to_string(),
            page: 4,
            title: "Dinner Ideas".to_string(),
            body: body.to_string(),
            relevance: Some(0.5),
        }
    }

    fn paragraph(tag: char, len: usize) -> String {
        std::iter::repeat(tag).take(len).collect()
    }

    #[test]
    fn short_paragraph_dropped() {
        let body = format!("{}\n\n{}", paragraph('a', 40), paragraph('b', 80));
        let encoder = HashEncoder::default();
        let context = ContextVector::encode(&encoder, "Chef", "Plan a menu").unwrap();
        let subs = extract_subsections(&section(&body), &RelevanceScorer::new(&encoder, &context)).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].text, paragraph('b', 80));
    }

    #[test]
    fn at_most_three_sorted_desc() {
        // Context (1, 1): longer passages point closer to it.
        let body = [60, 120, 90, 200, 70]
            .iter()
            .enumerate()
            .map(|(i, len)| paragraph((b'a' + i as u8) as char, *len))
            .collect::<Vec<_>>()
            .join("\n\n");
        let context = ContextVector::encode(&ConstantEncoder, "p", "j").unwrap();
        let subs = extract_subsections(&section(&body), &RelevanceScorer::new(&LengthEncoder, &context)).unwrap();
        let lens: Vec<usize> = subs.iter().map(|s| s.text.len()).collect();
        assert_eq!(lens, vec![200, 120, 90]);
        assert!(subs.windows(2).all(|w| w[0].relevance >= w[1].relevance));
    }

    #[test]
    fn ties_keep_paragraph_order() {
        let body = format!(
            "{}\n\n{}\n\n{}\n\n{}",
            paragraph('a', 60),
            paragraph('b', 60),
            paragraph('c', 60),
            paragraph('d', 60)
        );
        let context = ContextVector::encode(&ConstantEncoder, "p", "j").unwrap();
        let subs = extract_subsections(&section(&body), &RelevanceScorer::new(&ConstantEncoder, &context)).unwrap();
        let first: Vec<char> = subs.iter().map(|s| s.text.chars().next().unwrap()).collect();
        assert_eq!(first, vec!['a', 'b', 'c']);
    }

    #[test]
    fn tagged_with_parent_location() {
        let body = paragraph('x', 75);
        let context = ContextVector::encode(&ConstantEncoder, "p", "j").unwrap();
        let subs = extract_subsections(&section(&body), &RelevanceScorer::new(&ConstantEncoder, &context)).unwrap();
        assert_eq!(subs[0].document, "recipes.pdf");
        assert_eq!(subs[0].page, 4);
    }

    #[test]
    fn whitespace_only_blank_lines_split() {
        let body = format!("{}\n   \n{}", paragraph('a', 55), paragraph('b', 55));
        assert_eq!(split_passages(&body).len(), 2);
    }

    #[test]
    fn single_newlines_do_not_split() {
        let body = format!("{}\n{}", paragraph('a', 30), paragraph('b', 30));
        assert_eq!(split_passages(&body), vec![body.as_str()]);
    }

    #[test]
    fn passages_are_trimmed() {
        let body = format!("  {}  \n\n", paragraph('a', 50));
        assert_eq!(split_passages(&body), vec![paragraph('a', 50).as_str()]);
    }
}

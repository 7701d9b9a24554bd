use serde::Serialize;
use tracing::debug;

use super::headings::HeadingMatch;

/// Bodies shorter than this are stray headings or noise, not sections.
pub const MIN_BODY_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub document: String,
    pub page: usize,
    pub title: String,
    pub body: String,
    /// Cosine similarity against the run's context vector; `None` until scored.
    pub relevance: Option<f32>,
}

impl Section {
    pub fn relevance_or_zero(&self) -> f32 {
        self.relevance.unwrap_or(0.0)
    }

    /// The text a section is scored on.
    pub fn scoring_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Maps byte offsets of the joined document text back to 1-based page numbers.
///
/// Pages are joined with a single `\n`, so each page occupies its own length
/// plus one separator byte. An offset belongs to the first page whose
/// cumulative span reaches it. A heading at the very start of a page is
/// therefore attributed to the page before it.
#[derive(Debug, Clone)]
pub struct PageMap {
    lengths: Vec<usize>,
}

impl PageMap {
    pub fn new(pages: &[String]) -> Self {
        PageMap {
            lengths: pages.iter().map(String::len).collect(),
        }
    }

    pub fn page_at(&self, offset: usize) -> usize {
        let mut consumed = 0;
        for (idx, len) in self.lengths.iter().enumerate() {
            let span = len + 1;
            if consumed + span >= offset {
                return idx + 1;
            }
            consumed += span;
        }
        1
    }
}

/// Cut `text` into sections at each heading.
///
/// A section's body runs from the end of its heading line to the start of the
/// next heading (or end of text). Sections whose trimmed body is shorter than
/// [`MIN_BODY_CHARS`] characters are dropped; the heading that follows still
/// ends them.
pub fn cluster_sections(
    document: &str,
    text: &str,
    headings: &[HeadingMatch],
    pages: &PageMap,
) -> Vec<Section> {
    let mut sections = Vec::new();

    for (i, heading) in headings.iter().enumerate() {
        let body_end = headings.get(i + 1).map_or(text.len(), |next| next.start);
        let body = text[heading.end..body_end].trim();

        let body_chars = body.chars().count();
        if body_chars < MIN_BODY_CHARS {
            debug!(document, title = %heading.title, body_chars, "Dropped short section");
            continue;
        }

        sections.push(Section {
            document: document.to_string(),
            page: pages.page_at(heading.start),
            title: heading.title.clone(),
            body: body.to_string(),
            relevance: None,
        });
    }

    sections
}

// ── Tests ──

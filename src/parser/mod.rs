pub mod headings;
pub mod sections;

pub use headings::{HeadingKind, HeadingMatch};
pub use sections::{PageMap, Section};

/// Join page texts the way the segmenter sees them: one `\n` between pages.
pub fn full_text(pages: &[String]) -> String {
    pages.join("\n")
}

/// Two-pass segmentation: page texts → heading lines → titled sections.
///
/// Returns an empty list when the document has no text at all.
pub fn segment(document: &str, pages: &[String]) -> Vec<Section> {
    let text = full_text(pages);
    if text.is_empty() {
        return Vec::new();
    }
    let found = headings::find_headings(&text);
    sections::cluster_sections(document, &text, &found, &PageMap::new(pages))
}

// ── Tests ──

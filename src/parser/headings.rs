use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

// Outline numbering followed by a capitalized word: "1. Overview", "2.1 Results".
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.\d\s]*[A-Z].*$").unwrap());
// Two or more consecutive Title-Case words and nothing else.
static TITLE_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z][a-z]+\s?){2,}$").unwrap());
// At least 5 characters of uppercase letters, spaces and hyphens.
static ALL_CAPS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z\s-]{5,}$").unwrap());

/// Headings longer than this are sentences that happen to look like titles.
pub const MAX_TITLE_WORDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Numbered,
    TitleCase,
    AllCaps,
}

impl HeadingKind {
    /// Evaluation order. The first classifier that accepts a line decides its kind.
    pub const ORDER: [HeadingKind; 3] = [
        HeadingKind::Numbered,
        HeadingKind::TitleCase,
        HeadingKind::AllCaps,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            HeadingKind::Numbered => &NUMBERED_RE,
            HeadingKind::TitleCase => &TITLE_CASE_RE,
            HeadingKind::AllCaps => &ALL_CAPS_RE,
        }
    }

    pub fn matches(self, line: &str) -> bool {
        self.pattern().is_match(line)
    }
}

/// A title-like line located in the full document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub title: String,
    /// Byte offset of the first character of the line.
    pub start: usize,
    /// Byte offset just past the terminating newline.
    pub end: usize,
}

/// Classify a single line (without its newline).
///
/// A run of five or more spaces passes the ALL-CAPS rule and becomes a heading
/// with an empty title.
pub fn classify_line(line: &str) -> Option<HeadingKind> {
    HeadingKind::ORDER.into_iter().find(|kind| kind.matches(line))
}

pub fn word_count(title: &str) -> usize {
    title.split_whitespace().count()
}

/// Scan `text` once and return every heading line, in document order.
///
/// A heading must be terminated by a newline, so an unterminated final line is
/// never a heading. Candidates longer than [`MAX_TITLE_WORDS`] are dropped here
/// and their text stays part of the surrounding section body.
pub fn find_headings(text: &str) -> Vec<HeadingMatch> {
    let mut headings = Vec::new();
    let mut offset = 0;

    for raw in text.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();

        let Some(line) = raw.strip_suffix('\n') else {
            continue;
        };
        let Some(kind) = classify_line(line) else {
            continue;
        };

        let title = line.trim();
        if word_count(title) > MAX_TITLE_WORDS {
            debug!(title, "Rejected heading candidate: too many words");
            continue;
        }

        debug!(?kind, title, start, "Heading");
        headings.push(HeadingMatch {
            title: title.to_string(),
            start,
            end: offset,
        });
    }

    headings
}

// ── Tests ──

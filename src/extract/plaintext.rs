use std::path::Path;

/// Page separator in plain-text exports (`pdftotext` writes one after every page).
pub const PAGE_BREAK: char = '\x0c';

/// Split plain text into pages on form feeds.
///
/// Line endings are normalized to `\n`. A trailing empty page left by a final
/// form feed is dropped.
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text
        .split(PAGE_BREAK)
        .map(|page| page.replace("\r\n", "\n"))
        .collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }
    pages
}

pub fn read_pages(path: &Path) -> std::io::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(split_pages(&text))
}

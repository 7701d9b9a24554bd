use std::panic;
use std::path::Path;

use tracing::debug;

/// Extract one text string per PDF page, in page order.
///
/// `pdf-extract` panics on some malformed files; the panic is caught and
/// reported as an ordinary error so one bad file cannot abort a run.
pub fn extract_pages(path: &Path) -> Result<Vec<String>, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    debug!(path = %path.display(), bytes = bytes.len(), "Extracting PDF text");

    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("PDF parser panicked on this file".to_string()),
    }
}

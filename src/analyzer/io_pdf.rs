// Primitives for reading PDF documents.

use lopdf::Document;

use crate::analyzer::{io_common::simplify_file_name, *};

pub fn read_pdf_document(path: &str) -> AppResult<String> {
    let bytes = fs::read(path).context(OpeningFileSnafu { path })?;
    read_pdf_bytes(&bytes, &simplify_file_name(path))
}

pub fn read_pdf_bytes(bytes: &[u8], name: &str) -> AppResult<String> {
    let doc = Document::load_mem(bytes).context(LoadingPdfSnafu { name })?;
    extract_pages(&doc, name)
}

/// The text of all the pages, in page order, one page per line block.
fn extract_pages(doc: &Document, name: &str) -> AppResult<String> {
    let pages = doc.get_pages();
    let mut page_numbers: Vec<u32> = pages.keys().copied().collect();
    page_numbers.sort_unstable();
    debug!("extract_pages: {}: {} pages", name, page_numbers.len());

    let mut page_texts: Vec<String> = Vec::new();
    for page_number in page_numbers {
        let text = doc
            .extract_text(&[page_number])
            .context(ExtractingPdfPageSnafu {
                name,
                page: page_number,
            })?;
        debug!(
            "extract_pages: {}: page {}: {} chars",
            name,
            page_number,
            text.chars().count()
        );
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            page_texts.push(trimmed.to_string());
        }
    }
    if page_texts.is_empty() {
        // Most likely a scanned document.
        warn!("extract_pages: {}: no text found", name);
    }
    Ok(page_texts.join("\n"))
}

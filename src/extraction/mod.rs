use async_trait::async_trait;

use crate::core::EdulearnError;

/// Below this many characters of extracted text the document is reported as
/// unreadable (scanned, image-only, encrypted) instead of producing junk
/// artifacts.
pub const MIN_EXTRACTED_CHARS: usize = 50;

/// The PDF engine seam. Implementations own the byte-level decoding; the
/// core only ever sees page text.
#[async_trait]
pub trait PdfTextSource: Send + Sync {
    fn page_count(&self) -> u32;

    /// Text content of page `page` (1-based), items joined by spaces.
    async fn extract_page_text(&self, page: u32) -> Result<String, EdulearnError>;
}

/// Pull text from every page in order. Pages are awaited one at a time to
/// bound memory and keep the concatenation in page order. A failing page is
/// logged and skipped; only an overall shortfall of text is an error.
pub async fn extract_text(source: &dyn PdfTextSource) -> Result<String, EdulearnError> {
    let page_count = source.page_count();
    let mut pages = Vec::with_capacity(page_count as usize);

    for page in 1..=page_count {
        match source.extract_page_text(page).await {
            Ok(text) => pages.push(text),
            Err(e) => log::warn!("Skipping page {page}/{page_count}: {e}"),
        }
    }

    let full_text = pages.join("\n").trim().to_string();
    let chars = full_text.chars().count();
    if chars < MIN_EXTRACTED_CHARS {
        return Err(EdulearnError::InsufficientText(chars));
    }

    log::info!("Extracted {chars} characters from {page_count} pages");
    Ok(full_text)
}

/// In-memory page list. The demo binary and tests use it in place of a real
/// PDF engine.
pub struct PlainTextSource {
    pages: Vec<String>,
}

impl PlainTextSource {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Treat a whole text as a single-page document.
    pub fn from_text(text: &str) -> Self {
        Self { pages: vec![text.to_string()] }
    }
}

#[async_trait]
impl PdfTextSource for PlainTextSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn extract_page_text(&self, page: u32) -> Result<String, EdulearnError> {
        self.pages
            .get(page as usize - 1)
            .cloned()
            .ok_or_else(|| EdulearnError::PageExtraction {
                page,
                reason: "page out of range".to_string(),
            })
    }
}

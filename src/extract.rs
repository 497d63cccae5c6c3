use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Pulls plain text out of an uploaded document
pub trait TextExtractor: Send + Sync {
    /// Text of every page, in page order, each page followed by a newline
    fn extract(&self, document: &[u8]) -> Result<String>;
}

/// [TextExtractor] for PDF files, backed by lopdf
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document: &[u8]) -> Result<String> {
        let pdf = lopdf::Document::load_mem(document).map_err(|e| {
            tracing::warn!(error = %e, size = document.len(), "could not parse PDF");
            Error::ExtractionFailed(e.to_string())
        })?;

        let mut text = String::new();
        for page_number in pdf.get_pages().into_keys() {
            let page_text = pdf
                .extract_text(&[page_number])
                .map_err(|e| Error::ExtractionFailed(format!("page {page_number}: {e}")))?;
            text.push_str(&page_text);
            text.push('\n');
        }

        tracing::debug!(
            pages = pdf.get_pages().len(),
            characters = text.chars().count(),
            "extracted text from PDF"
        );
        Ok(text)
    }
}

/// Collapse every run of whitespace (newlines included) into a single space
/// and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    whitespace.replace_all(text, " ").trim().to_string()
}

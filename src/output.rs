//! Result types returned by the conversion entry points.

use serde::{Deserialize, Serialize};

/// Raw text of one PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed page number in the source document.
    pub page_num: usize,
    /// Text exactly as pdfium returned it. Empty for image-only pages.
    pub text: String,
}

/// Document-level information read from the PDF without extracting text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// Counters and timings for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the source document.
    pub total_pages: usize,
    /// Pages whose text layer was read (the selection).
    pub extracted_pages: usize,
    /// Selected pages that yielded no text at all.
    pub empty_pages: usize,
    /// Paragraphs written to the document.
    pub paragraphs: usize,
    /// Characters in the concatenated text.
    pub characters: usize,
    pub extraction_duration_ms: u64,
    pub build_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Everything produced by [`crate::convert()`], before the DOCX is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Selected pages joined with the configured separator.
    pub text: String,
    /// Per-page text in document order.
    pub pages: Vec<PageText>,
    /// Trimmed, non-empty paragraphs in document order.
    pub paragraphs: Vec<String>,
    pub metadata: DocumentMetadata,
    pub stats: ConversionStats,
}

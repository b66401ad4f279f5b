//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline works through the document. The CLI uses it to
//! dump each page's raw text (or drive a progress bar with `--no-echo`).
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdf2docx::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CharCounter {
//!     chars: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CharCounter {
//!     fn on_page_extracted(&self, _page_num: usize, _total_pages: usize, text: &str) {
//!         self.chars.fetch_add(text.chars().count(), Ordering::SeqCst);
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(CharCounter { chars: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! assert!(config.progress_callback.is_some());
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it processes the document.
///
/// Events arrive strictly in order from a single thread. The `Send + Sync`
/// bound lets callers share one callback between a config and their own
/// reporting code. All methods default to no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once the PDF is open and the page selection is resolved.
    ///
    /// # Arguments
    /// * `total_pages`: number of pages that will be extracted
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after each page's text layer has been read.
    ///
    /// # Arguments
    /// * `page_num`   : 1-indexed page number in the document
    /// * `total_pages`: number of selected pages
    /// * `text`       : the page's raw text, possibly empty
    fn on_page_extracted(&self, page_num: usize, total_pages: usize, text: &str) {
        let _ = (page_num, total_pages, text);
    }

    /// Called once the text has been split into paragraphs.
    fn on_paragraphs_built(&self, paragraph_count: usize) {
        let _ = paragraph_count;
    }

    /// Called after the DOCX has been written to its final location.
    fn on_document_saved(&self, output_path: &Path, paragraph_count: usize) {
        let _ = (output_path, paragraph_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

//! Text extraction: read each selected page's text layer via pdfium.
//!
//! Extraction sits behind the [`TextExtractor`] trait so the rest of the
//! pipeline never names pdfium directly. [`PdfiumExtractor`] is the only
//! production backend; tests drive the pipeline with in-memory fakes.
//!
//! The pdfium document handle lives only for the duration of one call and
//! is dropped on every exit path, including `?` early returns.

use crate::error::Pdf2DocxError;
use crate::output::{DocumentMetadata, PageText};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// A source of per-page text for a PDF on disk.
pub trait TextExtractor {
    /// Read document metadata (including the page count) without extracting text.
    fn inspect(&self, path: &Path) -> Result<DocumentMetadata, Pdf2DocxError>;

    /// Extract the text of the given 0-indexed pages, in the given order.
    ///
    /// `sink` is called once per page as soon as its text is available.
    /// Indices beyond the document are an error; pages with no text layer
    /// yield an empty [`PageText::text`].
    fn extract_pages(
        &self,
        path: &Path,
        indices: &[usize],
        sink: &mut dyn FnMut(PageText),
    ) -> Result<(), Pdf2DocxError>;
}

/// [`TextExtractor`] backed by the pdfium C++ library.
pub struct PdfiumExtractor {
    pdfium: Pdfium,
}

impl PdfiumExtractor {
    /// Bind to pdfium.
    ///
    /// Resolution order: `library_path` if given, then `PDFIUM_LIB_PATH`,
    /// then the platform's system library search path.
    pub fn bind(library_path: Option<&Path>) -> Result<Self, Pdf2DocxError> {
        let env_path = std::env::var("PDFIUM_LIB_PATH")
            .ok()
            .filter(|p| !p.is_empty());

        let bindings = match (library_path, env_path) {
            (Some(path), _) => {
                debug!("Binding pdfium from {}", path.display());
                Pdfium::bind_to_library(path)
            }
            (None, Some(env)) => {
                debug!("Binding pdfium from PDFIUM_LIB_PATH={}", env);
                Pdfium::bind_to_library(Path::new(&env))
            }
            (None, None) => {
                debug!("Binding pdfium from the system library path");
                Pdfium::bind_to_system_library()
            }
        }
        .map_err(|e| Pdf2DocxError::PdfiumBindingFailed(format!("{e:?}")))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn open<'a>(&'a self, path: &Path) -> Result<PdfDocument<'a>, Pdf2DocxError> {
        self.pdfium.load_pdf_from_file(path, None).map_err(|e| {
            let err_str = format!("{:?}", e);
            if err_str.contains("Password") || err_str.contains("password") {
                Pdf2DocxError::PasswordRequired {
                    path: path.to_path_buf(),
                }
            } else {
                Pdf2DocxError::CorruptPdf {
                    path: path.to_path_buf(),
                    detail: err_str,
                }
            }
        })
    }
}

impl TextExtractor for PdfiumExtractor {
    fn inspect(&self, path: &Path) -> Result<DocumentMetadata, Pdf2DocxError> {
        let document = self.open(path)?;
        let metadata = document.metadata();

        let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
            metadata.get(tag).and_then(|t| {
                let v = t.value().to_string();
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            })
        };

        Ok(DocumentMetadata {
            title: get_meta(PdfDocumentMetadataTagType::Title),
            author: get_meta(PdfDocumentMetadataTagType::Author),
            subject: get_meta(PdfDocumentMetadataTagType::Subject),
            creator: get_meta(PdfDocumentMetadataTagType::Creator),
            producer: get_meta(PdfDocumentMetadataTagType::Producer),
            creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
            modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
            page_count: document.pages().len() as usize,
            pdf_version: format!("{:?}", document.version()),
        })
    }

    fn extract_pages(
        &self,
        path: &Path,
        indices: &[usize],
        sink: &mut dyn FnMut(PageText),
    ) -> Result<(), Pdf2DocxError> {
        let document = self.open(path)?;
        let pages = document.pages();
        let total_pages = pages.len() as usize;
        info!("PDF loaded: {} pages", total_pages);

        for &idx in indices {
            if idx >= total_pages {
                return Err(Pdf2DocxError::PageOutOfRange {
                    page: idx + 1,
                    total: total_pages,
                });
            }

            let page = pages
                .get(idx as u16)
                .map_err(|e| Pdf2DocxError::ExtractionFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                })?;

            let text = page
                .text()
                .map_err(|e| Pdf2DocxError::ExtractionFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                })?
                .all();

            debug!("Extracted page {} → {} chars", idx + 1, text.chars().count());
            sink(PageText {
                page_num: idx + 1,
                text,
            });
        }

        Ok(())
    }
}

/// Join page texts in order, putting `separator` between consecutive pages.
///
/// No trimming or normalisation happens here: with an empty separator the
/// result is the byte-for-byte concatenation of the page texts.
pub fn join_pages(pages: &[PageText], separator: &str) -> String {
    let capacity = pages.iter().map(|p| p.text.len()).sum::<usize>()
        + separator.len() * pages.len().saturating_sub(1);
    let mut text = String::with_capacity(capacity);
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            text.push_str(separator);
        }
        text.push_str(&page.text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, text: &str) -> PageText {
        PageText {
            page_num: n,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_join_without_separator_glues_pages() {
        let pages = [page(1, "end of one"), page(2, "start of two")];
        assert_eq!(join_pages(&pages, ""), "end of onestart of two");
    }

    #[test]
    fn test_join_with_separator_between_pages_only() {
        let pages = [page(1, "a."), page(2, "b."), page(3, "c.")];
        assert_eq!(join_pages(&pages, "\n"), "a.\nb.\nc.");
    }

    #[test]
    fn test_join_keeps_empty_pages() {
        let pages = [page(1, "a"), page(2, ""), page(3, "c")];
        assert_eq!(join_pages(&pages, ""), "ac");
        assert_eq!(join_pages(&pages, "|"), "a||c");
    }

    #[test]
    fn test_join_no_pages() {
        assert_eq!(join_pages(&[], " "), "");
    }
}

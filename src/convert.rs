//! Conversion entry points.
//!
//! [`convert`] runs extraction and paragraph splitting and returns
//! everything in memory; [`convert_to_file`] additionally saves the DOCX.
//! The `_with` variants take any [`TextExtractor`], which is how the
//! pipeline is exercised without a pdfium library.
//!
//! The input path is validated before pdfium is bound and before anything
//! is written, so a missing or non-PDF input never touches the output path.

use crate::config::ConversionConfig;
use crate::error::Pdf2DocxError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata, PageText};
use crate::pipeline::extract::{join_pages, PdfiumExtractor, TextExtractor};
use crate::pipeline::{docx, input, paragraphs};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a PDF file to paragraphs using pdfium.
///
/// # Errors
/// - File not found / permission denied / not a PDF
/// - pdfium could not be bound, or the PDF is corrupt or encrypted
/// - The page selection matches no page
pub fn convert(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2DocxError> {
    let pdf_path = input::resolve_local(input_path)?;
    let extractor = PdfiumExtractor::bind(config.pdfium_library_path.as_deref())?;
    run(&extractor, &pdf_path, config)
}

/// Convert a PDF file to paragraphs using the given extractor.
pub fn convert_with<E: TextExtractor + ?Sized>(
    extractor: &E,
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2DocxError> {
    let pdf_path = input::resolve_local(input_path)?;
    run(extractor, &pdf_path, config)
}

/// Convert a PDF and save the result as a DOCX at `output_path`.
///
/// An existing file at `output_path` is replaced; its parent directory must
/// already exist.
pub fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Pdf2DocxError> {
    let total_start = Instant::now();
    let output = convert(input_path, config)?;
    save(output, output_path.as_ref(), config, total_start)
}

/// [`convert_to_file`] with an explicit extractor.
pub fn convert_to_file_with<E: TextExtractor + ?Sized>(
    extractor: &E,
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Pdf2DocxError> {
    let total_start = Instant::now();
    let output = convert_with(extractor, input_path, config)?;
    save(output, output_path.as_ref(), config, total_start)
}

/// Read PDF metadata without extracting any text.
pub fn inspect(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<DocumentMetadata, Pdf2DocxError> {
    let pdf_path = input::resolve_local(input_path)?;
    PdfiumExtractor::bind(config.pdfium_library_path.as_deref())?.inspect(&pdf_path)
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn run<E: TextExtractor + ?Sized>(
    extractor: &E,
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2DocxError> {
    let total_start = Instant::now();
    info!("Starting conversion: {}", pdf_path.display());

    // ── Step 1: Metadata and page selection ──────────────────────────────
    let metadata = extractor.inspect(pdf_path)?;
    let total_pages = metadata.page_count;
    info!("PDF has {} pages", total_pages);

    let page_indices = config.pages.to_indices(total_pages);
    if page_indices.is_empty() && total_pages > 0 {
        return Err(Pdf2DocxError::PageOutOfRange {
            page: config.pages.first_requested(),
            total: total_pages,
        });
    }
    debug!("Selected {} pages for extraction", page_indices.len());

    let selected = page_indices.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(selected);
    }

    // ── Step 2: Extract text ─────────────────────────────────────────────
    let extract_start = Instant::now();
    let mut pages: Vec<PageText> = Vec::with_capacity(selected);
    extractor.extract_pages(pdf_path, &page_indices, &mut |page| {
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_extracted(page.page_num, selected, &page.text);
        }
        pages.push(page);
    })?;
    let extraction_duration_ms = extract_start.elapsed().as_millis() as u64;

    let empty_pages = pages.iter().filter(|p| p.text.is_empty()).count();
    if empty_pages > 0 {
        debug!("{} of {} pages had no text layer", empty_pages, pages.len());
    }
    if !pages.is_empty() && empty_pages == pages.len() {
        warn!("No extractable text found; the PDF may be scanned images only");
    }

    let text = join_pages(&pages, config.page_separator.as_str());

    // ── Step 3: Split into paragraphs ────────────────────────────────────
    let build_start = Instant::now();
    let paragraphs = paragraphs::build_paragraphs(&text);
    let build_duration_ms = build_start.elapsed().as_millis() as u64;
    info!("Built {} paragraphs", paragraphs.len());

    if let Some(ref cb) = config.progress_callback {
        cb.on_paragraphs_built(paragraphs.len());
    }

    let stats = ConversionStats {
        total_pages,
        extracted_pages: pages.len(),
        empty_pages,
        paragraphs: paragraphs.len(),
        characters: text.chars().count(),
        extraction_duration_ms,
        build_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    Ok(ConversionOutput {
        text,
        pages,
        paragraphs,
        metadata,
        stats,
    })
}

fn save(
    output: ConversionOutput,
    output_path: &Path,
    config: &ConversionConfig,
    total_start: Instant,
) -> Result<ConversionStats, Pdf2DocxError> {
    let save_start = Instant::now();
    docx::save_document(&output.paragraphs, output_path)?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_document_saved(output_path, output.paragraphs.len());
    }

    let mut stats = output.stats;
    stats.build_duration_ms += save_start.elapsed().as_millis() as u64;
    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Conversion complete: {} pages → {} paragraphs, {}ms total",
        stats.extracted_pages, stats.paragraphs, stats.total_duration_ms
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PageSelection, PageSeparator};
    use std::io::Write;

    struct FakeExtractor {
        pages: Vec<&'static str>,
    }

    impl TextExtractor for FakeExtractor {
        fn inspect(&self, _path: &Path) -> Result<DocumentMetadata, Pdf2DocxError> {
            Ok(DocumentMetadata {
                page_count: self.pages.len(),
                pdf_version: "Pdf1_7".into(),
                ..Default::default()
            })
        }

        fn extract_pages(
            &self,
            _path: &Path,
            indices: &[usize],
            sink: &mut dyn FnMut(PageText),
        ) -> Result<(), Pdf2DocxError> {
            for &i in indices {
                sink(PageText {
                    page_num: i + 1,
                    text: self.pages[i].to_string(),
                });
            }
            Ok(())
        }
    }

    fn fake_pdf() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.7\n").unwrap();
        f
    }

    #[test]
    fn test_selected_pages_only() {
        let pdf = fake_pdf();
        let extractor = FakeExtractor {
            pages: vec!["One. ", "Two. ", "Three."],
        };
        let config = ConversionConfig::builder()
            .pages(PageSelection::Set(vec![3, 1]))
            .build()
            .unwrap();

        let out = convert_with(&extractor, pdf.path(), &config).unwrap();
        assert_eq!(out.text, "One. Three.");
        assert_eq!(out.paragraphs, vec!["One.", "Three."]);
        assert_eq!(out.stats.total_pages, 3);
        assert_eq!(out.stats.extracted_pages, 2);
    }

    #[test]
    fn test_selection_past_end_is_error() {
        let pdf = fake_pdf();
        let extractor = FakeExtractor { pages: vec!["a"] };
        let config = ConversionConfig::builder()
            .pages(PageSelection::Single(4))
            .build()
            .unwrap();

        let err = convert_with(&extractor, pdf.path(), &config).unwrap_err();
        assert!(matches!(
            err,
            Pdf2DocxError::PageOutOfRange { page: 4, total: 1 }
        ));
    }

    #[test]
    fn test_empty_pages_counted() {
        let pdf = fake_pdf();
        let extractor = FakeExtractor {
            pages: vec!["", "Text here.", ""],
        };
        let out = convert_with(&extractor, pdf.path(), &ConversionConfig::default()).unwrap();
        assert_eq!(out.stats.empty_pages, 2);
        assert_eq!(out.paragraphs, vec!["Text here."]);
    }

    #[test]
    fn test_separator_applied() {
        let pdf = fake_pdf();
        let extractor = FakeExtractor {
            pages: vec!["end of page one", "start of page two"],
        };
        let config = ConversionConfig::builder()
            .page_separator(PageSeparator::Space)
            .build()
            .unwrap();
        let out = convert_with(&extractor, pdf.path(), &config).unwrap();
        assert_eq!(out.text, "end of page one start of page two");
        assert_eq!(out.stats.characters, out.text.chars().count());
    }

    #[test]
    fn test_zero_page_document() {
        let pdf = fake_pdf();
        let extractor = FakeExtractor { pages: vec![] };
        let out = convert_with(&extractor, pdf.path(), &ConversionConfig::default()).unwrap();
        assert!(out.text.is_empty());
        assert!(out.paragraphs.is_empty());
    }
}

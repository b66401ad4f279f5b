//! # edgequake-pdf2docx
//!
//! Convert the text of a PDF document into a Word (`.docx`) file, one
//! paragraph per sentence-like fragment.
//!
//! Layout, images and tables are not carried over. The converter reads each
//! page's text layer with pdfium, joins the pages, splits the result after
//! `.`, `!` and `?` followed by spaces, and writes every non-blank fragment
//! as a default-styled paragraph.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input       check the path exists and starts with %PDF
//!  ├─ 2. Extract     per-page text via pdfium, joined in page order
//!  ├─ 3. Paragraphs  split after . ! ? + spaces, trim, drop blanks
//!  └─ 4. DOCX        one w:p per paragraph, atomic save
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf2docx::{convert_to_file, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let stats = convert_to_file("document.pdf", "document.docx", &config)?;
//!     eprintln!("{} paragraphs from {} pages", stats.paragraphs, stats.extracted_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2docx` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! pdfium itself is loaded at runtime: from `PDFIUM_LIB_PATH` if set,
//! otherwise from the system library path.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PageSelection, PageSeparator};
pub use convert::{convert, convert_to_file, convert_to_file_with, convert_with, inspect};
pub use error::Pdf2DocxError;
pub use output::{ConversionOutput, ConversionStats, DocumentMetadata, PageText};
pub use pipeline::docx::read_paragraphs;
pub use pipeline::extract::{PdfiumExtractor, TextExtractor};
pub use pipeline::paragraphs::{build_paragraphs, ParagraphSplitter, PunctuationSplitter};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};

//! Configuration types for PDF-to-DOCX conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the plain
//! behaviour of the converter: every page, concatenated with no separator,
//! no progress reporting and pdfium bound from the system library path.

use crate::error::Pdf2DocxError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration for a PDF-to-DOCX conversion.
///
/// # Example
/// ```rust
/// use edgequake_pdf2docx::{ConversionConfig, PageSelection, PageSeparator};
///
/// let config = ConversionConfig::builder()
///     .pages(PageSelection::Range(1, 3))
///     .page_separator(PageSeparator::Space)
///     .build()
///     .unwrap();
/// assert_eq!(config.page_separator.as_str(), " ");
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Page selection. Default: all pages.
    pub pages: PageSelection,

    /// Text inserted between consecutive pages. Default: nothing.
    ///
    /// With [`PageSeparator::None`] the last word of page N runs straight
    /// into the first word of page N+1, which is how the converter has
    /// always behaved. Pick `Space` or `Newline` to keep them apart.
    pub page_separator: PageSeparator,

    /// Explicit path to the pdfium shared library.
    ///
    /// When `None`, the `PDFIUM_LIB_PATH` environment variable is consulted,
    /// then the system library search path.
    pub pdfium_library_path: Option<PathBuf>,

    /// Optional progress callback fired as pages are extracted.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("pages", &self.pages)
            .field("page_separator", &self.page_separator)
            .field("pdfium_library_path", &self.pdfium_library_path)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn page_separator(mut self, sep: PageSeparator) -> Self {
        self.config.page_separator = sep;
        self
    }

    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library_path = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2DocxError> {
        self.config.pages.validate()?;
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Specifies which pages of the PDF to extract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Extract all pages (default).
    #[default]
    All,
    /// Extract a single page (1-indexed).
    Single(usize),
    /// Extract a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Extract specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// The first page a selection asks for, used when reporting a miss.
    pub fn first_requested(&self) -> usize {
        match self {
            PageSelection::All => 1,
            PageSelection::Single(p) => *p,
            PageSelection::Range(start, _) => *start,
            PageSelection::Set(pages) => pages.iter().copied().min().unwrap_or(0),
        }
    }

    fn validate(&self) -> Result<(), Pdf2DocxError> {
        match self {
            PageSelection::All => Ok(()),
            PageSelection::Single(0) => Err(Pdf2DocxError::InvalidConfig(
                "Pages are 1-indexed, minimum is 1 (got 0)".into(),
            )),
            PageSelection::Single(_) => Ok(()),
            PageSelection::Range(start, end) => {
                if *start < 1 {
                    return Err(Pdf2DocxError::InvalidConfig(format!(
                        "Pages are 1-indexed, minimum is 1 (got {start})"
                    )));
                }
                if start > end {
                    return Err(Pdf2DocxError::InvalidConfig(format!(
                        "Invalid page range '{start}-{end}': start must be <= end"
                    )));
                }
                Ok(())
            }
            PageSelection::Set(pages) => {
                if pages.is_empty() {
                    return Err(Pdf2DocxError::InvalidConfig(
                        "Page set must name at least one page".into(),
                    ));
                }
                if pages.contains(&0) {
                    return Err(Pdf2DocxError::InvalidConfig(
                        "Pages are 1-indexed, minimum is 1 (got 0)".into(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Parses `all`, `5`, `3-15` or `1,3,5,7`.
impl FromStr for PageSelection {
    type Err = Pdf2DocxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let parse_page = |p: &str| {
            p.trim().parse::<usize>().map_err(|_| {
                Pdf2DocxError::InvalidConfig(format!("Invalid page number: '{}'", p.trim()))
            })
        };

        let selection = if s == "all" {
            PageSelection::All
        } else if let Some((start, end)) = s.split_once('-') {
            PageSelection::Range(parse_page(start)?, parse_page(end)?)
        } else if s.contains(',') {
            PageSelection::Set(s.split(',').map(parse_page).collect::<Result<_, _>>()?)
        } else {
            PageSelection::Single(parse_page(&s)?)
        };

        selection.validate()?;
        Ok(selection)
    }
}

/// What to insert between the text of consecutive pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSeparator {
    /// Nothing; page texts are glued together. (default)
    #[default]
    None,
    /// A single space.
    Space,
    /// A single `\n`.
    Newline,
    /// Custom string inserted between pages.
    Custom(String),
}

impl PageSeparator {
    pub fn as_str(&self) -> &str {
        match self {
            PageSeparator::None => "",
            PageSeparator::Space => " ",
            PageSeparator::Newline => "\n",
            PageSeparator::Custom(s) => s,
        }
    }
}

/// Parses `none`, `space`, `newline`/`nl`; anything else is taken literally.
impl FromStr for PageSeparator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "none" | "" => PageSeparator::None,
            "space" => PageSeparator::Space,
            "newline" | "nl" => PageSeparator::Newline,
            _ => PageSeparator::Custom(s.to_string()),
        })
    }
}
